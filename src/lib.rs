// Drill engine and its supporting layers. The terminal UI lives in the
// binary (main.rs, app.rs, ui/) and uses this crate like any other caller.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod generator;
pub mod logging;
pub mod session;
pub mod store;

#[cfg(test)]
mod testutil;
