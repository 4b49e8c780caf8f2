pub mod context;
pub mod reveal;

pub use context::SessionContext;
pub use reveal::RevealTracker;
