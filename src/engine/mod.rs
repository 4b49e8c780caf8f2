pub mod filter;
pub mod groups;
pub mod subset;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sampling breadth for a generation event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Exhaustive traversal of the selection.
    #[default]
    Study,
    /// Bounded random samples.
    Test,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Study => "study",
            Mode::Test => "test",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Study => Mode::Test,
            Mode::Test => Mode::Study,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" => Ok(Mode::Study),
            "test" => Ok(Mode::Test),
            other => Err(format!("unknown mode {other:?} (expected study or test)")),
        }
    }
}
