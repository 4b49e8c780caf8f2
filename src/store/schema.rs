use serde::{Deserialize, Serialize};

use crate::engine::filter::SavedRange;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangesData {
    pub schema_version: u32,
    #[serde(default)]
    pub ranges: Vec<SavedRange>,
}

impl Default for RangesData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ranges: Vec::new(),
        }
    }
}

impl RangesData {
    pub fn new(ranges: Vec<SavedRange>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ranges,
        }
    }

    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
