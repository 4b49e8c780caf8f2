use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use crate::config;
use crate::engine::filter::SavedRange;
use crate::store::schema::RangesData;

const RANGES_FILE: &str = "ranges.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(config::data_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Write to a sibling .tmp file first so a crash never leaves a
    /// half-written file behind.
    fn save_json(&self, name: &str, json: &str) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Saved ranges, or an empty list when the file is missing, unreadable
    /// or from another schema version.
    pub fn load_ranges(&self) -> Vec<SavedRange> {
        let path = self.file_path(RANGES_FILE);
        if !path.exists() {
            return Vec::new();
        }
        let parsed = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(serde_json::from_str::<RangesData>(&content)?));
        match parsed {
            Ok(data) if !data.needs_reset() => data.ranges,
            Ok(data) => {
                warn!(version = data.schema_version, "discarding saved ranges from another schema");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "could not read saved ranges");
                Vec::new()
            }
        }
    }

    pub fn save_ranges(&self, ranges: &[SavedRange]) -> Result<()> {
        let data = RangesData::new(ranges.to_vec());
        let json = serde_json::to_string_pretty(&data)?;
        self.save_json(RANGES_FILE, &json)
    }

    pub fn log_path(&self) -> PathBuf {
        self.file_path("hifzdr.log")
    }
}
