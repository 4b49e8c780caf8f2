use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::Mode;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_mode")]
    pub default_mode: String,
    #[serde(default = "default_show_ayah_info")]
    pub show_ayah_info: bool,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_corpus_path() -> String {
    data_dir().join("master_quran.json").to_string_lossy().to_string()
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_mode() -> String {
    Mode::Study.as_str().to_string()
}
fn default_show_ayah_info() -> bool {
    false
}
fn default_log_filter() -> String {
    "info".to_string()
}

/// Per-user data directory shared by the store, the log file and the
/// default corpus location.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hifzdr")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            theme: default_theme(),
            default_mode: default_mode(),
            show_ayah_info: default_show_ayah_info(),
            seed: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_mode();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Writes the mode and ayah-info toggles into the config file at `path`.
    /// Other fields keep the values on disk, so CLI overrides never leak in.
    pub fn save_preferences(path: &Path, mode: Mode, show_ayah_info: bool) -> Result<()> {
        let mut config = Self::load_from(path)?;
        config.default_mode = mode.as_str().to_string();
        config.show_ayah_info = show_ayah_info;
        config.save_to(path)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hifzdr")
            .join("config.toml")
    }

    pub fn mode(&self) -> Mode {
        self.default_mode.parse().unwrap_or_default()
    }

    /// Resets an unrecognised mode string to Study.
    pub fn normalize_mode(&mut self) {
        self.default_mode = self.mode().as_str().to_string();
    }
}
