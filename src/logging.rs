//! Logging setup on top of `tracing` and `tracing-subscriber`.
//!
//! The terminal UI owns stdout, so interactive sessions log to a file in the
//! data directory, or in the temp dir when the data directory is unusable.
//! Only print mode logs to stderr.
//!
//! # Levels
//!
//! - `warn`: config or store fallbacks
//! - `info`: corpus loading, batch summaries
//! - `debug`: per-drill outcomes, including omitted drills

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directives; `RUST_LOG` wins when set.
    pub filter: String,
    /// Write to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(filter: &str) -> Self {
        Self {
            filter: filter.to_string(),
            log_file: None,
        }
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Where interactive sessions log when the store has no usable log path.
pub fn fallback_log_path() -> PathBuf {
    std::env::temp_dir().join("hifzdr.log")
}

/// Picks the log file. `None` means stderr, which only print mode gets.
pub fn log_target(store_log: Option<&Path>, print: bool) -> Option<PathBuf> {
    if print {
        return None;
    }
    Some(store_log.map_or_else(fallback_log_path, Path::to_path_buf))
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let filter = config.env_filter();
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(io::Error::other)
        }
        None => {
            let layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time();
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .map_err(io::Error::other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_created() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("hifzdr.log");
        let config = LogConfig::new("debug").with_log_file(Some(path.clone()));
        init_logging(&config).unwrap();
        assert!(path.exists());

        // Only one global subscriber per process.
        assert!(init_logging(&LogConfig::new("info")).is_err());
    }

    #[test]
    fn interactive_sessions_never_log_to_stderr() {
        let store_log = Path::new("/data/hifzdr/hifzdr.log");
        assert_eq!(
            log_target(Some(store_log), false),
            Some(store_log.to_path_buf())
        );
        assert_eq!(log_target(None, false), Some(fallback_log_path()));
    }

    #[test]
    fn print_mode_logs_to_stderr() {
        assert_eq!(log_target(Some(Path::new("/data/hifzdr.log")), true), None);
        assert_eq!(log_target(None, true), None);
    }
}
