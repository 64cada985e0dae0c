//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logging::DEFAULT_LOG_FILE;
use crate::migrate::DEFAULT_SIZE_THRESHOLD;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default source store
    pub source: Option<PathBuf>,

    /// Default destination store
    pub destination: Option<PathBuf>,

    /// Notes at or above this size (bytes) are cleared instead of migrated
    pub size_threshold: Option<usize>,

    /// Log file path
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/evermark/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("evermark")
            .join("config.toml")
    }

    /// Resolve the source store, CLI argument first.
    pub fn source(&self, cli_source: Option<&PathBuf>) -> Option<PathBuf> {
        cli_source.cloned().or_else(|| self.source.clone())
    }

    /// Resolve the destination store, CLI argument first.
    pub fn destination(&self, cli_dest: Option<&PathBuf>) -> Option<PathBuf> {
        cli_dest.cloned().or_else(|| self.destination.clone())
    }

    /// Resolve the size guard threshold.
    ///
    /// Precedence order:
    /// 1. CLI `--max-size` argument
    /// 2. Config file `size_threshold` setting
    /// 3. 50,000 bytes
    pub fn size_threshold(&self, cli_max: Option<usize>) -> usize {
        cli_max
            .or(self.size_threshold)
            .unwrap_or(DEFAULT_SIZE_THRESHOLD)
    }

    /// Resolve the log file.
    ///
    /// Precedence order:
    /// 1. CLI `--log-file` argument
    /// 2. Config file `log_file` setting
    /// 3. `evermark.log` next to `anchor` (the store being written or read)
    pub fn log_file(&self, cli_log: Option<&PathBuf>, anchor: Option<&Path>) -> PathBuf {
        cli_log
            .cloned()
            .or_else(|| self.log_file.clone())
            .unwrap_or_else(|| {
                anchor
                    .and_then(Path::parent)
                    .unwrap_or_else(|| Path::new(""))
                    .join(DEFAULT_LOG_FILE)
            })
    }

    /// Resolve the log level, a config value winning over `-v` flags.
    pub fn log_level(&self, verbose: u8) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| crate::logging::level_for_verbosity(verbose).to_string())
    }
}
