/// Configuration file support
///
/// Every field is optional; command-line flags take precedence over the file,
/// and the file over the built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::pipeline::InputPaths;
use crate::error::{Result, SentimentError};

/// Contents of a JSON configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub tweets: Option<PathBuf>,
    pub prices: Option<PathBuf>,
    pub check: Option<bool>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Resolve input paths: explicit override, then this file, then defaults
    pub fn input_paths(&self, tweets: Option<PathBuf>, prices: Option<PathBuf>) -> InputPaths {
        let defaults = InputPaths::default();
        InputPaths {
            tweets: tweets.or_else(|| self.tweets.clone()).unwrap_or(defaults.tweets),
            prices: prices.or_else(|| self.prices.clone()).unwrap_or(defaults.prices),
        }
    }
}

/// Load configuration from file if provided
pub fn load_config(config_path: Option<&Path>) -> Result<FileConfig> {
    let path = match config_path {
        Some(path) => path,
        None => return Ok(FileConfig::default()),
    };

    let config_error = |reason: String| SentimentError::Config {
        path: path.to_path_buf(),
        reason,
    };

    let config_str = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    let config: FileConfig =
        serde_json::from_str(&config_str).map_err(|e| config_error(e.to_string()))?;

    Ok(config)
}
