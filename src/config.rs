//! Configuration for the uifilter binary
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration.
//!
//! ```json
//! {
//!   "data_file": "./heroes.json",
//!   "default_sort_field": "id",
//!   "max_rows": 1000,
//!   "log_filter": "info,uifilter=debug",
//!   "log_format": "json"
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "UIFILTER_CONFIG_READ",
            ConfigError::Parse(_) => "UIFILTER_CONFIG_PARSE",
            ConfigError::Invalid(_) => "UIFILTER_CONFIG_INVALID",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Logging section, flattened into the top-level config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` overrides this when set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            log_format: LogFormat::Plain,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Hero dataset (JSON array); the built-in roster when absent
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Logical field used when a request has no sort fields
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,

    /// Largest page a request may ask for; 0 disables the check
    #[serde(default = "default_max_rows")]
    pub max_rows: u32,

    #[serde(flatten)]
    pub logging: LoggingConfig,
}

fn default_sort_field() -> String {
    "id".to_string()
}

fn default_max_rows() -> u32 {
    1000
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            default_sort_field: default_sort_field(),
            max_rows: default_max_rows(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Loads and validates configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_sort_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_sort_field must not be empty".to_string(),
            ));
        }

        EnvFilter::try_new(&self.logging.log_filter).map_err(|e| {
            ConfigError::Invalid(format!(
                "Invalid log_filter '{}': {}",
                self.logging.log_filter, e
            ))
        })?;

        Ok(())
    }

    /// Dataset path, resolved against the config file's directory
    pub fn data_path(&self, config_path: &Path) -> Option<PathBuf> {
        let data_file = self.data_file.as_ref()?;
        if data_file.is_absolute() {
            return Some(data_file.clone());
        }
        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(data_file))
    }
}
