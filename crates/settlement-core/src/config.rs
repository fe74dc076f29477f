//! Configuration loading for the settlement service.
//!
//! The configuration lives in `settlement-config.yaml`. Every field has a
//! default, so an empty file (or no file at all, via
//! [`SettlementConfig::default`]) is a valid configuration.
//!
//! ```yaml
//! storage:
//!   data_dir: "data"
//!   settlements_file: "settlements.json"
//!   districts_file: "districts.json"
//!   spears_file: "spears.json"
//! logging:
//!   level: "info"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use settlement_store::{
    DEFAULT_DISTRICTS_FILE, DEFAULT_SETTLEMENTS_FILE, DEFAULT_SPEARS_FILE, JsonFileRepository,
};

/// Environment variable overriding `storage.data_dir`.
pub const DATA_DIR_ENV: &str = "SETTLEMENT_DATA_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettlementConfig {
    /// Where the JSON collections live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SettlementConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SETTLEMENT_DATA_DIR` overrides `storage.data_dir` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.storage.apply_env_overrides();
        Ok(config)
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the collection files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the settlement collection.
    #[serde(default = "default_settlements_file")]
    pub settlements_file: String,

    /// File name of the blueprint catalog.
    #[serde(default = "default_districts_file")]
    pub districts_file: String,

    /// File name of the spear collection.
    #[serde(default = "default_spears_file")]
    pub spears_file: String,
}

impl StorageConfig {
    /// Override the data directory with `SETTLEMENT_DATA_DIR` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(val);
        }
    }

    /// A file repository over the configured paths.
    pub fn repository(&self) -> JsonFileRepository {
        JsonFileRepository::with_file_names(
            &self.data_dir,
            &self.settlements_file,
            &self.districts_file,
            &self.spears_file,
        )
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            settlements_file: default_settlements_file(),
            districts_file: default_districts_file(),
            spears_file: default_spears_file(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_settlements_file() -> String {
    DEFAULT_SETTLEMENTS_FILE.to_owned()
}

fn default_districts_file() -> String {
    DEFAULT_DISTRICTS_FILE.to_owned()
}

fn default_spears_file() -> String {
    DEFAULT_SPEARS_FILE.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}
