#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for vds
//!
//! Configuration is layered, lowest precedence first:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/vds/config.toml)
//! - Environment variables (`VDS_*`)
//! - CLI flags (applied by the binary)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use vds_errors::{ConfigError, Error};
use vds_types::OutputFormat;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
}

/// Feed store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// SQLite database holding encoded vulnerability descriptions
    pub database_path: Option<PathBuf>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            max_connections: default_max_connections(),
            cache_enabled: default_cache_enabled(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Json
}

fn default_max_connections() -> u32 {
    4
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_seconds() -> u64 {
    300 // 5 minutes
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("vds").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration from the default path, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the default file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an explicit path when given, otherwise use [`Config::load`]
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds a value that cannot
    /// be parsed into the expected type.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_from(|key| std::env::var(key).ok())
    }

    fn merge_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), Error> {
        if let Some(output) = lookup("VDS_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "VDS_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        if let Some(path) = lookup("VDS_FEED_PATH") {
            self.feed.database_path = Some(PathBuf::from(path));
        }

        if let Some(cache) = lookup("VDS_FEED_CACHE") {
            self.feed.cache_enabled = match cache.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "VDS_FEED_CACHE".to_string(),
                        value: cache,
                    }
                    .into())
                }
            };
        }

        if let Some(ttl) = lookup("VDS_FEED_CACHE_TTL") {
            self.feed.cache_ttl_seconds = ttl.parse().map_err(|_| ConfigError::InvalidValue {
                field: "VDS_FEED_CACHE_TTL".to_string(),
                value: ttl,
            })?;
        }

        if let Some(level) = lookup("VDS_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Feed database path, required by the SQLite-backed store
    ///
    /// # Errors
    ///
    /// Returns an error if no path was configured.
    pub fn feed_path(&self) -> Result<&Path, Error> {
        self.feed.database_path.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: "feed.database_path".to_string(),
            }
            .into()
        })
    }
}
