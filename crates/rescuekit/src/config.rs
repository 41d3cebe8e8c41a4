//! Configuration management for rescuekit.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "rescuekit";

/// Default session database file name.
const SESSION_FILE_NAME: &str = "session.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RESCUEKIT_`)
/// 2. TOML config file at `~/.config/rescuekit/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identity API configuration.
    pub api: ApiConfig,
    /// Media upload configuration.
    pub media: MediaConfig,
    /// Session store configuration.
    pub session: SessionConfig,
    /// Search configuration.
    pub search: SearchConfig,
}

/// Identity API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the identity backend.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Media upload configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Base URL of the third-party media host.
    pub endpoint: String,
    /// Unsigned upload preset sent with every upload.
    pub upload_preset: String,
}

/// Session store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Path to the session database file.
    /// Defaults to `~/.local/share/rescuekit/session.db`
    pub database_path: Option<PathBuf>,
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Debounce interval before a query is scored, in milliseconds.
    pub debounce_ms: u64,
    /// Maximum number of results returned per query.
    pub max_results: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sosmientrung.org".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.cloudinary.com/v1_1/sosmt".to_string(),
            upload_preset: "rescuer_uploads".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            max_results: 50,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `RESCUEKIT_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("RESCUEKIT_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "api.base_url must not be empty".to_string(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "api.timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.media.endpoint.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "media.endpoint must not be empty".to_string(),
            });
        }

        if self.media.upload_preset.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "media.upload_preset must not be empty".to_string(),
            });
        }

        if self.search.debounce_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "search.debounce_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the session database path, resolving defaults if not set.
    #[must_use]
    pub fn session_database_path(&self) -> PathBuf {
        self.session
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(SESSION_FILE_NAME))
    }

    /// Get the API request timeout as a Duration.
    #[must_use]
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Get the search debounce interval as a Duration.
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}
