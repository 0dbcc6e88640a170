//! Configuration management for Trendline.
//!
//! Configuration is read from `~/.config/trendline/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! `TRENDLINE_API_URL`, `TRENDLINE_CLIENT_ID` and `TRENDLINE_CLIENT_SECRET`
//! override the file.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ClientCredentials;

pub const ENV_API_URL: &str = "TRENDLINE_API_URL";
pub const ENV_CLIENT_ID: &str = "TRENDLINE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "TRENDLINE_CLIENT_SECRET";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

/// Remote service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/evaluation-service".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll interval in milliseconds (default: 100)
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl Config {
    /// Load configuration from the default path, then apply environment
    /// overrides.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            let mut config = Self::default();
            config.apply_env();
            return Ok(config);
        }

        let mut config = Self::load_from(&config_path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from an explicit path. No file is created and no
    /// environment overrides are applied.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/trendline/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("trendline").join("config.toml"))
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key/value lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(id) = lookup(ENV_CLIENT_ID) {
            self.api.client_id = id;
        }
        if let Some(secret) = lookup(ENV_CLIENT_SECRET) {
            self.api.client_secret = secret;
        }
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Trendline Configuration
#
# Credentials can also be supplied through the environment:
#   TRENDLINE_API_URL, TRENDLINE_CLIENT_ID, TRENDLINE_CLIENT_SECRET

[api]
# Base URL of the social service; endpoint paths are appended to it
base_url = "http://localhost:8080/evaluation-service"

# Client identity exchanged at /auth/token for a bearer token
client_id = ""
client_secret = ""

# Per-request timeout in seconds
timeout_secs = 10

[ui]
# How often the TUI polls for input, in milliseconds
tick_rate_ms = 100
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
