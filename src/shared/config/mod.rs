//! Application configuration module
//!
//! Provides configuration types for the application. Values come from
//! built-in defaults, an optional TOML file and the environment, merged
//! through [`AppConfigBuilder`].

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default API base address
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Default timeout for ordinary API calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed timeout for the login request
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API base URL, without trailing slash
    pub server_url: String,
    /// Location of the persistent key/value store. `None` selects the
    /// platform data directory.
    pub storage_path: Option<PathBuf>,
    /// Timeout applied to every request
    pub request_timeout: Duration,
    /// Timeout applied to the login request
    pub login_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            storage_path: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            login_timeout: DEFAULT_LOGIN_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.server_url.clone()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue("request_timeout"));
        }
        if self.login_timeout.is_zero() {
            return Err(ConfigError::InvalidValue("login_timeout"));
        }
        Ok(())
    }
}

/// On-disk configuration (`revisewise.toml`). Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub storage_path: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub login_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    storage_path: Option<PathBuf>,
    request_timeout: Option<Duration>,
    login_timeout: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the storage file path
    pub fn storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn login_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = Some(timeout);
        self
    }

    /// Apply values from a config file. Values already set on the builder
    /// are overwritten.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(url) = file.server_url {
            self.server_url = Some(url);
        }
        if let Some(path) = file.storage_path {
            self.storage_path = Some(path);
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = file.login_timeout_secs {
            self.login_timeout = Some(Duration::from_secs(secs));
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_url: self
                .server_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            storage_path: self.storage_path,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            login_timeout: self.login_timeout.unwrap_or(defaults.login_timeout),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
    #[error("cannot parse config file: {0}")]
    Parse(String),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = AppConfig::builder().build().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.login_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = AppConfig::builder()
            .server_url("https://revise.example.com/")
            .build()
            .unwrap();
        assert_eq!(config.server_url, "https://revise.example.com");
    }

    #[test]
    fn test_builder_rejects_bad_scheme() {
        let err = AppConfig::builder().server_url("localhost:8000").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let err = AppConfig::builder()
            .request_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("request_timeout")));
    }

    #[test]
    fn test_file_config_merge() {
        let file = FileConfig::from_toml_str(
            r#"
            server_url = "http://10.0.0.2:8000"
            login_timeout_secs = 5
            "#,
        )
        .unwrap();

        let config = AppConfig::builder()
            .server_url("http://ignored:1")
            .merge_file(file)
            .build()
            .unwrap();

        assert_eq!(config.server_url, "http://10.0.0.2:8000");
        assert_eq!(config.login_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_file_config_rejects_unknown_keys() {
        let err = FileConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
