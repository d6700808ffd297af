use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::egui_app::storage::FileStore;
use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, FileConfig};

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "REVISEWISE_API_URL";
/// Environment variable overriding the storage file path
pub const STORAGE_ENV: &str = "REVISEWISE_STORAGE";

/// Client configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    /// Defaults, then the user's config file, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_file().as_deref(), |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with an explicit file and environment lookup.
    /// A missing file is not an error.
    pub fn load_from<F>(file: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(path) = file.filter(|p| p.exists()) {
            let source = std::fs::read_to_string(path)?;
            builder = builder.merge_file(FileConfig::from_toml_str(&source)?);
            tracing::info!(target: "revisewise::config", path = %path.display(), "loaded config file");
        }

        if let Some(url) = env(API_URL_ENV) {
            builder = builder.server_url(url);
        }
        if let Some(path) = env(STORAGE_ENV) {
            builder = builder.storage_path(path);
        }

        Self::with_builder(builder)
    }

    /// `<config dir>/revisewise/revisewise.toml`
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("revisewise").join("revisewise.toml"))
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.server_url(), path)
        } else {
            format!("{}/{}", self.server_url(), path)
        }
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn storage_path(&self) -> PathBuf {
        self.app
            .storage_path
            .clone()
            .unwrap_or_else(FileStore::default_path)
    }

    pub fn request_timeout(&self) -> Duration {
        self.app.request_timeout
    }

    pub fn login_timeout(&self) -> Duration {
        self.app.login_timeout
    }
}
