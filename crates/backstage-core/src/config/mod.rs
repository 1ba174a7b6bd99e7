//! Configuration types for Backstage.
//!
//! Configuration is loaded from a single YAML file (`backstage.yaml` by
//! convention). Every section is optional; missing fields fall back to the
//! defaults documented on each type.
//!
//! ```yaml
//! api:
//!   base_url: http://localhost:5000/api
//!   base_url_env: BACKSTAGE_API_URL
//! dashboard:
//!   port: 8080
//!   auth:
//!     cookie_name: auth_token
//!     login_path: /login
//! ```

pub mod api;
pub mod dashboard;

use crate::routes::Route;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use api::ApiConfig;
pub use dashboard::{AuthConfig, DashboardConfig};

/// Complete Backstage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackstageConfig {
    /// Storefront API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard web server.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BackstageConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    ///
    /// An empty document yields the default configuration.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Config("api.base_url must not be empty".into()));
        }
        if self.dashboard.auth.cookie_name.trim().is_empty() {
            return Err(ConfigError::Config(
                "dashboard.auth.cookie_name must not be empty".into(),
            ));
        }
        if !self.dashboard.auth.login_path.starts_with('/') {
            return Err(ConfigError::Config(format!(
                "dashboard.auth.login_path must be absolute, got '{}'",
                self.dashboard.auth.login_path
            )));
        }
        let login_path = self.dashboard.auth.login_path.as_str();
        if login_path
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '?' | '#' | '{' | '}' | '*'))
        {
            return Err(ConfigError::Config(format!(
                "dashboard.auth.login_path must be a plain path, got '{login_path}'"
            )));
        }
        let taken = Route::ALL
            .iter()
            .filter(|route| **route != Route::Login)
            .map(|route| route.path())
            .chain(OTHER_PATHS)
            .any(|path| path == login_path);
        if taken {
            return Err(ConfigError::Config(format!(
                "dashboard.auth.login_path '{login_path}' is already a dashboard route"
            )));
        }
        Ok(())
    }
}

/// Dashboard paths that are not pages of their own.
const OTHER_PATHS: [&str; 4] = ["/logout", "/health", "/settings/profile", "/shop/new"];
