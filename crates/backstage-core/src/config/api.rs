//! Storefront API connection configuration.

use serde::{Deserialize, Serialize};

/// Default environment variable consulted for the API base URL.
pub const DEFAULT_BASE_URL_ENV: &str = "BACKSTAGE_API_URL";

/// Configuration for the outbound REST client.
///
/// The base URL is resolved in this order:
/// 1. The environment variable named by `base_url_env`
/// 2. `base_url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storefront API, e.g. `https://api.example.com/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable that overrides `base_url` when set.
    #[serde(default = "default_base_url_env")]
    pub base_url_env: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_url_env: default_base_url_env(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Resolve the base URL, checking `base_url_env` first.
    ///
    /// Trailing slashes are stripped so paths can be joined with a leading `/`.
    pub fn resolve_base_url(&self) -> String {
        let url = self
            .base_url_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.base_url.clone());
        url.trim().trim_end_matches('/').to_string()
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_base_url_env() -> Option<String> {
    Some(DEFAULT_BASE_URL_ENV.to_string())
}

fn default_timeout() -> u64 {
    30
}
