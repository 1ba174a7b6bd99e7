//! Dashboard configuration.
//!
//! This module defines configuration for the admin dashboard web UI.

use serde::{Deserialize, Serialize};

/// Configuration for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Host to bind the dashboard to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Session cookie configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Session cookie settings.
///
/// The dashboard never inspects the token inside the cookie; it only checks
/// that the cookie is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Name of the cookie holding the auth token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Cookie lifetime in seconds.
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age_seconds: u64,

    /// Mark the cookie `Secure` (enable behind HTTPS).
    #[serde(default)]
    pub secure_cookie: bool,

    /// Where unauthenticated requests are sent.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_max_age_seconds: default_cookie_max_age(),
            secure_cookie: false,
            login_path: default_login_path(),
        }
    }
}

impl DashboardConfig {
    /// Socket address string for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cookie_name() -> String {
    "auth_token".to_string()
}

fn default_cookie_max_age() -> u64 {
    86_400
}

fn default_login_path() -> String {
    "/login".to_string()
}
