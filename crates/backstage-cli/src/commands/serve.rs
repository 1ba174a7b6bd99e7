//! `backstage serve` command implementation.

use anyhow::{Context, Result};
use backstage_client::ApiClient;
use backstage_core::BackstageConfig;
use backstage_dashboard::{AppState, DashboardServer};
use std::path::Path;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_url: Option<String>,
}

impl Overrides {
    pub fn apply(self, config: &mut BackstageConfig) {
        if let Some(host) = self.host {
            config.dashboard.host = host;
        }
        if let Some(port) = self.port {
            config.dashboard.port = port;
        }
        if let Some(url) = self.api_url {
            // An explicit flag beats the environment variable too.
            config.api.base_url = url;
            config.api.base_url_env = None;
        }
    }
}

pub async fn run(config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let client = ApiClient::new(&config.api).context("Failed to build storefront API client")?;
    tracing::info!(api = %client.base_url(), "Using storefront API");

    let state = AppState::from_client(config.dashboard.clone(), client);
    let server = DashboardServer::new(config.dashboard, state);

    server
        .run(shutdown_signal())
        .await
        .context("Dashboard server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = BackstageConfig::default();
        Overrides {
            host: Some("0.0.0.0".into()),
            port: Some(3000),
            api_url: Some("https://shop.example.com/api".into()),
        }
        .apply(&mut config);

        assert_eq!(config.dashboard.listen_addr(), "0.0.0.0:3000");
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert!(config.api.base_url_env.is_none());
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = BackstageConfig::default();
        Overrides::default().apply(&mut config);

        assert_eq!(config.dashboard.port, 8080);
        assert_eq!(config.api.base_url_env.as_deref(), Some("BACKSTAGE_API_URL"));
    }
}
