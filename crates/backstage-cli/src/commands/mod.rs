//! Subcommand implementations.

pub mod check;
pub mod routes;
pub mod serve;
pub mod validate;

use anyhow::{Context, Result};
use backstage_core::BackstageConfig;
use std::path::Path;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "backstage.yaml";

/// Load configuration.
///
/// An explicit path must exist. Without one, `backstage.yaml` in the working
/// directory is used when present, and the built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<BackstageConfig> {
    match path {
        Some(path) => BackstageConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                BackstageConfig::from_file(default)
                    .with_context(|| format!("Failed to load config from {DEFAULT_CONFIG_FILE}"))
            } else {
                tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                Ok(BackstageConfig::default())
            }
        }
    }
}
