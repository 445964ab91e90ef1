//! CLI command implementations
//!
//! This module contains all Folio CLI command implementations.

pub mod browse;
pub mod categories;
pub mod config;
pub mod list;
pub mod serve;
pub mod show;
pub mod slug;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use folio_backend::{Backend, LocalBackend, RemoteBackend};
use folio_config::{BackendType, ConfigLoader, FolioConfig};
use tracing::debug;

use crate::GlobalOptions;

/// Output format shared by the query commands.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

/// Directory whose `.folio/config.toml` is the local config.
pub fn config_root() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to get current directory")
}

/// Merge configuration: global → local → `--config` file → CLI overrides.
///
/// The result is not validated, so `folio config` can still inspect and
/// repair a configuration that other commands would reject.
pub fn read_config(global: &GlobalOptions) -> Result<FolioConfig> {
    let root = config_root()?;
    let mut loader = ConfigLoader::new();

    loader
        .load_with_file(
            &root,
            global.config.as_deref(),
            Some(&global.to_config_overrides()),
        )
        .context("Failed to load configuration")
}

/// Merge and validate configuration.
pub fn load_config(global: &GlobalOptions) -> Result<FolioConfig> {
    let config = read_config(global)?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Create the backend selected by configuration.
pub fn create_backend(config: &FolioConfig) -> Result<Arc<dyn Backend>> {
    let backend: Arc<dyn Backend> = match config.backend.backend_type {
        BackendType::Local => Arc::new(
            LocalBackend::from_config(&config.catalog).context("Failed to load catalog")?,
        ),
        BackendType::Remote => {
            let remote = config
                .backend
                .remote
                .as_ref()
                .context("backend.remote is not configured")?;
            Arc::new(RemoteBackend::from_config(remote).context("Failed to create backend")?)
        }
    };

    debug!("Using {}", backend.describe());
    Ok(backend)
}

/// Print an info message (respects quiet flag).
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message);
    }
}

/// Render tags as `[a, b, c]`.
pub fn format_tags(tags: &[String]) -> String {
    format!("[{}]", tags.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags() {
        assert_eq!(
            format_tags(&["Rust".to_string(), "CLI".to_string()]),
            "[Rust, CLI]"
        );
        assert_eq!(format_tags(&[]), "[]");
    }

    #[test]
    fn test_create_local_backend_from_default_config() {
        let backend = create_backend(&FolioConfig::default()).unwrap();
        assert!(backend.describe().starts_with("local catalog"));
    }

    #[test]
    fn test_create_remote_backend_requires_section() {
        let mut config = FolioConfig::default();
        config.backend.backend_type = BackendType::Remote;
        assert!(create_backend(&config).is_err());
    }
}
