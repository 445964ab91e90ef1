//! Serve command - Run the HTTP query service

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use folio_backend::LocalBackend;
use folio_config::FolioConfig;
use tracing::info;

use super::print_info;
use crate::GlobalOptions;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides server.bind)
    #[arg(long, short = 'b', env = "FOLIO_BIND")]
    bind: Option<String>,

    /// Per-request timeout in seconds (overrides server.request_timeout_secs)
    #[arg(long)]
    timeout: Option<u64>,
}

/// Execute the serve command
pub async fn execute(args: ServeArgs, global: GlobalOptions, mut config: FolioConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(timeout) = args.timeout {
        config.server.request_timeout_secs = Some(timeout);
    }
    config.validate().context("Invalid server configuration")?;

    let catalog = LocalBackend::load_catalog(&config.catalog).context("Failed to load catalog")?;
    info!(
        projects = catalog.len(),
        categories = catalog.categories().len(),
        "Catalog ready"
    );

    print_info(
        &format!("Serving {} projects on http://{}", catalog.len(), config.server.bind),
        global.quiet,
    );

    folio_server::serve(&config.server, Arc::new(catalog))
        .await
        .with_context(|| format!("Server on {} failed", config.server.bind))
}
