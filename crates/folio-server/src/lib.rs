//! Folio Server - HTTP query service over a read-only project catalog
//!
//! Exposes three read endpoints plus a liveness probe:
//!
//! - `GET /api/projects` - filtered, paginated listing
//! - `GET /api/projects/categories` - distinct sorted category tags
//! - `GET /api/projects/{slug}` - single project by slug
//! - `GET /health`
//!
//! Every response carries a JSON body; errors are `{"error": "..."}`.
//! Successful read responses carry a `Cache-Control` header whose
//! freshness windows come from `[server.cache]`.

pub mod error;
pub mod router;
pub mod routes;
pub mod state;

use std::sync::Arc;

use folio_config::ServerConfig;
use folio_core::Catalog;
use tokio::net::TcpListener;
use tracing::info;

// Re-exports
pub use error::ApiError;
pub use router::{app, with_layers};
pub use state::AppState;

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, catalog: Arc<Catalog>) -> std::io::Result<()> {
    let addr = config
        .bind_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let projects = catalog.len();
    let app = app(AppState::from_config(catalog, config));

    let listener = TcpListener::bind(addr).await?;
    info!(
        projects,
        "Folio server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
