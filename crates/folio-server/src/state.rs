//! Shared state for request handlers.

use std::sync::Arc;
use std::time::Duration;

use folio_config::{CacheConfig, ServerConfig};
use folio_core::Catalog;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The catalog being served
    pub catalog: Arc<Catalog>,

    /// Category list, computed once since the catalog never changes
    pub categories: Arc<Vec<String>>,

    /// Cache-Control windows per endpoint
    pub cache: CacheConfig,

    /// Optional per-request timeout
    pub request_timeout: Option<Duration>,
}

impl AppState {
    /// State with default cache windows and no timeout.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let categories = Arc::new(catalog.categories());
        Self {
            catalog,
            categories,
            cache: CacheConfig::default(),
            request_timeout: None,
        }
    }

    /// State configured from the `[server]` section.
    pub fn from_config(catalog: Arc<Catalog>, config: &ServerConfig) -> Self {
        Self {
            cache: config.cache,
            request_timeout: config.request_timeout_secs.map(Duration::from_secs),
            ..Self::new(catalog)
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
