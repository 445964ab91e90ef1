//! Local backend implementation.
//!
//! Runs queries in-process against a shared, read-only [`Catalog`].

use std::sync::Arc;

use async_trait::async_trait;
use folio_config::CatalogConfig;
use folio_core::{Catalog, CatalogOptions, Project, QueryError, QueryRequest, QueryResult};
use tracing::{debug, info};

use crate::error::BackendError;
use crate::traits::Backend;

/// Local backend over an injected catalog.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    catalog: Arc<Catalog>,
}

impl LocalBackend {
    /// Create a local backend over a shared catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Load the catalog described by `config` and wrap it.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, BackendError> {
        Ok(Self::new(Arc::new(Self::load_catalog(config)?)))
    }

    /// Load the configured catalog file, or the built-in sample when no path is set.
    pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, BackendError> {
        let options = CatalogOptions {
            strict_slugs: config.strict_slugs,
        };

        let catalog = match config.path {
            Some(ref path) => Catalog::load(path, options)?,
            None => {
                info!("No catalog path configured, using built-in sample catalog");
                Catalog::builtin()?
            }
        };

        Ok(catalog)
    }

    /// The shared catalog.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

#[async_trait]
impl Backend for LocalBackend {
    async fn list_projects(&self, request: &QueryRequest) -> Result<QueryResult, BackendError> {
        debug!(
            page = request.page,
            limit = request.limit,
            search = %request.search,
            category = %request.category,
            "Local query"
        );
        Ok(self.catalog.query(request)?)
    }

    async fn list_categories(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.catalog.categories())
    }

    async fn get_project(&self, slug: &str) -> Result<Option<Project>, BackendError> {
        if slug.trim().is_empty() {
            return Err(QueryError::invalid_argument("Project slug is required").into());
        }
        Ok(self.catalog.find_by_slug(slug).cloned())
    }

    async fn health_check(&self) -> Result<bool, BackendError> {
        Ok(true)
    }

    fn describe(&self) -> String {
        format!("local catalog ({} projects)", self.catalog.len())
    }
}
