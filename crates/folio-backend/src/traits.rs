//! Backend trait definition.
//!
//! Defines the async interface for catalog queries.

use async_trait::async_trait;
use folio_core::{Project, QueryRequest, QueryResult};

use crate::error::BackendError;

/// Backend for catalog queries.
///
/// This trait defines the unified interface implemented by both local and remote backends.
/// All operations are async to support network-based backends.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Run a filtered, paginated listing.
    ///
    /// # Arguments
    /// * `request` - Page, page size, search text and category filter
    ///
    /// # Returns
    /// The page of projects in catalog order with pagination metadata.
    async fn list_projects(&self, request: &QueryRequest) -> Result<QueryResult, BackendError>;

    /// List every distinct category tag, sorted ascending.
    async fn list_categories(&self) -> Result<Vec<String>, BackendError>;

    /// Look up a single project by slug.
    ///
    /// # Returns
    /// `None` when no project's name slugifies to `slug`.
    async fn get_project(&self, slug: &str) -> Result<Option<Project>, BackendError>;

    /// Check if the backend is reachable and answering queries.
    async fn health_check(&self) -> Result<bool, BackendError>;

    /// Short description of where queries go (for logs and status output).
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe
    fn _assert_object_safe(_: &dyn Backend) {}
}
