//! Folio Core - Project catalog, query engine and slug resolution
//!
//! This crate provides the pure, I/O-free heart of Folio:
//! - An immutable project catalog loaded once at startup
//! - Case-insensitive search and category filtering with pagination
//! - Slug derivation and lookup for single-project URLs
//! - Category enumeration
//! - Response envelopes shared by the HTTP service and its clients

pub mod api;
pub mod catalog;
pub mod categories;
pub mod error;
pub mod project;
pub mod query;
pub mod slug;

// Re-exports for convenience
pub use api::{CategoriesResponse, ErrorResponse, ProjectResponse, ProjectsResponse};
pub use catalog::{Catalog, CatalogOptions};
pub use categories::list_categories;
pub use error::{CatalogError, QueryError};
pub use project::Project;
pub use query::{
    query, PaginationMeta, QueryRequest, QueryResult, QueryUpdate, DEFAULT_LIMIT, DEFAULT_PAGE,
    MAX_LIMIT,
};
pub use slug::{find_by_slug, find_slug_collisions, slug_to_name, to_slug, SlugCollision};
