//! Folio Backend - Query access to a project catalog, local or remote
//!
//! This crate provides a unified interface for:
//! - Paginated, filtered project listings
//! - Category enumeration
//! - Single-project lookup by slug
//! - A client-side query adapter that presentation layers bind to
//!
//! ## Backend Types
//!
//! - [`LocalBackend`]: Queries an in-process [`folio_core::Catalog`] directly
//! - [`RemoteBackend`]: HTTP client for a running Folio server
//!
//! ## Client Query Adapter
//!
//! [`ProjectsAdapter`] holds the active query and observable state
//! (projects, pagination, loading and error flags, categories), publishing
//! every change through a `tokio::sync::watch` channel.
//!
//! ## Example
//!
//! ```ignore
//! use folio_backend::{LocalBackend, PresentationMode, ProjectsAdapter};
//! use folio_core::Catalog;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = LocalBackend::new(Arc::new(Catalog::builtin()?));
//!     let adapter = ProjectsAdapter::new(Arc::new(backend), PresentationMode::Grid);
//!
//!     adapter.mount().await;
//!     adapter.search("react").await;
//!
//!     for project in adapter.snapshot().projects {
//!         println!("{}", project.name);
//!     }
//!     Ok(())
//! }
//! ```

mod adapter;
mod error;
mod local;
mod remote;
mod traits;

pub use adapter::{AdapterState, FetchOutcome, PresentationMode, ProjectsAdapter};
pub use error::BackendError;
pub use local::LocalBackend;
pub use remote::RemoteBackend;
pub use traits::Backend;

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
