//! Read-only project catalog.
//!
//! A catalog is loaded once at startup and shared (usually behind an `Arc`)
//! for the rest of the process. It has no mutating methods.
//!
//! Two file formats are accepted:
//! - JSON: a top-level array of projects
//! - TOML (`.toml` extension): a `[[projects]]` array of tables

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::categories::list_categories;
use crate::error::{CatalogError, QueryError};
use crate::project::Project;
use crate::query::{query, QueryRequest, QueryResult};
use crate::slug::{find_by_slug, find_slug_collisions};

/// Sample catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/projects.json");

/// Catalog validation settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogOptions {
    /// Reject catalogs where two names share a slug (default: warn and keep first)
    pub strict_slugs: bool,
}

/// TOML catalog layout.
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Immutable, ordered sequence of projects.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Build a catalog from projects without validation.
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Build and validate a catalog.
    pub fn with_options(
        projects: Vec<Project>,
        options: CatalogOptions,
    ) -> Result<Self, CatalogError> {
        validate(&projects, options)?;
        Ok(Self { projects })
    }

    /// Decode a JSON array of projects.
    pub fn from_json_str(json: &str, options: CatalogOptions) -> Result<Self, CatalogError> {
        let projects: Vec<Project> = serde_json::from_str(json)?;
        Self::with_options(projects, options)
    }

    /// The sample catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG, CatalogOptions::default())
    }

    /// Load a catalog file, choosing the format from its extension.
    pub fn load(path: &Path, options: CatalogOptions) -> Result<Self, CatalogError> {
        debug!("Loading catalog from {:?}", path);
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::read_file(path, e))?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let projects = if is_toml {
            toml::from_str::<TomlCatalog>(&content)
                .map_err(|e| CatalogError::parse_toml(path, e))?
                .projects
        } else {
            serde_json::from_str::<Vec<Project>>(&content)
                .map_err(|e| CatalogError::parse_json(path, e))?
        };

        let catalog = Self::with_options(projects, options)?;
        info!(
            projects = catalog.len(),
            "Loaded catalog from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// All projects in catalog order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the catalog has no projects.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Filter and paginate. See [`crate::query::query`].
    pub fn query(&self, req: &QueryRequest) -> Result<QueryResult, QueryError> {
        query(&self.projects, req)
    }

    /// Look up a project by slug. See [`crate::slug::find_by_slug`].
    pub fn find_by_slug(&self, slug: &str) -> Option<&Project> {
        find_by_slug(&self.projects, slug)
    }

    /// Distinct sorted tags. See [`crate::categories::list_categories`].
    pub fn categories(&self) -> Vec<String> {
        list_categories(&self.projects)
    }
}

fn validate(projects: &[Project], options: CatalogOptions) -> Result<(), CatalogError> {
    if let Some(index) = projects.iter().position(|p| p.name.trim().is_empty()) {
        return Err(CatalogError::EmptyName { index });
    }

    for collision in find_slug_collisions(projects) {
        if options.strict_slugs {
            return Err(CatalogError::SlugCollision {
                slug: collision.slug,
                names: collision.names,
            });
        }
        warn!(
            slug = %collision.slug,
            "Projects share a slug, lookups return '{}': {}",
            collision.names[0],
            collision.names.join(", ")
        );
    }

    Ok(())
}
