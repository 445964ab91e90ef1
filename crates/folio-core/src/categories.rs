//! Category enumeration.

use std::collections::BTreeSet;

use crate::project::Project;

/// Every distinct tag across `projects`, sorted ascending.
///
/// Deduplication is exact: tags differing only in case are kept apart.
pub fn list_categories(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|p| p.category.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
