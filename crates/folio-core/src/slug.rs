//! Slug derivation and lookup.
//!
//! A slug is the lower-cased project name with everything except ASCII
//! letters, digits and whitespace removed, and each whitespace run replaced
//! by a single `-`. The mapping is lossy: two names can share a slug, in
//! which case lookup returns the first project in catalog order.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::project::Project;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid slug character class"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Derive the URL slug for a project name.
///
/// ```
/// assert_eq!(folio_core::to_slug("Alpha One!"), "alpha-one");
/// ```
pub fn to_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, "-").into_owned()
}

/// Best-effort inverse of [`to_slug`]: hyphens become spaces.
///
/// Stripped punctuation and original casing cannot be recovered.
pub fn slug_to_name(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Find the first project whose slug matches `slug`, ignoring case.
pub fn find_by_slug<'a>(projects: &'a [Project], slug: &str) -> Option<&'a Project> {
    let wanted = slug.to_lowercase();
    projects.iter().find(|p| to_slug(&p.name) == wanted)
}

/// Names that collapse onto the same slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugCollision {
    /// Shared slug
    pub slug: String,

    /// Project names in catalog order; the first one wins lookups
    pub names: Vec<String>,
}

/// Report every slug shared by more than one project.
pub fn find_slug_collisions(projects: &[Project]) -> Vec<SlugCollision> {
    let mut by_slug: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for project in projects {
        by_slug
            .entry(to_slug(&project.name))
            .or_default()
            .push(project.name.clone());
    }

    by_slug
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(slug, names)| SlugCollision { slug, names })
        .collect()
}
