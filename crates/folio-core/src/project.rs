//! Project record.

use serde::{Deserialize, Serialize};

use crate::slug::to_slug;

/// A single portfolio entry.
///
/// Records are immutable once loaded into a [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Display asset (path or URL)
    pub image: String,

    /// Technology tags, in display order
    pub category: Vec<String>,

    /// Display name, also the slug source
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Live demo URL
    pub link: String,

    /// Source repository URL
    pub github: String,
}

impl Project {
    /// Create a project with the given name and tags; other fields are empty.
    pub fn new<I, S>(name: impl Into<String>, category: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            image: String::new(),
            category: category.into_iter().map(Into::into).collect(),
            name: name.into(),
            description: String::new(),
            link: String::new(),
            github: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the demo and repository links.
    pub fn with_links(mut self, link: impl Into<String>, github: impl Into<String>) -> Self {
        self.link = link.into();
        self.github = github.into();
        self
    }

    /// URL-safe identifier derived from the name.
    pub fn slug(&self) -> String {
        to_slug(&self.name)
    }

    /// Whether any tag equals `tag`, ignoring case.
    pub fn has_category(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.category.iter().any(|c| c.to_lowercase() == tag)
    }

    /// Whether the name, description or any tag contains `needle`.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .category
                .iter()
                .any(|c| c.to_lowercase().contains(needle))
    }
}
