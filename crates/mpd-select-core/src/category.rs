//! Content categories
//!
//! A category is the `(role, mimeType)` pair of an AdaptationSet. Its
//! identity is rendered as `role-mimeType` for display and deduplication
//! only; the pair itself is what flows downstream, since either half may
//! contain a hyphen.

use crate::{
    config::{SelectionConfig, DEFAULT_ROLE},
    manifest::{Element, ManifestDocument, ROLE},
};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// A distinct (role, mimeType) pair offered by a manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    role: String,
    mime_type: String,
    identity: String,
}

impl Category {
    pub fn new(role: impl Into<String>, mime_type: impl Into<String>) -> Self {
        let role = role.into();
        let mime_type = mime_type.into();
        let identity = format!("{}-{}", role, mime_type);
        Self {
            role,
            mime_type,
            identity,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// `role-mimeType`. Not reversible.
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity)
    }
}

/// Derive `(role, mimeType)` for an AdaptationSet.
///
/// The role is the `value` of the first `Role` child, or `default_role` when
/// the set has no `Role` child. Returns `None` for a set missing its
/// `mimeType` attribute or carrying a `Role` without a `value`; such sets are
/// left out of every index.
pub fn content_type_of<'a>(group: &'a Element, default_role: &'a str) -> Option<(&'a str, &'a str)> {
    let Some(mime_type) = group.attribute("mimeType") else {
        debug!(id = group.attribute("id"), "Skipping AdaptationSet without mimeType");
        return None;
    };

    let role = match group.child(ROLE) {
        Some(role) => match role.attribute("value") {
            Some(value) => value,
            None => {
                debug!(mime_type, "Skipping AdaptationSet with valueless Role");
                return None;
            }
        },
        None => default_role,
    };

    Some((role, mime_type))
}

/// Enumerates the categories of a manifest
#[derive(Debug, Clone)]
pub struct CategoryIndexer {
    default_role: String,
}

impl CategoryIndexer {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            default_role: config.default_role.clone(),
        }
    }

    /// Distinct categories in order of first appearance
    #[instrument(skip_all)]
    pub fn list(&self, document: &ManifestDocument) -> Vec<Category> {
        let mut seen: IndexMap<String, Category> = IndexMap::new();

        for group in document.adaptation_sets() {
            let Some((role, mime_type)) = content_type_of(group, &self.default_role) else {
                continue;
            };
            let category = Category::new(role, mime_type);
            seen.entry(category.identity.clone()).or_insert(category);
        }

        debug!(count = seen.len(), "Indexed categories");
        seen.into_values().collect()
    }
}

impl Default for CategoryIndexer {
    fn default() -> Self {
        Self {
            default_role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// List the categories of `document` with the default configuration
pub fn list_categories(document: &ManifestDocument) -> Vec<Category> {
    CategoryIndexer::default().list(document)
}
