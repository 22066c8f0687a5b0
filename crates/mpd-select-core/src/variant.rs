//! Bandwidth variants of a category

use crate::{
    category::{content_type_of, Category},
    config::{BandwidthOrder, SelectionConfig, DEFAULT_ROLE},
    manifest::{Element, ManifestDocument, REPRESENTATION},
};
use indexmap::IndexSet;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Parse a Representation's `bandwidth` attribute.
///
/// Missing or non-numeric values yield `None`; the variant is then left out
/// of the index rather than reported.
pub fn parse_bandwidth(representation: &Element) -> Option<u64> {
    let raw = representation.attribute("bandwidth")?;
    match raw.trim().parse::<u64>() {
        Ok(bandwidth) => Some(bandwidth),
        Err(_) => {
            debug!(
                id = representation.attribute("id"),
                bandwidth = raw,
                "Skipping Representation with unparseable bandwidth"
            );
            None
        }
    }
}

/// Enumerates the bandwidths offered by one category
#[derive(Debug, Clone)]
pub struct VariantIndexer {
    default_role: String,
    order: BandwidthOrder,
}

impl VariantIndexer {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            default_role: config.default_role.clone(),
            order: config.bandwidth_order,
        }
    }

    /// Distinct bandwidths across every AdaptationSet whose derived
    /// `(role, mimeType)` equals the given pair
    #[instrument(skip(self, document))]
    pub fn list(&self, document: &ManifestDocument, role: &str, mime_type: &str) -> Vec<u64> {
        let bandwidths = document
            .adaptation_sets()
            .filter(|group| content_type_of(group, &self.default_role) == Some((role, mime_type)))
            .flat_map(|group| group.children_named(REPRESENTATION))
            .filter_map(parse_bandwidth);

        let listed: Vec<u64> = match self.order {
            BandwidthOrder::Ascending => bandwidths.collect::<BTreeSet<_>>().into_iter().collect(),
            BandwidthOrder::FirstSeen => bandwidths.collect::<IndexSet<_>>().into_iter().collect(),
        };

        if listed.is_empty() {
            debug!("Category has no usable bandwidths");
        }
        listed
    }

    /// Same as [`list`](Self::list) for an indexed category
    pub fn list_for(&self, document: &ManifestDocument, category: &Category) -> Vec<u64> {
        self.list(document, category.role(), category.mime_type())
    }
}

impl Default for VariantIndexer {
    fn default() -> Self {
        Self {
            default_role: DEFAULT_ROLE.to_string(),
            order: BandwidthOrder::default(),
        }
    }
}

/// List the bandwidths of `(role, mime_type)` with the default configuration
pub fn list_bandwidths(document: &ManifestDocument, role: &str, mime_type: &str) -> Vec<u64> {
    VariantIndexer::default().list(document, role, mime_type)
}
