//! Selection configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Role assigned to an AdaptationSet without a `Role` child
pub const DEFAULT_ROLE: &str = "main";

/// Ordering of the bandwidth values returned for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandwidthOrder {
    /// Ascending numeric order
    #[default]
    Ascending,
    /// Order of first appearance in the manifest
    FirstSeen,
}

/// Selection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Role used when an AdaptationSet carries no `Role` element
    pub default_role: String,
    /// Ordering of bandwidth listings
    pub bandwidth_order: BandwidthOrder,
    /// Reject bandwidths the category does not offer before calling the resolver
    pub validate_bandwidth: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_role: DEFAULT_ROLE.to_string(),
            bandwidth_order: BandwidthOrder::Ascending,
            validate_bandwidth: true,
        }
    }
}

impl SelectionConfig {
    /// Parse a JSON configuration document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_role.is_empty() {
            return Err(Error::InvalidConfig("default_role must not be empty".to_string()));
        }
        Ok(())
    }
}
