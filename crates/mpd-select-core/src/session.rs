//! Selection Session - one manifest, one configuration
//!
//! Ties the three selection steps together over a borrowed document:
//! - Category listing
//! - Bandwidth listing for a chosen category
//! - Key building and forwarding to the resolver
//!
//! Nothing is cached between calls, so a session can be shared freely
//! across threads and dropped whenever the manifest is replaced.

use crate::{
    category::{Category, CategoryIndexer},
    config::SelectionConfig,
    manifest::ManifestDocument,
    selection::{build_key, SegmentResolver, SelectionKey},
    variant::VariantIndexer,
    Result,
};
use tracing::{info, instrument, warn};

/// Selection over a single manifest
#[derive(Debug, Clone)]
pub struct SelectionSession<'a> {
    document: &'a ManifestDocument,
    config: SelectionConfig,
    categories: CategoryIndexer,
    variants: VariantIndexer,
}

impl<'a> SelectionSession<'a> {
    /// Create a session with the default configuration
    pub fn new(document: &'a ManifestDocument) -> Self {
        Self::build(document, SelectionConfig::default())
    }

    /// Create a session with a custom configuration
    pub fn with_config(document: &'a ManifestDocument, config: SelectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(document, config))
    }

    fn build(document: &'a ManifestDocument, config: SelectionConfig) -> Self {
        Self {
            document,
            categories: CategoryIndexer::new(&config),
            variants: VariantIndexer::new(&config),
            config,
        }
    }

    pub fn document(&self) -> &'a ManifestDocument {
        self.document
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<Category> {
        self.categories.list(self.document)
    }

    /// Bandwidths offered by `category`
    pub fn bandwidths(&self, category: &Category) -> Vec<u64> {
        self.variants.list_for(self.document, category)
    }

    /// Bandwidths offered by the `(role, mime_type)` pair
    pub fn bandwidths_for(&self, role: &str, mime_type: &str) -> Vec<u64> {
        self.variants.list(self.document, role, mime_type)
    }

    /// Build the selection key, rejecting bandwidths the category does not
    /// offer when `validate_bandwidth` is on
    pub fn key(&self, position: u64, role: &str, mime_type: &str, bandwidth: u64) -> Result<SelectionKey> {
        let key = build_key(position, role, mime_type, bandwidth);
        if self.config.validate_bandwidth {
            let available = self.bandwidths_for(role, mime_type);
            if let Err(err) = key.check_bandwidth(&available) {
                warn!(role, mime_type, bandwidth, "Rejected bandwidth selection");
                return Err(err);
            }
        }
        Ok(key)
    }

    /// Resolve the media URL for a selection
    #[instrument(skip(self, resolver))]
    pub fn resolve<R>(
        &self,
        position: u64,
        role: &str,
        mime_type: &str,
        bandwidth: u64,
        resolver: &R,
    ) -> Result<String>
    where
        R: SegmentResolver + ?Sized,
    {
        let key = self.key(position, role, mime_type, bandwidth)?;
        let url = key.forward(self.document, resolver)?;
        info!(url = %url, "Media URL resolved");
        Ok(url)
    }
}

/// Resolve a media URL with the default configuration
pub fn resolve_media_url<R>(
    document: &ManifestDocument,
    position: u64,
    role: &str,
    mime_type: &str,
    bandwidth: u64,
    resolver: &R,
) -> Result<String>
where
    R: SegmentResolver + ?Sized,
{
    SelectionSession::new(document).resolve(position, role, mime_type, bandwidth, resolver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::BandwidthOrder, error::ResolverError, manifest::Element, Error};
    use std::cell::Cell;

    fn manifest() -> ManifestDocument {
        ManifestDocument::new(
            Element::new("MPD").with_child(
                Element::new("Period")
                    .with_child(
                        Element::new("AdaptationSet")
                            .with_attribute("mimeType", "video/mp4")
                            .with_child(Element::new("Representation").with_attribute("bandwidth", "1000000"))
                            .with_child(Element::new("Representation").with_attribute("bandwidth", "500000")),
                    )
                    .with_child(
                        Element::new("AdaptationSet")
                            .with_attribute("mimeType", "audio/mp4")
                            .with_child(Element::new("Role").with_attribute("value", "alternate"))
                            .with_child(Element::new("Representation").with_attribute("bandwidth", "128000")),
                    ),
            ),
        )
    }

    fn echo(_: &ManifestDocument, position: u64, mime: &str, role: &str, bw: u64) -> std::result::Result<String, ResolverError> {
        Ok(format!("{}/{}/{}/{}", role, mime, bw, position))
    }

    #[test]
    fn test_session_walkthrough() {
        let doc = manifest();
        let session = SelectionSession::new(&doc);

        let categories = session.categories();
        assert_eq!(categories.len(), 2);
        assert_eq!(session.bandwidths(&categories[0]), [500_000, 1_000_000]);
        assert_eq!(session.bandwidths(&categories[1]), [128_000]);

        let url = session.resolve(8, "alternate", "audio/mp4", 128_000, &echo).unwrap();
        assert_eq!(url, "alternate/audio/mp4/128000/8");
    }

    #[test]
    fn test_invalid_bandwidth_never_reaches_resolver() {
        let doc = manifest();
        let calls = Cell::new(0);
        let counting = |d: &ManifestDocument, p: u64, m: &str, r: &str, b: u64| {
            calls.set(calls.get() + 1);
            echo(d, p, m, r, b)
        };

        let err = resolve_media_url(&doc, 0, "main", "video/mp4", 128_000, &counting).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_BANDWIDTH");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let doc = manifest();
        let config = SelectionConfig {
            validate_bandwidth: false,
            ..Default::default()
        };
        let session = SelectionSession::with_config(&doc, config).unwrap();
        let url = session.resolve(0, "main", "video/mp4", 42, &echo).unwrap();
        assert_eq!(url, "main/video/mp4/42/0");
    }

    #[test]
    fn test_unknown_category_is_invalid_selection() {
        let doc = manifest();
        let err = SelectionSession::new(&doc)
            .key(0, "main", "text/vtt", 1000)
            .unwrap_err();
        match err {
            Error::InvalidBandwidthSelection { available, .. } => assert!(available.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_with_config_validates() {
        let doc = manifest();
        let config = SelectionConfig {
            default_role: String::new(),
            bandwidth_order: BandwidthOrder::FirstSeen,
            validate_bandwidth: true,
        };
        assert!(matches!(
            SelectionSession::with_config(&doc, config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_first_seen_session() {
        let doc = manifest();
        let config = SelectionConfig {
            bandwidth_order: BandwidthOrder::FirstSeen,
            ..Default::default()
        };
        let session = SelectionSession::with_config(&doc, config).unwrap();
        assert_eq!(session.bandwidths_for("main", "video/mp4"), [1_000_000, 500_000]);
    }
}
