//! Selection keys and the resolver seam
//!
//! The resolver turns a [`SelectionKey`] into a media URL. It owns all
//! period and segment-template logic; this crate only guarantees the
//! argument order `(document, position, mime_type, role, bandwidth)` and
//! hands back whatever string it returns, untouched.

use crate::{error::ResolverError, manifest::ManifestDocument, Error, Result};
use serde::Serialize;
use tracing::{debug, instrument};

/// Inputs that determine a single media URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionKey {
    /// Playback position
    pub position: u64,
    pub mime_type: String,
    pub role: String,
    /// Representation bandwidth in bits per second
    pub bandwidth: u64,
}

/// Build the key for one resolution request
pub fn build_key(position: u64, role: &str, mime_type: &str, bandwidth: u64) -> SelectionKey {
    SelectionKey {
        position,
        mime_type: mime_type.to_string(),
        role: role.to_string(),
        bandwidth,
    }
}

/// External media URL resolver
pub trait SegmentResolver {
    fn resolve(
        &self,
        document: &ManifestDocument,
        position: u64,
        mime_type: &str,
        role: &str,
        bandwidth: u64,
    ) -> std::result::Result<String, ResolverError>;
}

impl<F> SegmentResolver for F
where
    F: Fn(&ManifestDocument, u64, &str, &str, u64) -> std::result::Result<String, ResolverError>,
{
    fn resolve(
        &self,
        document: &ManifestDocument,
        position: u64,
        mime_type: &str,
        role: &str,
        bandwidth: u64,
    ) -> std::result::Result<String, ResolverError> {
        self(document, position, mime_type, role, bandwidth)
    }
}

impl SelectionKey {
    /// Fail with `InvalidBandwidthSelection` unless `available` contains the key's bandwidth
    pub fn check_bandwidth(&self, available: &[u64]) -> Result<()> {
        if available.contains(&self.bandwidth) {
            return Ok(());
        }
        Err(Error::InvalidBandwidthSelection {
            role: self.role.clone(),
            mime_type: self.mime_type.clone(),
            bandwidth: self.bandwidth,
            available: available.to_vec(),
        })
    }

    /// Hand the key to `resolver`. Resolver errors come back as `ResolverFailure`.
    #[instrument(
        skip_all,
        fields(position = self.position, role = %self.role, mime_type = %self.mime_type, bandwidth = self.bandwidth)
    )]
    pub fn forward<R>(&self, document: &ManifestDocument, resolver: &R) -> Result<String>
    where
        R: SegmentResolver + ?Sized,
    {
        let url = resolver
            .resolve(document, self.position, &self.mime_type, &self.role, self.bandwidth)
            .map_err(Error::ResolverFailure)?;
        debug!(url = %url, "Resolved media URL");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Element;

    fn empty_doc() -> ManifestDocument {
        ManifestDocument::new(Element::new("MPD"))
    }

    #[test]
    fn test_build_key() {
        let key = build_key(30, "main", "video/mp4", 500_000);
        assert_eq!(
            key,
            SelectionKey {
                position: 30,
                mime_type: "video/mp4".to_string(),
                role: "main".to_string(),
                bandwidth: 500_000,
            }
        );
    }

    #[test]
    fn test_forward_argument_order_and_verbatim_url() {
        let resolver = |_: &ManifestDocument, position: u64, mime: &str, role: &str, bw: u64| {
            Ok::<_, ResolverError>(format!("{}|{}|{}|{}", position, mime, role, bw))
        };
        let url = build_key(12, "alternate", "audio/mp4", 128_000)
            .forward(&empty_doc(), &resolver)
            .unwrap();
        assert_eq!(url, "12|audio/mp4|alternate|128000");
    }

    #[test]
    fn test_forward_returns_empty_url_untouched() {
        let resolver =
            |_: &ManifestDocument, _: u64, _: &str, _: &str, _: u64| Ok::<_, ResolverError>(String::new());
        let url = build_key(0, "main", "video/mp4", 1).forward(&empty_doc(), &resolver).unwrap();
        assert_eq!(url, "");
    }

    #[test]
    fn test_forward_propagates_resolver_failure() {
        let resolver = |_: &ManifestDocument, _: u64, _: &str, _: &str, _: u64| {
            Err::<String, ResolverError>("no SegmentTemplate".into())
        };
        let err = build_key(0, "main", "video/mp4", 1)
            .forward(&empty_doc(), &resolver)
            .unwrap_err();
        match err {
            Error::ResolverFailure(source) => assert_eq!(source.to_string(), "no SegmentTemplate"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_bandwidth() {
        let key = build_key(0, "main", "video/mp4", 750_000);
        assert!(key.check_bandwidth(&[500_000, 750_000]).is_ok());

        match key.check_bandwidth(&[500_000]) {
            Err(Error::InvalidBandwidthSelection { bandwidth, available, .. }) => {
                assert_eq!(bandwidth, 750_000);
                assert_eq!(available, [500_000]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_key_serializes() {
        let json = serde_json::to_value(build_key(30, "main", "video/mp4", 500_000)).unwrap();
        assert_eq!(json["position"], 30);
        assert_eq!(json["mime_type"], "video/mp4");
        assert_eq!(json["role"], "main");
        assert_eq!(json["bandwidth"], 500_000);
    }
}
