//! MPD Select Core - DASH manifest selection
//!
//! This crate turns a parsed MPEG-DASH MPD into the inputs of a media URL
//! resolver:
//! - Content category indexing (role + mimeType per AdaptationSet)
//! - Bandwidth variant indexing within a category
//! - Selection key building and forwarding to an external resolver
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Manifest   │──▶│   Category   │──▶│   Variant    │──▶│  Selection   │──▶ resolver
//! │   Document   │   │   Indexer    │   │   Indexer    │   │     Key      │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use mpd_select_core::{list_bandwidths, list_categories, resolve_media_url, ManifestDocument, ResolverError};
//!
//! let doc = ManifestDocument::parse(r#"
//!     <MPD><Period>
//!       <AdaptationSet mimeType="video/mp4">
//!         <Representation id="v1" bandwidth="500000"/>
//!       </AdaptationSet>
//!     </Period></MPD>"#).unwrap();
//!
//! let category = &list_categories(&doc)[0];
//! assert_eq!(category.identity(), "main-video/mp4");
//!
//! let bandwidths = list_bandwidths(&doc, category.role(), category.mime_type());
//! assert_eq!(bandwidths, [500000]);
//!
//! let resolver = |_: &ManifestDocument, position: u64, _: &str, _: &str, bandwidth: u64| {
//!     Ok::<_, ResolverError>(format!("v/{bandwidth}/{position}.m4s"))
//! };
//! let url = resolve_media_url(&doc, 30, "main", "video/mp4", 500000, &resolver).unwrap();
//! assert_eq!(url, "v/500000/30.m4s");
//! ```

pub mod category;
pub mod config;
pub mod error;
pub mod manifest;
pub mod selection;
pub mod session;
pub mod variant;

pub use category::{list_categories, Category, CategoryIndexer};
pub use config::{BandwidthOrder, SelectionConfig};
pub use error::{Error, ResolverError, Result};
pub use manifest::{Element, ManifestDocument};
pub use selection::{build_key, SegmentResolver, SelectionKey};
pub use session::{resolve_media_url, SelectionSession};
pub use variant::{list_bandwidths, VariantIndexer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version
pub fn init() {
    tracing::info!(version = VERSION, "MPD Select Core initialized");
}
