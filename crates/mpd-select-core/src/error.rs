//! Error types for MPD Select Core

use thiserror::Error;

/// Result type alias for selection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type produced by a [`SegmentResolver`](crate::SegmentResolver)
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

/// Selection error types
#[derive(Error, Debug)]
pub enum Error {
    // Manifest errors
    #[error("Failed to parse manifest: {0}")]
    ManifestParse(String),

    // Selection errors
    #[error("Bandwidth {bandwidth} is not offered by {role}-{mime_type} (available: {available:?})")]
    InvalidBandwidthSelection {
        role: String,
        mime_type: String,
        bandwidth: u64,
        available: Vec<u64>,
    },

    // Resolver errors
    #[error("Resolver failed: {0}")]
    ResolverFailure(#[source] ResolverError),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error raised by the external resolver
    pub fn resolver(err: impl Into<ResolverError>) -> Self {
        Error::ResolverFailure(err.into())
    }

    /// Returns true if the caller can fix this by choosing differently
    pub fn is_selection_error(&self) -> bool {
        matches!(self, Error::InvalidBandwidthSelection { .. })
    }

    /// Returns the error code for reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::ManifestParse(_) => "MANIFEST_PARSE",
            Error::InvalidBandwidthSelection { .. } => "INVALID_BANDWIDTH",
            Error::ResolverFailure(_) => "RESOLVER_FAILURE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO",
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::ManifestParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::ManifestParse(err.to_string())
    }
}
