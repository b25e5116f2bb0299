//! Error types for openvex-feed
//!
//! A single crate-level error enum covers both halves of the pipeline. Fetch
//! failures are normally reported through
//! [`FetchReport`](crate::fetch::FetchReport) rather than raised; load
//! failures are raised with the offending path attached.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for openvex-feed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for openvex-feed
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Remote returned a non-success HTTP status
    #[error("unexpected HTTP status {status} for {url}")]
    HttpStatus {
        /// Status code returned by the remote
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// A persisted feed document could not be read or parsed
    #[error("failed to load feed document {path}: {source}")]
    DocumentLoad {
        /// Path of the document that failed to load
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// True when the error is a file-not-found I/O error.
    ///
    /// This is the signal a caller sees when the manifest fetch silently
    /// failed and the subsequent manifest open hit the missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}
