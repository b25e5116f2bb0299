//! Manifest (feed index) data model
//!
//! The manifest is the first file fetched in every run. Its wire format:
//!
//! ```json
//! {"entries": [{"filename": "pypi/foo.openvex.json", "modified": "2024-01-01T00:00:00Z"}]}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Index document enumerating every per-document file in a feed snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Ordered document entries; filenames are assumed unique, not checked
    pub entries: Vec<ManifestEntry>,
}

/// One document file listed in the manifest
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path of the document relative to the feed base URL; may contain
    /// subdirectory segments
    pub filename: String,
    /// Last modification time reported by the feed
    pub modified: DateTime<Utc>,
}

impl Manifest {
    /// Read and parse a persisted manifest file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file is absent — the externally visible
    /// signal that the manifest fetch itself failed — or a serialization
    /// error when the persisted file is not valid manifest JSON.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
