//! Workspace path management
//!
//! A provider persists everything it fetches under the workspace's input
//! root. The workspace itself is owned by the embedding application; this
//! handle only computes paths, it never creates or deletes directories.

use std::path::{Path, PathBuf};

/// Handle to the on-disk workspace a feed provider operates in
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace handle rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the workspace
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory where fetched feed files are persisted
    pub fn input_path(&self) -> PathBuf {
        self.root.join("input")
    }
}
