//! Lazy loader over persisted feed documents
//!
//! Walks the output directory recursively and parses every file as JSON,
//! skipping any file whose base name matches the manifest's filename. The
//! walk discovers files on disk directly — it does not cross-reference the
//! manifest, so files persisted by earlier runs are loaded too.
//!
//! Load failures are fatal, unlike fetch failures: a malformed or unreadable
//! file logs an error, yields `Err`, and the iterator fuses.

use serde_json::Value;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::config::ResolvedFeed;
use crate::error::{Error, Result};

/// Finite, non-restartable iterator of `(release, document)` pairs
pub struct DocumentLoader {
    release: String,
    namespace: String,
    index_filename: String,
    dirs: Vec<PathBuf>,
    files: VecDeque<PathBuf>,
    done: bool,
}

impl DocumentLoader {
    /// Build a loader over the feed's output directory
    pub fn new(feed: &ResolvedFeed) -> Self {
        Self {
            release: feed.release.clone(),
            namespace: feed.namespace.clone(),
            index_filename: feed.index_filename.clone(),
            dirs: vec![feed.output_dir.clone()],
            files: VecDeque::new(),
            done: false,
        }
    }

    /// Next data file in the walk, expanding directories depth-first.
    /// Unreadable directories are skipped, matching a walk that simply does
    /// not descend into them.
    fn next_file(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(file) = self.files.pop_front() {
                return Some(file);
            }
            let dir = self.dirs.pop()?;
            let entries = match std::fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(error) => {
                    tracing::debug!(dir = %dir.display(), error = %error, "skipping unreadable directory");
                    continue;
                }
            };
            for entry in entries.flatten() {
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                let path = entry.path();
                // Symlinked directories are not descended into, so a link
                // cycle under the output directory cannot loop the walk;
                // symlinks to regular files still load
                if file_type.is_dir() {
                    self.dirs.push(path);
                } else if (!file_type.is_symlink() || path.is_file()) && !self.is_index(&path) {
                    self.files.push_back(path);
                }
            }
        }
    }

    /// The index file is never a data document, at any depth
    fn is_index(&self, path: &Path) -> bool {
        path.file_name() == Some(std::ffi::OsStr::new(&self.index_filename))
    }

    fn load_file(path: &Path) -> Result<Value> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Iterator for DocumentLoader {
    type Item = Result<(String, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let path = self.next_file()?;
        tracing::info!(path = %path.display(), "reading feed document");
        match Self::load_file(&path) {
            Ok(document) => Some(Ok((self.release.clone(), document))),
            Err(error) => {
                self.done = true;
                tracing::error!(
                    namespace = %self.namespace,
                    path = %path.display(),
                    error = %error,
                    "failed to load feed document"
                );
                Some(Err(Error::DocumentLoad {
                    path,
                    source: Box::new(error),
                }))
            }
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::workspace::Workspace;
    use std::fs;
    use tempfile::TempDir;

    fn loader_for(temp_dir: &TempDir) -> DocumentLoader {
        let workspace = Workspace::new(temp_dir.path());
        let feed = ResolvedFeed::new(&workspace, &FeedConfig::default());
        DocumentLoader::new(&feed)
    }

    fn output_dir(temp_dir: &TempDir) -> PathBuf {
        temp_dir.path().join("input/vex")
    }

    #[test]
    fn yields_every_document_except_the_index() {
        let temp_dir = TempDir::new().unwrap();
        let dir = output_dir(&temp_dir);
        fs::create_dir_all(dir.join("pypi")).unwrap();
        fs::write(dir.join("all.json"), r#"{"entries": []}"#).unwrap();
        fs::write(dir.join("doc1.json"), r#"{"id": 1}"#).unwrap();
        fs::write(dir.join("pypi/doc2.json"), r#"{"id": 2}"#).unwrap();

        let docs: Vec<_> = loader_for(&temp_dir).map(|item| item.unwrap()).collect();
        assert_eq!(docs.len(), 2);
        for (release, _) in &docs {
            assert_eq!(release, "rolling");
        }
    }

    #[test]
    fn skips_index_filename_at_any_depth() {
        let temp_dir = TempDir::new().unwrap();
        let dir = output_dir(&temp_dir);
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("all.json"), "{}").unwrap();
        fs::write(dir.join("nested/all.json"), "{}").unwrap();
        fs::write(dir.join("nested/doc.json"), r#"{"id": 1}"#).unwrap();

        let docs: Vec<_> = loader_for(&temp_dir).collect();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn missing_output_dir_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(loader_for(&temp_dir).count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_cycle_does_not_loop_the_walk() {
        let temp_dir = TempDir::new().unwrap();
        let dir = output_dir(&temp_dir);
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("sub/doc.json"), r#"{"id": 1}"#).unwrap();
        // Link back up to the output root: following it would walk forever
        std::os::unix::fs::symlink(&dir, dir.join("sub/loop")).unwrap();

        let docs: Vec<_> = loader_for(&temp_dir).map(|item| item.unwrap()).collect();
        assert_eq!(docs.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_still_loads() {
        let temp_dir = TempDir::new().unwrap();
        let dir = output_dir(&temp_dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("doc.json"), r#"{"id": 1}"#).unwrap();
        std::os::unix::fs::symlink(dir.join("doc.json"), dir.join("alias.json")).unwrap();

        let docs: Vec<_> = loader_for(&temp_dir).map(|item| item.unwrap()).collect();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn malformed_document_is_fatal_and_fuses() {
        let temp_dir = TempDir::new().unwrap();
        let dir = output_dir(&temp_dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bad.json"), "not json at all").unwrap();

        let mut loader = loader_for(&temp_dir);
        let err = loader.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::DocumentLoad { .. }));
        assert!(loader.next().is_none());
    }

    #[test]
    fn documents_before_a_malformed_one_remain_yielded() {
        let temp_dir = TempDir::new().unwrap();
        let dir = output_dir(&temp_dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.json"), r#"{"id": 1}"#).unwrap();
        fs::write(dir.join("b.json"), "not json").unwrap();

        let items: Vec<_> = loader_for(&temp_dir).collect();
        // Walk order is filesystem-defined: the error terminates the
        // sequence, anything yielded before it stays yielded
        assert!(items.last().unwrap().is_err());
        assert!(items.len() <= 2);
        assert!(items.iter().filter(|item| item.is_err()).count() == 1);
    }
}
