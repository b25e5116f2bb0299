//! Configuration types for openvex-feed

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::workspace::Workspace;

/// Subdirectory of the workspace input root where feed files are persisted
const VEX_DIR: &str = "vex";

/// Feed configuration (construction surface)
///
/// Every field is defaulted, so `FeedConfig { namespace: "...".into(),
/// ..Default::default() }` is the typical construction. Values are
/// normalized, never validated: a malformed URL only surfaces later as a
/// fetch failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedConfig {
    /// URL of the feed index file (default: the Chainguard OpenVEX feed)
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Namespace label attached to log context and downstream identifiers
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Per-request download timeout in seconds (default: 125)
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    /// Prefix for feed-specific security reference URLs
    #[serde(default = "default_reference_url")]
    pub reference_url: String,

    /// Release label tagged onto every emitted record (default: "rolling")
    #[serde(default = "default_release")]
    pub release: String,
}

fn default_feed_url() -> String {
    "https://packages.cgr.dev/chainguard/vex/all.json".to_string()
}

fn default_namespace() -> String {
    "chainguard".to_string()
}

fn default_download_timeout_secs() -> u64 {
    125
}

fn default_reference_url() -> String {
    "https://images.chainguard.dev/security".to_string()
}

fn default_release() -> String {
    "rolling".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            namespace: default_namespace(),
            download_timeout_secs: default_download_timeout_secs(),
            reference_url: default_reference_url(),
            release: default_release(),
        }
    }
}

/// Values derived once from a [`FeedConfig`] and a [`Workspace`]
///
/// Construction cannot fail: URLs are normalized with string fallbacks
/// rather than rejected.
#[derive(Clone, Debug)]
pub struct ResolvedFeed {
    /// Namespace label for log context
    pub namespace: String,
    /// Release label for emitted records
    pub release: String,
    /// Normalized feed URL (trailing slashes trimmed)
    pub url: String,
    /// Feed URL resolved one path segment up; document filenames are
    /// appended to this to address sibling files
    pub base_url: String,
    /// Final path segment of the feed URL, typically `all.json`
    pub index_filename: String,
    /// Normalized reference-URL prefix (trailing slashes trimmed)
    pub reference_url: String,
    /// Directory where fetched files are persisted
    pub output_dir: PathBuf,
    /// Per-request download timeout
    pub download_timeout: Duration,
}

impl ResolvedFeed {
    /// Resolve a configuration against a workspace
    pub fn new(workspace: &Workspace, config: &FeedConfig) -> Self {
        let url = config.url.trim_end_matches('/').to_string();
        Self {
            namespace: config.namespace.clone(),
            release: config.release.clone(),
            base_url: resolve_base_url(&url),
            index_filename: extract_filename_from_url(&url),
            url,
            reference_url: config.reference_url.trim_end_matches('/').to_string(),
            output_dir: workspace.input_path().join(VEX_DIR),
            download_timeout: Duration::from_secs(config.download_timeout_secs),
        }
    }

    /// On-disk path of the persisted manifest file
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(&self.index_filename)
    }
}

/// Resolve a URL one path segment up, so sibling files can be addressed by
/// filename alone (`https://host/vex/all.json` -> `https://host/vex/`).
fn resolve_base_url(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url)
        && let Ok(base) = parsed.join(".")
    {
        return base.to_string();
    }
    // Not an absolute URL; keep everything up to and including the last slash
    match url.rfind('/') {
        Some(idx) => url[..=idx].to_string(),
        None => String::new(),
    }
}

/// Extract the final path segment of a URL, ignoring query and fragment
fn extract_filename_from_url(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url)
        && let Some(mut segments) = parsed.path_segments()
        && let Some(last) = segments.next_back()
        && !last.is_empty()
    {
        return last.to_string();
    }
    // Bare path fallback
    url.rsplit('/').next().unwrap_or(url).to_string()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn default_values() {
        let config = FeedConfig::default();
        assert_eq!(config.url, "https://packages.cgr.dev/chainguard/vex/all.json");
        assert_eq!(config.namespace, "chainguard");
        assert_eq!(config.download_timeout_secs, 125);
        assert_eq!(config.reference_url, "https://images.chainguard.dev/security");
        assert_eq!(config.release, "rolling");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: FeedConfig = serde_json::from_str(r#"{"namespace": "custom"}"#).unwrap();
        assert_eq!(config.namespace, "custom");
        assert_eq!(config.download_timeout_secs, 125);
        assert_eq!(config.release, "rolling");
    }

    #[test]
    fn resolves_default_feed() {
        let workspace = Workspace::new("/data/vex");
        let feed = ResolvedFeed::new(&workspace, &FeedConfig::default());
        assert_eq!(feed.base_url, "https://packages.cgr.dev/chainguard/vex/");
        assert_eq!(feed.index_filename, "all.json");
        assert_eq!(feed.output_dir, Path::new("/data/vex/input/vex"));
        assert_eq!(feed.index_path(), Path::new("/data/vex/input/vex/all.json"));
        assert_eq!(feed.download_timeout, Duration::from_secs(125));
    }

    #[test]
    fn resolves_custom_feed() {
        let workspace = Workspace::new("/tmp/ws");
        let config = FeedConfig {
            url: "https://custom.example.com/vex/index.json/".to_string(),
            namespace: "custom".to_string(),
            download_timeout_secs: 30,
            reference_url: "https://custom.security.com/".to_string(),
            ..Default::default()
        };
        let feed = ResolvedFeed::new(&workspace, &config);
        assert_eq!(feed.url, "https://custom.example.com/vex/index.json");
        assert_eq!(feed.reference_url, "https://custom.security.com");
        assert_eq!(feed.index_filename, "index.json");
        assert_eq!(feed.download_timeout, Duration::from_secs(30));
    }

    #[test]
    fn extracts_filename_from_url() {
        assert_eq!(
            extract_filename_from_url("https://example.com/path/file.json"),
            "file.json"
        );
        assert_eq!(
            extract_filename_from_url("https://example.com/file.json"),
            "file.json"
        );
        assert_eq!(extract_filename_from_url("/local/path/file.json"), "file.json");
    }

    #[test]
    fn resolves_base_one_segment_up() {
        assert_eq!(
            resolve_base_url("https://example.com/path/file.json"),
            "https://example.com/path/"
        );
        assert_eq!(
            resolve_base_url("https://example.com/file.json"),
            "https://example.com/"
        );
        assert_eq!(resolve_base_url("/local/path/file.json"), "/local/path/");
    }
}
