//! # openvex-feed
//!
//! Fetches a remote OpenVEX feed published as a manifest plus per-document
//! JSON files, persists the files under a workspace, and re-emits each
//! document tagged with a release label for downstream ingestion into a
//! vulnerability database.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or daemon, purely a Rust crate for embedding
//! - **Fail-soft fetching** - A missing document degrades the feed, never
//!   the run; outcomes are reported, not logged-and-lost
//! - **Strict phase order** - Fetch completes before loading starts; the
//!   load+normalize stage is a lazy stream
//! - **Narrow collaborator seams** - Transport, normalization, and generic
//!   reference links are traits with bundled defaults
//!
//! ## Quick Start
//!
//! ```no_run
//! use openvex_feed::{FeedConfig, OpenVexProvider, Workspace};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workspace = Workspace::new("/var/lib/feeds/chainguard");
//!     let config = FeedConfig {
//!         namespace: "chainguard".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let provider = OpenVexProvider::new(&workspace, &config)?;
//!     let run = provider.get().await?;
//!     if !run.report.is_complete() {
//!         eprintln!("{} documents failed to fetch", run.report.failed.len());
//!     }
//!     for batch in run {
//!         let (release, records) = batch?;
//!         println!("{release}: {} records", records.len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Streaming feed-file fetcher and fetch reporting
pub mod fetch;
/// Lazy loader over persisted feed documents
pub mod loader;
/// Manifest (feed index) data model
pub mod manifest;
/// Normalization of raw documents into release-tagged records
pub mod normalize;
/// Pipeline orchestration
pub mod provider;
/// Reference-link building
pub mod reference;
/// Workspace path management
pub mod workspace;

// Re-export commonly used types
pub use config::{FeedConfig, ResolvedFeed};
pub use error::{Error, Result};
pub use fetch::{DocumentFetcher, FetchFailure, FetchReport, HttpFetcher};
pub use loader::DocumentLoader;
pub use manifest::{Manifest, ManifestEntry};
pub use normalize::{NormalizedRecord, Normalizer, Passthrough};
pub use provider::{FeedRun, OpenVexProvider};
pub use reference::{ReferenceSource, StandardReferenceSource};
pub use workspace::Workspace;
