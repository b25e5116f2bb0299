//! Pipeline orchestrator: fetch manifest, fetch documents, load, normalize
//!
//! [`OpenVexProvider::get`] runs the three phases strictly in order with no
//! interleaving: the manifest fetch, then every document fetch, then a lazy
//! load+normalize stream over whatever landed on disk. Two error policies
//! coexist and are both deliberate:
//!
//! - fetch faults are recovered locally and surface only through
//!   [`FetchReport`] — a partial feed degrades silently;
//! - load faults terminate the stream with an `Err` item;
//! - a manifest whose fetch silently failed surfaces as a file-not-found
//!   I/O error from `get()` itself, the one externally visible signal that
//!   the whole feed is unavailable.

use crate::config::{FeedConfig, ResolvedFeed};
use crate::error::Result;
use crate::fetch::{DocumentFetcher, FetchFailure, FetchReport, HttpFetcher};
use crate::loader::DocumentLoader;
use crate::manifest::Manifest;
use crate::normalize::{NormalizedRecord, Normalizer, Passthrough};
use crate::reference::{ReferenceSource, StandardReferenceSource};
use crate::workspace::Workspace;

/// OpenVEX feed provider
///
/// Owns the resolved configuration plus the three collaborator seams:
/// transport, normalization, and generic reference links.
pub struct OpenVexProvider {
    feed: ResolvedFeed,
    fetcher: Box<dyn DocumentFetcher>,
    normalizer: Box<dyn Normalizer>,
    reference_source: Box<dyn ReferenceSource>,
}

impl OpenVexProvider {
    /// Build a provider with the default HTTP transport, pass-through
    /// normalizer, and standard reference source.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(workspace: &Workspace, config: &FeedConfig) -> Result<Self> {
        let feed = ResolvedFeed::new(workspace, config);
        let fetcher = HttpFetcher::new(feed.clone())?;
        Ok(Self::with_parts(
            feed,
            Box::new(fetcher),
            Box::new(Passthrough),
            Box::new(StandardReferenceSource),
        ))
    }

    /// Build a provider from explicit collaborators
    pub fn with_parts(
        feed: ResolvedFeed,
        fetcher: Box<dyn DocumentFetcher>,
        normalizer: Box<dyn Normalizer>,
        reference_source: Box<dyn ReferenceSource>,
    ) -> Self {
        Self {
            feed,
            fetcher,
            normalizer,
            reference_source,
        }
    }

    /// The feed URL this provider ingests, as reported to downstream
    /// ingestion
    pub fn target_url(&self) -> &str {
        &self.feed.url
    }

    /// Resolved feed values (output directory, base URL, index filename)
    pub fn feed(&self) -> &ResolvedFeed {
        &self.feed
    }

    /// Reference URLs for a vulnerability: the feed-specific security page
    /// first, then the generic source's links, unmodified and in order
    pub fn build_reference_links(&self, vulnerability_id: &str) -> Vec<String> {
        let mut links = vec![format!("{}/{}", self.feed.reference_url, vulnerability_id)];
        links.extend(self.reference_source.links(vulnerability_id));
        links
    }

    /// Fetch one file, converting any failure into a report entry
    async fn fetch_soft(&self, filename: &str, report: &mut FetchReport) {
        match self.fetcher.fetch(filename).await {
            Ok(()) => report.fetched.push(filename.to_string()),
            Err(error) => {
                tracing::error!(
                    namespace = %self.feed.namespace,
                    url = %self.feed.url,
                    filename,
                    error = %error,
                    "ignoring error fetching feed file"
                );
                report.failed.push(FetchFailure {
                    filename: filename.to_string(),
                    error,
                });
            }
        }
    }

    /// Run the pipeline: fetch the manifest, fetch every document it names,
    /// then return a lazy stream over the persisted documents.
    ///
    /// # Errors
    ///
    /// Returns an error when the persisted manifest cannot be opened (the
    /// fetch itself is fail-soft, so a failed manifest download surfaces
    /// here as file-not-found) or cannot be parsed.
    pub async fn get(&self) -> Result<FeedRun<'_>> {
        let mut report = FetchReport::default();

        // Phase 1: the index file, via the same fail-soft routine as any
        // other file
        self.fetch_soft(&self.feed.index_filename, &mut report).await;

        // Phase 2: every entry the manifest names, one at a time
        let manifest = Manifest::read(&self.feed.index_path())?;
        for entry in &manifest.entries {
            self.fetch_soft(&entry.filename, &mut report).await;
        }

        // Phase 3 is lazy: loading starts when the caller iterates
        Ok(FeedRun {
            report,
            loader: DocumentLoader::new(&self.feed),
            normalizer: self.normalizer.as_ref(),
        })
    }
}

/// Result of one provider run: the fetch report plus a lazy record stream
///
/// Iterating yields one `(release, records)` pair per persisted document.
/// An `Err` item means a document failed to load; the stream fuses there,
/// and everything yielded before it stays valid.
pub struct FeedRun<'a> {
    /// Per-file fetch outcomes for this run
    pub report: FetchReport,
    loader: DocumentLoader,
    normalizer: &'a dyn Normalizer,
}

impl std::fmt::Debug for FeedRun<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedRun")
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl Iterator for FeedRun<'_> {
    type Item = Result<(String, Vec<NormalizedRecord>)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.loader.next()? {
            Ok((release, document)) => {
                let records = self.normalizer.normalize(&release, document);
                Some(Ok((release, records)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
