//! Reference-link building for vulnerability identifiers
//!
//! The feed-specific security URL always comes first; whatever the generic
//! [`ReferenceSource`] collaborator produces follows, in its order, with no
//! deduplication.

/// Collaborator producing generic reference links for a vulnerability
/// identifier
pub trait ReferenceSource: Send + Sync {
    /// Generic reference URLs for the identifier, in source-defined order
    fn links(&self, vulnerability_id: &str) -> Vec<String>;
}

/// Default generic source: NVD for CVE identifiers, GitHub advisories for
/// GHSA identifiers, nothing for anything else
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardReferenceSource;

impl ReferenceSource for StandardReferenceSource {
    fn links(&self, vulnerability_id: &str) -> Vec<String> {
        let id = vulnerability_id.trim();
        let upper = id.to_uppercase();
        if upper.starts_with("CVE-") {
            vec![format!("https://nvd.nist.gov/vuln/detail/{id}")]
        } else if upper.starts_with("GHSA-") {
            vec![format!("https://github.com/advisories/{id}")]
        } else {
            Vec::new()
        }
    }
}
