//! Normalization of raw feed documents into release-tagged records
//!
//! [`Normalizer`] is the seam where OpenVEX-statement-to-vulnerability-record
//! mapping belongs. The bundled [`Passthrough`] implementation re-emits each
//! document unchanged, which is the current pipeline contract.

use serde::Serialize;
use serde_json::Value;

/// One record emitted to downstream ingestion
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// Release line the record belongs to
    pub release: String,
    /// The document payload
    pub document: Value,
}

/// Maps a raw feed document into zero or more release-tagged records
pub trait Normalizer: Send + Sync {
    /// Normalize one document for the given release
    fn normalize(&self, release: &str, document: Value) -> Vec<NormalizedRecord>;
}

/// Pass-through normalizer: yields the document unchanged, tagged with the
/// release
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl Normalizer for Passthrough {
    fn normalize(&self, release: &str, document: Value) -> Vec<NormalizedRecord> {
        vec![NormalizedRecord {
            release: release.to_string(),
            document,
        }]
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passthrough_keeps_document_untouched() {
        let document = json!({"@context": "https://openvex.dev/ns/v0.2.0", "statements": []});
        let records = Passthrough.normalize("rolling", document.clone());
        assert_eq!(
            records,
            vec![NormalizedRecord {
                release: "rolling".to_string(),
                document,
            }]
        );
    }
}
