//! Redaction stage seams and supporting types.
//!
//! Text extraction and transcript rendering sit behind traits so the
//! redaction service can run against any PDF backend, or none at all in
//! tests.

use crate::domain::EntityType;
use crate::error::RedactorResult;
use std::collections::BTreeMap;
use std::path::Path;

/// Pulls the plain text out of every page of a PDF.
pub trait TextExtractor: Send + Sync {
    /// Returns one string per page, in page order.
    fn extract_pages(&self, input: &Path) -> RedactorResult<Vec<String>>;

    /// Returns a human-readable name for this extractor.
    fn name(&self) -> &str;
}

/// Writes redacted page text to a new PDF.
pub trait TranscriptWriter: Send + Sync {
    /// Renders `pages` to `output` and returns the number of physical
    /// pages written.
    fn write(&self, pages: &[String], output: &Path) -> RedactorResult<usize>;

    /// Returns a human-readable name for this writer.
    fn name(&self) -> &str;
}

/// Statistics about a redaction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedactionReport {
    /// Pages read from the source PDF
    pub input_pages: usize,

    /// Physical pages in the transcript PDF
    pub output_pages: usize,

    /// Number of spans rewritten
    pub instances_redacted: usize,

    /// Pages with at least one rewritten span
    pub pages_modified: usize,

    /// Rewritten spans per entity type
    pub entity_counts: BTreeMap<EntityType, usize>,
}

impl RedactionReport {
    /// Returns true if any span was rewritten.
    pub fn has_redactions(&self) -> bool {
        self.instances_redacted > 0
    }
}
