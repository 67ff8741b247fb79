//! Redaction stage: extract, analyze, anonymize, re-render.
//!
//! The service reads the text of every page of an OCR'd PDF, rewrites the
//! PII found in it and writes the result as a new plain-text PDF. The
//! original layout, images and fonts are not carried over.

pub mod extract;
pub mod render;
pub mod strategy;

pub use extract::{LopdfTextExtractor, MupdfTextExtractor};
pub use render::{LayoutConfig, PageLayout, PlacedLine, PrintPdfWriter};
pub use strategy::{RedactionReport, TextExtractor, TranscriptWriter};

use crate::analysis::{PatternAnalyzer, PiiAnalyzer};
use crate::anonymize::Anonymizer;
use crate::error::{RedactorError, RedactorResult};
use std::path::Path;
use tracing::{debug, info};

/// Language passed to the analyzer for every page.
pub const ANALYSIS_LANGUAGE: &str = "en";

/// Redaction service coordinating extraction, analysis and rendering.
pub struct RedactionService {
    extractor: Box<dyn TextExtractor>,
    analyzer: Box<dyn PiiAnalyzer>,
    anonymizer: Anonymizer,
    writer: Box<dyn TranscriptWriter>,
}

impl RedactionService {
    /// Creates a new redaction service from its collaborators.
    pub fn new(
        extractor: Box<dyn TextExtractor>,
        analyzer: Box<dyn PiiAnalyzer>,
        anonymizer: Anonymizer,
        writer: Box<dyn TranscriptWriter>,
    ) -> Self {
        Self {
            extractor,
            analyzer,
            anonymizer,
            writer,
        }
    }

    /// Creates a service with MuPDF extraction, the pattern analyzer,
    /// label replacement and printpdf rendering.
    pub fn with_defaults() -> Self {
        Self::new(
            Box::new(MupdfTextExtractor::new()),
            Box::new(PatternAnalyzer::new()),
            Anonymizer::new(),
            Box::new(PrintPdfWriter::new()),
        )
    }

    /// Replaces the text extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replaces the anonymizer.
    pub fn with_anonymizer(mut self, anonymizer: Anonymizer) -> Self {
        self.anonymizer = anonymizer;
        self
    }

    /// Redacts the PII in each page's text, independently and in order.
    pub fn redact_pages(&self, pages: &[String]) -> RedactorResult<(Vec<String>, RedactionReport)> {
        let mut report = RedactionReport {
            input_pages: pages.len(),
            ..Default::default()
        };

        let mut redacted = Vec::with_capacity(pages.len());
        for (page_idx, text) in pages.iter().enumerate() {
            let findings = self.analyzer.analyze(text, ANALYSIS_LANGUAGE)?;
            let anonymized = self.anonymizer.anonymize(text, &findings);

            if !anonymized.items.is_empty() {
                report.pages_modified += 1;
                report.instances_redacted += anonymized.items.len();
                for item in &anonymized.items {
                    *report.entity_counts.entry(item.entity_type).or_default() += 1;
                }
            }
            debug!(
                page = page_idx + 1,
                redacted = anonymized.items.len(),
                "redacted page"
            );
            redacted.push(anonymized.text);
        }

        Ok((redacted, report))
    }

    /// Redacts `input` and writes the plain-text transcript to `output`.
    ///
    /// # Returns
    /// Result containing redaction statistics
    pub fn redact(&self, input: &Path, output: &Path) -> RedactorResult<RedactionReport> {
        if !input.exists() {
            return Err(RedactorError::Io {
                path: input.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Input file does not exist",
                ),
            });
        }

        let pages = self.extractor.extract_pages(input)?;
        let (redacted, mut report) = self.redact_pages(&pages)?;
        report.output_pages = self.writer.write(&redacted, output)?;

        info!(
            extractor = self.extractor.name(),
            analyzer = self.analyzer.name(),
            writer = self.writer.name(),
            input_pages = report.input_pages,
            output_pages = report.output_pages,
            redacted = report.instances_redacted,
            "redaction complete"
        );
        Ok(report)
    }
}
