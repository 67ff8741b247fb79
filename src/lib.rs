//! OCR a PDF, then produce a PII-redacted plain-text transcript of it.
//!
//! OCR is delegated to `ocrmypdf`. The OCR'd document's text is extracted
//! page by page, scanned for personally identifiable information, and
//! rewritten with placeholders into a new PDF that holds only the redacted
//! text. Layout, images and fonts of the source are not preserved.
//!
//! # Architecture
//!
//! - [`ocr`]: the [`OcrEngine`] seam and the `ocrmypdf` engine
//! - [`domain`]: PII recognizers (email, phone, SSN, cards, IBAN, IP, URL)
//! - [`analysis`]: runs recognizers over text ([`PiiAnalyzer`])
//! - [`anonymize`]: resolves overlapping findings and rewrites them
//! - [`redaction`]: text extraction, redaction service and transcript rendering
//! - [`pipeline`]: OCR followed by redaction
//! - [`error`]: error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use ocr_redact::{OcrOptions, Pipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::with_defaults();
//! let report = pipeline.run(&OcrOptions::new("scan.pdf", "out/scan.pdf"))?;
//! println!("transcript written to {}", report.redacted_output.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Redacting text directly
//!
//! ```
//! use ocr_redact::{Anonymizer, PatternAnalyzer, PiiAnalyzer};
//!
//! let text = "Call (415) 555-1234 or mail jane@example.com";
//! let findings = PatternAnalyzer::new().analyze(text, "en").unwrap();
//! let redacted = Anonymizer::new().anonymize(text, &findings);
//! assert_eq!(redacted.text, "Call <PHONE_NUMBER> or mail <EMAIL_ADDRESS>");
//! ```

pub mod analysis;
pub mod anonymize;
pub mod domain;
pub mod error;
pub mod ocr;
pub mod pipeline;
pub mod redaction;

// Re-exports for convenient access
pub use analysis::{PatternAnalyzer, PiiAnalyzer};
pub use anonymize::{AnonymizedText, Anonymizer, Operator};
pub use domain::{EntityType, PatternMatcher, RecognizerResult};
pub use error::{RedactorError, RedactorResult};
pub use ocr::{OcrEngine, OcrMyPdf, OcrOptions, OptimizeLevel};
pub use pipeline::{redacted_path, Pipeline, PipelineReport};
pub use redaction::{
    LopdfTextExtractor, MupdfTextExtractor, PrintPdfWriter, RedactionReport, RedactionService,
    TextExtractor, TranscriptWriter,
};
