//! Error types for the OCR and redaction pipeline.
//!
//! The OCR stage distinguishes a "prior OCR found" condition from every
//! other engine failure so the CLI can report them differently. The
//! redaction stage reports failures with the page and backend involved.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type RedactorResult<T> = Result<T, RedactorError>;

/// Error type for all OCR, analysis and rendering operations.
#[derive(Debug, Error)]
pub enum RedactorError {
    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input document does not exist
    #[error("Input file '{}' not found", .path.display())]
    InputNotFound { path: PathBuf },

    /// The OCR engine refused to process a document that already has text
    #[error("page already has text")]
    PriorOcrFound,

    /// The OCR engine ran and failed
    #[error("{message}")]
    Ocr { code: Option<i32>, message: String },

    /// The OCR program could not be started
    #[error("failed to launch OCR program '{program}': {source}")]
    OcrLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Error occurred during PDF processing
    #[error("PDF processing error{}: {message}", page_suffix(.page))]
    PdfProcessing {
        message: String,
        page: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Text extraction failed
    #[error("Text extraction failed for '{}': {reason}", .path.display())]
    TextExtraction { path: PathBuf, reason: String },

    /// The PII analyzer has no recognizers for the requested language
    #[error("No PII recognizers available for language '{language}'")]
    UnsupportedLanguage { language: String },

    /// Invalid configuration or parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// Backend-specific error (MuPDF, lopdf, printpdf)
    #[error("{backend} backend error: {message}")]
    BackendError {
        backend: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn page_suffix(page: &Option<usize>) -> String {
    page.map(|p| format!(" on page {}", p)).unwrap_or_default()
}

impl RedactorError {
    /// Wraps an error raised by one of the PDF backends.
    pub fn backend<E>(backend: &str, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::BackendError {
            backend: backend.to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true for the condition where OCR was skipped because the
    /// document already contains a text layer.
    pub fn is_prior_ocr(&self) -> bool {
        matches!(self, Self::PriorOcrFound)
    }
}

// Conversion implementations for the PDF backends
impl From<lopdf::Error> for RedactorError {
    fn from(err: lopdf::Error) -> Self {
        Self::BackendError {
            backend: "lopdf".to_string(),
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<printpdf::Error> for RedactorError {
    fn from(err: printpdf::Error) -> Self {
        Self::BackendError {
            backend: "printpdf".to_string(),
            message: err.to_string(),
            source: None,
        }
    }
}
