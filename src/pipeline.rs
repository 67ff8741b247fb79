//! OCR followed by redaction.
//!
//! The pipeline is strictly sequential: prepare (validate input, create
//! the output directory), OCR, then redaction of the OCR output into
//! `<output>_redacted.pdf`. Redaction runs whenever OCR succeeds.

use crate::error::RedactorResult;
use crate::ocr::{ensure_parent_dir, OcrEngine, OcrMyPdf, OcrOptions};
use crate::redaction::{RedactionReport, RedactionService};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

/// Suffix appended to the OCR output path to name the transcript.
pub const REDACTED_SUFFIX: &str = "_redacted.pdf";

/// Returns the transcript path for an OCR output path.
///
/// The suffix is appended to the whole file name, so `out.pdf` becomes
/// `out.pdf_redacted.pdf`.
pub fn redacted_path(output: &Path) -> PathBuf {
    let mut name: OsString = output.as_os_str().to_os_string();
    name.push(REDACTED_SUFFIX);
    PathBuf::from(name)
}

/// Paths written by a complete run, with redaction statistics.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub ocr_output: PathBuf,
    pub redacted_output: PathBuf,
    pub redaction: RedactionReport,
}

/// Sequences the OCR engine and the redaction service.
pub struct Pipeline {
    ocr: Box<dyn OcrEngine>,
    redaction: RedactionService,
}

impl Pipeline {
    pub fn new(ocr: Box<dyn OcrEngine>, redaction: RedactionService) -> Self {
        Self { ocr, redaction }
    }

    /// `ocrmypdf` from `PATH` plus the default redaction service.
    pub fn with_defaults() -> Self {
        Self::new(Box::new(OcrMyPdf::new()), RedactionService::with_defaults())
    }

    /// Validates the options and creates the output directory.
    ///
    /// No external program is called before this succeeds.
    pub fn prepare(&self, options: &OcrOptions) -> RedactorResult<()> {
        options.validate()?;
        ensure_parent_dir(&options.output)
    }

    /// Runs the OCR engine.
    pub fn ocr(&self, options: &OcrOptions) -> RedactorResult<()> {
        info!(
            engine = self.ocr.name(),
            input = %options.input.display(),
            output = %options.output.display(),
            language = %options.language,
            deskew = options.deskew,
            optimize = options.optimize.value(),
            force_ocr = options.force_ocr,
            "running OCR"
        );
        self.ocr.run(options)
    }

    /// Redacts an OCR'd PDF into its `_redacted.pdf` sibling.
    pub fn redact(&self, ocr_output: &Path) -> RedactorResult<(PathBuf, RedactionReport)> {
        let target = redacted_path(ocr_output);
        let report = self.redaction.redact(ocr_output, &target)?;
        Ok((target, report))
    }

    /// Runs every stage in order.
    pub fn run(&self, options: &OcrOptions) -> RedactorResult<PipelineReport> {
        self.prepare(options)?;
        self.ocr(options)?;
        let (redacted_output, redaction) = self.redact(&options.output)?;

        Ok(PipelineReport {
            ocr_output: options.output.clone(),
            redacted_output,
            redaction,
        })
    }
}
