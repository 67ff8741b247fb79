//! OCR stage.
//!
//! Recognition itself is delegated to an external engine behind the
//! [`OcrEngine`] trait. [`OcrMyPdf`] drives the `ocrmypdf` command-line
//! program; tests substitute their own engines.

pub mod ocrmypdf;

pub use ocrmypdf::{OcrMyPdf, OcrMyPdfExit};

use crate::error::{RedactorError, RedactorResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Compression optimization level passed to the OCR engine (0-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OptimizeLevel(u8);

impl OptimizeLevel {
    pub const NONE: OptimizeLevel = OptimizeLevel(0);
    pub const MAX: OptimizeLevel = OptimizeLevel(3);

    /// Creates a level, rejecting values outside `0..=3`.
    pub fn new(level: u8) -> RedactorResult<Self> {
        if level <= Self::MAX.0 {
            Ok(Self(level))
        } else {
            Err(RedactorError::InvalidInput {
                parameter: "optimize".to_string(),
                reason: format!("level {} is outside 0..=3", level),
            })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for OptimizeLevel {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Display for OptimizeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for one OCR run.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Tesseract language code(s), e.g. `eng` or `eng+spa`
    pub language: String,
    /// Straighten rotated scans before recognition
    pub deskew: bool,
    pub optimize: OptimizeLevel,
    /// Rasterize and re-OCR pages that already carry text
    pub force_ocr: bool,
}

impl OcrOptions {
    /// Creates options with the defaults: `eng`, deskew on, optimize 3, force OCR on.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            language: "eng".to_string(),
            deskew: true,
            optimize: OptimizeLevel::default(),
            force_ocr: true,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_deskew(mut self, deskew: bool) -> Self {
        self.deskew = deskew;
        self
    }

    pub fn with_optimize(mut self, optimize: OptimizeLevel) -> Self {
        self.optimize = optimize;
        self
    }

    pub fn with_force_ocr(mut self, force_ocr: bool) -> Self {
        self.force_ocr = force_ocr;
        self
    }

    /// Checks the options before any external call is made.
    pub fn validate(&self) -> RedactorResult<()> {
        if !self.input.exists() {
            return Err(RedactorError::InputNotFound {
                path: self.input.clone(),
            });
        }

        if self.language.trim().is_empty() {
            return Err(RedactorError::InvalidInput {
                parameter: "language".to_string(),
                reason: "language code must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Turns a scanned PDF into one with an embedded text layer.
pub trait OcrEngine: Send + Sync {
    /// Runs OCR on `options.input`, writing `options.output`.
    ///
    /// Returns [`RedactorError::PriorOcrFound`] when the engine refuses a
    /// document that already has text, and [`RedactorError::Ocr`] for every
    /// other engine failure.
    fn run(&self, options: &OcrOptions) -> RedactorResult<()>;

    /// Returns a human-readable name for this engine.
    fn name(&self) -> &str;
}

/// Creates the parent directory of `path`, including missing ancestors.
pub fn ensure_parent_dir(path: &Path) -> RedactorResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| RedactorError::Io {
                path: parent.to_path_buf(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}
