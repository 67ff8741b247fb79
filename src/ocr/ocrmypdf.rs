//! `ocrmypdf` command-line engine.
//!
//! Runs `ocrmypdf` as a child process and translates its documented exit
//! codes into [`RedactorError`] variants.

use super::{OcrEngine, OcrOptions};
use crate::error::{RedactorError, RedactorResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Exit codes documented by ocrmypdf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrMyPdfExit {
    Ok,
    BadArgs,
    InputFile,
    MissingDependency,
    InvalidOutputPdf,
    FileAccessError,
    AlreadyDoneOcr,
    ChildProcessError,
    EncryptedPdf,
    InvalidConfig,
    PdfaConversionFailed,
    OtherError,
    CtrlC,
    Unknown(i32),
}

impl OcrMyPdfExit {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::BadArgs,
            2 => Self::InputFile,
            3 => Self::MissingDependency,
            4 => Self::InvalidOutputPdf,
            5 => Self::FileAccessError,
            6 => Self::AlreadyDoneOcr,
            7 => Self::ChildProcessError,
            8 => Self::EncryptedPdf,
            9 => Self::InvalidConfig,
            10 => Self::PdfaConversionFailed,
            15 => Self::OtherError,
            130 => Self::CtrlC,
            other => Self::Unknown(other),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::Ok => "success".to_string(),
            Self::BadArgs => "invalid arguments".to_string(),
            Self::InputFile => "input file is not a valid PDF or image".to_string(),
            Self::MissingDependency => "a required dependency is missing".to_string(),
            Self::InvalidOutputPdf => "output file is not a valid PDF".to_string(),
            Self::FileAccessError => "insufficient permissions to read or write a file".to_string(),
            Self::AlreadyDoneOcr => "page already has text".to_string(),
            Self::ChildProcessError => "an OCR subprocess failed".to_string(),
            Self::EncryptedPdf => "input PDF is encrypted".to_string(),
            Self::InvalidConfig => "invalid Tesseract configuration".to_string(),
            Self::PdfaConversionFailed => "PDF/A conversion failed".to_string(),
            Self::OtherError => "unexpected error".to_string(),
            Self::CtrlC => "interrupted".to_string(),
            Self::Unknown(code) => format!("exited with status {}", code),
        }
    }
}

/// OCR engine backed by the `ocrmypdf` program.
#[derive(Debug, Clone)]
pub struct OcrMyPdf {
    program: PathBuf,
}

impl OcrMyPdf {
    /// Uses `ocrmypdf` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("ocrmypdf")
    }

    /// Uses a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds the argument list for one run.
    pub fn command_args(options: &OcrOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--language".into(), options.language.clone().into()];
        if options.deskew {
            args.push("--deskew".into());
        }
        args.push("--optimize".into());
        args.push(options.optimize.to_string().into());
        if options.force_ocr {
            args.push("--force-ocr".into());
        }
        args.push(options.input.clone().into_os_string());
        args.push(options.output.clone().into_os_string());
        args
    }

    /// Picks the message to report for a failed run.
    fn failure_message(exit: OcrMyPdfExit, stderr: &str) -> String {
        stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .map(str::to_string)
            .unwrap_or_else(|| format!("ocrmypdf: {}", exit.description()))
    }
}

impl Default for OcrMyPdf {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for OcrMyPdf {
    fn run(&self, options: &OcrOptions) -> RedactorResult<()> {
        let args = Self::command_args(options);
        debug!(program = %self.program.display(), ?args, "launching OCR");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| RedactorError::OcrLaunch {
                program: self.program.display().to_string(),
                source: e,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        let Some(code) = output.status.code() else {
            return Err(RedactorError::Ocr {
                code: None,
                message: format!("{} was terminated by a signal", self.program.display()),
            });
        };

        match OcrMyPdfExit::from_code(code) {
            OcrMyPdfExit::Ok => {
                info!(output = %options.output.display(), "OCR complete");
                Ok(())
            }
            OcrMyPdfExit::AlreadyDoneOcr => Err(RedactorError::PriorOcrFound),
            exit => {
                warn!(code, reason = %exit.description(), "OCR failed");
                Err(RedactorError::Ocr {
                    code: Some(code),
                    message: Self::failure_message(exit, &stderr),
                })
            }
        }
    }

    fn name(&self) -> &str {
        "ocrmypdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::OptimizeLevel;

    #[test]
    fn test_default_arguments() {
        let options = OcrOptions::new("scan.pdf", "out/scan.pdf");
        let args: Vec<String> = OcrMyPdf::command_args(&options)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--language",
                "eng",
                "--deskew",
                "--optimize",
                "3",
                "--force-ocr",
                "scan.pdf",
                "out/scan.pdf"
            ]
        );
    }

    #[test]
    fn test_disabled_flags_are_omitted() {
        let options = OcrOptions::new("a.pdf", "b.pdf")
            .with_language("spa")
            .with_deskew(false)
            .with_force_ocr(false)
            .with_optimize(OptimizeLevel::NONE);
        let args: Vec<String> = OcrMyPdf::command_args(&options)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["--language", "spa", "--optimize", "0", "a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_program_selection() {
        assert_eq!(OcrMyPdf::new().program(), Path::new("ocrmypdf"));
        assert_eq!(
            OcrMyPdf::with_program("/opt/ocr/bin/ocrmypdf").program(),
            Path::new("/opt/ocr/bin/ocrmypdf")
        );
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(OcrMyPdfExit::from_code(0), OcrMyPdfExit::Ok);
        assert_eq!(OcrMyPdfExit::from_code(6), OcrMyPdfExit::AlreadyDoneOcr);
        assert_eq!(OcrMyPdfExit::from_code(42), OcrMyPdfExit::Unknown(42));
    }

    #[test]
    fn test_failure_message_uses_last_stderr_line() {
        let stderr = "Scanning contents\n   \nEncryptedPdfError: Input PDF is encrypted\n\n";
        assert_eq!(
            OcrMyPdf::failure_message(OcrMyPdfExit::EncryptedPdf, stderr),
            "EncryptedPdfError: Input PDF is encrypted"
        );
        assert_eq!(
            OcrMyPdf::failure_message(OcrMyPdfExit::MissingDependency, ""),
            "ocrmypdf: a required dependency is missing"
        );
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let input = temp_dir.path().join("in.pdf");
        std::fs::write(&input, b"%PDF-1.4").unwrap();

        let engine = OcrMyPdf::with_program(temp_dir.path().join("no-such-ocrmypdf"));
        let err = engine
            .run(&OcrOptions::new(&input, temp_dir.path().join("out.pdf")))
            .unwrap_err();
        assert!(matches!(err, RedactorError::OcrLaunch { .. }));
    }
}
