//! OCR and PII redaction CLI.
//!
//! Runs `ocrmypdf` over the input, then writes a plain-text transcript of
//! the OCR'd document with personally identifiable information replaced.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ocr_redact::{
    Anonymizer, LopdfTextExtractor, MupdfTextExtractor, OcrMyPdf, OcrOptions, Operator,
    OptimizeLevel, Pipeline, RedactionService, RedactorError, TextExtractor,
};

/// OCR PDF files using ocrmypdf, then redact PII from the recognized text
///
/// Writes OUTPUT_FILE (the OCR'd PDF) and OUTPUT_FILE_redacted.pdf (a
/// plain-text transcript with PII replaced).
#[derive(Parser)]
#[command(name = "ocr-redact")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the input PDF file
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Path to the output PDF file
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: PathBuf,

    /// Language code for OCR (ISO 639-2, e.g., eng, spa)
    #[arg(long, value_name = "CODE", default_value = "eng")]
    language: String,

    /// Disable deskew (fixing rotated scans)
    #[arg(long)]
    no_deskew: bool,

    /// Compression optimization level (0-3)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=3))]
    optimize: u8,

    /// Disable force OCR (skip if text is detected)
    #[arg(long)]
    no_force_ocr: bool,

    /// How detected PII is rewritten in the transcript
    #[arg(long, value_enum, default_value_t = OperatorArg::Replace)]
    operator: OperatorArg,

    /// Backend used to read text from the OCR'd PDF
    #[arg(long, value_enum, default_value_t = ExtractorArg::Mupdf)]
    extractor: ExtractorArg,

    /// OCR program to run
    #[arg(long, value_name = "PATH", default_value = "ocrmypdf")]
    ocr_command: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OperatorArg {
    /// Replace with the entity label, e.g. <EMAIL_ADDRESS>
    Replace,
    /// Remove the text
    Redact,
    /// Overwrite every character with '*'
    Mask,
}

impl From<OperatorArg> for Operator {
    fn from(arg: OperatorArg) -> Self {
        match arg {
            OperatorArg::Replace => Operator::replace(),
            OperatorArg::Redact => Operator::Redact,
            OperatorArg::Mask => Operator::mask_all('*'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExtractorArg {
    Mupdf,
    Lopdf,
}

impl ExtractorArg {
    fn build(self) -> Box<dyn TextExtractor> {
        match self {
            ExtractorArg::Mupdf => Box::new(MupdfTextExtractor::new()),
            ExtractorArg::Lopdf => Box::new(LopdfTextExtractor::new()),
        }
    }
}

/// Builds OCR options from the parsed arguments.
fn build_options(cli: &Cli) -> Result<OcrOptions> {
    let optimize = OptimizeLevel::new(cli.optimize)?;
    Ok(OcrOptions::new(&cli.input_file, &cli.output_file)
        .with_language(cli.language.clone())
        .with_deskew(!cli.no_deskew)
        .with_optimize(optimize)
        .with_force_ocr(!cli.no_force_ocr))
}

fn build_pipeline(cli: &Cli) -> Pipeline {
    let redaction = RedactionService::with_defaults()
        .with_extractor(cli.extractor.build())
        .with_anonymizer(Anonymizer::new().with_default_operator(cli.operator.into()));
    Pipeline::new(Box::new(OcrMyPdf::with_program(&cli.ocr_command)), redaction)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the redaction stage and reports where the transcript went.
fn redact(pipeline: &Pipeline, ocr_output: &Path, verbose: bool) -> Result<()> {
    let (target, report) = pipeline
        .redact(ocr_output)
        .with_context(|| format!("Redaction failed for {}", ocr_output.display()))?;

    if verbose {
        println!("\nRedaction Summary:");
        println!("  Pages read:      {}", report.input_pages);
        println!("  Pages written:   {}", report.output_pages);
        println!("  Pages modified:  {}", report.pages_modified);
        println!("  Instances redacted: {}", report.instances_redacted);
        for (entity, count) in &report.entity_counts {
            println!("    {}: {}", entity, count);
        }
    }

    println!("Redacted PDF saved to: {}", target.display());
    Ok(())
}

fn run(cli: &Cli) -> ExitCode {
    let options = match build_options(cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    let pipeline = build_pipeline(cli);

    match pipeline.prepare(&options) {
        Ok(()) => {}
        Err(RedactorError::InputNotFound { path }) => {
            eprintln!("Error: Input file '{}' not found.", path.display());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    println!(
        "Processing: {} -> {}",
        options.input.display(),
        options.output.display()
    );

    match pipeline.ocr(&options) {
        Ok(()) => println!("Successfully processed: {}", options.output.display()),
        Err(RedactorError::PriorOcrFound) => {
            eprintln!("Error: PDF already contains OCR text. Use --no-force-ocr to skip.");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error processing PDF: {}", e);
            return ExitCode::FAILURE;
        }
    }

    println!(
        "Redacting PDF: {} -> {}",
        options.output.display(),
        ocr_redact::redacted_path(&options.output).display()
    );

    match redact(&pipeline, &options.output, cli.verbose) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ocr-redact", "in.pdf", "out.pdf"]).unwrap();
        let options = build_options(&cli).unwrap();
        assert_eq!(options.language, "eng");
        assert!(options.deskew);
        assert!(options.force_ocr);
        assert_eq!(options.optimize.value(), 3);
        assert_eq!(cli.operator, OperatorArg::Replace);
        assert_eq!(cli.extractor, ExtractorArg::Mupdf);
    }

    #[test]
    fn test_flags_invert_defaults() {
        let cli = Cli::try_parse_from([
            "ocr-redact",
            "in.pdf",
            "out.pdf",
            "--language",
            "spa",
            "--no-deskew",
            "--optimize",
            "0",
            "--no-force-ocr",
        ])
        .unwrap();
        let options = build_options(&cli).unwrap();
        assert_eq!(options.language, "spa");
        assert!(!options.deskew);
        assert!(!options.force_ocr);
        assert_eq!(options.optimize.value(), 0);
    }

    #[test]
    fn test_optimize_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["ocr-redact", "in.pdf", "out.pdf", "--optimize", "4"]).is_err());
    }

    #[test]
    fn test_positional_arguments_required() {
        assert!(Cli::try_parse_from(["ocr-redact", "in.pdf"]).is_err());
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(Operator::from(OperatorArg::Redact), Operator::Redact);
        assert_eq!(Operator::from(OperatorArg::Replace), Operator::replace());
    }
}
