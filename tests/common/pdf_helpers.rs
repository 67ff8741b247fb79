//! PDF inspection helpers.
//!
//! Output PDFs are read back with `pdf-extract` and `lopdf`, independently
//! of the MuPDF backend the crate itself extracts with.

use anyhow::Result;
use std::path::Path;

/// Extracts text from a PDF safely, returning an error instead of panicking.
pub fn extract_text(pdf_path: &Path) -> Result<String> {
    let bytes = std::fs::read(pdf_path)?;
    pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| anyhow::anyhow!("Failed to extract text: {}", e))
}

/// Counts the pages of a PDF.
pub fn page_count(pdf_path: &Path) -> Result<usize> {
    Ok(::lopdf::Document::load(pdf_path)?.get_pages().len())
}

/// Checks if a PDF contains any of the given patterns.
pub fn pdf_contains_any(pdf_path: &Path, patterns: &[&str]) -> Result<bool> {
    let text = extract_text(pdf_path)?;
    Ok(patterns.iter().any(|p| text.contains(p)))
}

/// Validates that a PDF is loadable and has basic structure.
pub fn is_valid_pdf(pdf_path: &Path) -> bool {
    ::lopdf::Document::load(pdf_path).is_ok()
}
