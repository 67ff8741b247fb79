//! Custom assertions for redaction testing.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use super::pdf_helpers::{extract_text, is_valid_pdf};
use std::path::Path;

/// Asserts that a value has been removed from a PDF's text.
///
/// # Panics
/// Panics if the value is still found in the PDF text.
pub fn assert_redacted(pdf_path: &Path, value: &str) {
    let text = extract_text_or_panic(pdf_path);
    assert!(
        !text.contains(value),
        "'{}' should be redacted but was found in output PDF at '{}'.\nExtracted text length: {} chars",
        value,
        pdf_path.display(),
        text.len()
    );
}

/// Asserts that a value is still present in a PDF's text.
///
/// # Panics
/// Panics if the value is not found in the PDF.
pub fn assert_preserved(pdf_path: &Path, value: &str) {
    let text = extract_text_or_panic(pdf_path);
    assert!(
        text.contains(value),
        "'{}' should be preserved but was not found in PDF at '{}'",
        value,
        pdf_path.display()
    );
}

/// Asserts that a PDF exists, is non-empty and parses.
///
/// # Panics
/// Panics if the PDF is missing, empty or corrupted.
pub fn assert_valid_pdf(pdf_path: &Path) {
    assert!(
        pdf_path.exists(),
        "PDF should exist at '{}'",
        pdf_path.display()
    );

    let metadata = std::fs::metadata(pdf_path).expect("Failed to get PDF metadata");
    assert!(
        metadata.len() > 0,
        "PDF should not be empty at '{}'",
        pdf_path.display()
    );

    assert!(
        is_valid_pdf(pdf_path),
        "PDF should parse at '{}'",
        pdf_path.display()
    );
}

/// Asserts that multiple values are all redacted.
///
/// # Panics
/// Panics if any value is found in the PDF.
pub fn assert_all_redacted(pdf_path: &Path, values: &[&str]) {
    let text = extract_text_or_panic(pdf_path);
    let found: Vec<&str> = values.iter().copied().filter(|v| text.contains(v)).collect();

    assert!(
        found.is_empty(),
        "The following values should be redacted but were found: {:?}",
        found
    );
}

fn extract_text_or_panic(pdf_path: &Path) -> String {
    extract_text(pdf_path).unwrap_or_else(|e| {
        panic!(
            "Failed to extract text from PDF '{}': {}",
            pdf_path.display(),
            e
        )
    })
}
