//! Per-page text extraction backends.

use super::strategy::TextExtractor;
use crate::error::{RedactorError, RedactorResult};
use std::path::Path;
use tracing::debug;

use mupdf::{Document, TextPageOptions};

/// Extracts page text with MuPDF's structured-text device.
///
/// This is the default backend. It reads text layers produced by OCR
/// engines reliably, including invisible (render mode 3) text.
#[derive(Debug, Clone, Default)]
pub struct MupdfTextExtractor;

impl MupdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn options() -> TextPageOptions {
        TextPageOptions::PRESERVE_LIGATURES | TextPageOptions::PRESERVE_WHITESPACE
    }
}

impl TextExtractor for MupdfTextExtractor {
    fn extract_pages(&self, input: &Path) -> RedactorResult<Vec<String>> {
        let input_str = input.to_str().ok_or_else(|| RedactorError::InvalidInput {
            parameter: "input".to_string(),
            reason: "Path contains invalid UTF-8".to_string(),
        })?;

        let doc = Document::open(input_str).map_err(|e| RedactorError::PdfProcessing {
            message: "Failed to open PDF with MuPDF".to_string(),
            page: None,
            source: Some(Box::new(e)),
        })?;

        let page_count = doc.page_count().map_err(|e| RedactorError::BackendError {
            backend: "MuPDF".to_string(),
            message: format!("Failed to get page count: {}", e),
            source: Some(Box::new(e)),
        })?;

        let mut pages = Vec::with_capacity(page_count.max(0) as usize);
        for page_idx in 0..page_count {
            let page_no = page_idx as usize + 1;
            let page = doc
                .load_page(page_idx)
                .map_err(|e| RedactorError::PdfProcessing {
                    message: format!("Failed to load page {}", page_no),
                    page: Some(page_no),
                    source: Some(Box::new(e)),
                })?;

            let text = page
                .to_text_page(Self::options())
                .and_then(|text_page| text_page.to_text())
                .map_err(|e| RedactorError::PdfProcessing {
                    message: "Failed to extract page text".to_string(),
                    page: Some(page_no),
                    source: Some(Box::new(e)),
                })?;

            debug!(page = page_no, chars = text.len(), "extracted page text");
            pages.push(text);
        }

        Ok(pages)
    }

    fn name(&self) -> &str {
        "MuPDF"
    }
}

/// Extracts page text by decoding content streams with lopdf.
///
/// Pure Rust; useful where MuPDF is unavailable, at the cost of weaker
/// handling of unusual font encodings.
#[derive(Debug, Clone, Default)]
pub struct LopdfTextExtractor;

impl LopdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for LopdfTextExtractor {
    fn extract_pages(&self, input: &Path) -> RedactorResult<Vec<String>> {
        let doc = lopdf::Document::load(input).map_err(|e| RedactorError::TextExtraction {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })?;

        doc.get_pages()
            .keys()
            .map(|&page_number| -> RedactorResult<String> {
                let text = doc
                    .extract_text(&[page_number])
                    .map_err(|e| RedactorError::PdfProcessing {
                        message: format!("Failed to extract text: {}", e),
                        page: Some(page_number as usize),
                        source: None,
                    })?;
                debug!(page = page_number, chars = text.len(), "extracted page text");
                Ok(text)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_names() {
        assert_eq!(MupdfTextExtractor::new().name(), "MuPDF");
        assert_eq!(LopdfTextExtractor::new().name(), "lopdf");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = Path::new("/definitely/not/here.pdf");
        assert!(MupdfTextExtractor::new().extract_pages(path).is_err());
        assert!(LopdfTextExtractor::new().extract_pages(path).is_err());
    }
}
