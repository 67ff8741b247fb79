//! Test fixtures and PDF builders.
//!
//! Provides builders for creating test PDFs with specific content,
//! following the Builder pattern for clean test setup.

use anyhow::Result;
use printpdf::*;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Builder for creating multi-page test PDFs with a text layer.
///
/// Every line is drawn with its own text object so extractors see real
/// line breaks.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let pdf = TestPdfBuilder::new()
///     .with_line("Employee Information Form")
///     .with_line("Email Address: sarah.johnson@company.com")
///     .new_page()
///     .with_line("Phone Number: (415) 555-1234")
///     .build(Path::new("/tmp/test.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    title: String,
    pages: Vec<Vec<String>>,
    page_width: Mm,
    page_height: Mm,
}

impl TestPdfBuilder {
    /// Creates a new builder with one empty A4 page.
    pub fn new() -> Self {
        Self {
            title: "Test Document".to_string(),
            pages: vec![Vec::new()],
            page_width: Mm(210.0),  // A4 width
            page_height: Mm(297.0), // A4 height
        }
    }

    /// Sets the document title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Adds a line of text to the current page.
    pub fn with_line(mut self, line: &str) -> Self {
        if let Some(page) = self.pages.last_mut() {
            page.push(line.to_string());
        }
        self
    }

    /// Adds several lines to the current page.
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self = self.with_line(line.as_ref());
        }
        self
    }

    /// Starts a new page.
    pub fn new_page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    /// Number of pages the built PDF will have.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let (doc, page1, layer1) =
            PdfDocument::new(&self.title, self.page_width, self.page_height, "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        for (page_idx, lines) in self.pages.iter().enumerate() {
            let (page, layer) = if page_idx == 0 {
                (page1, layer1)
            } else {
                doc.add_page(self.page_width, self.page_height, "Layer 1")
            };
            let current_layer = doc.get_page(page).get_layer(layer);

            // 75 lines at 3.5 mm spacing stay inside an A4 page
            for (line_idx, line) in lines.iter().enumerate() {
                let y = Mm(285.0 - 3.5 * line_idx as f32);
                current_layer.use_text(line.as_str(), 8.0, Mm(15.0), y, &font);
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;

        Ok(output_path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Quick helper to create the employee form used across tests.
pub fn create_employee_form(path: &Path) -> Result<PathBuf> {
    TestPdfBuilder::new()
        .with_title("Employee Information Form")
        .with_line("Employee Information Form")
        .with_line("Full Name: Sarah Johnson")
        .with_line("Department: Engineering")
        .with_line("Contact Details:")
        .with_line("Phone Number: (415) 555-1234")
        .with_line("Email Address: sarah.johnson@company.com")
        .with_line("Office Location: Building B, Room 304")
        .build(path)
}

/// Quick helper to create a document with `lines` numbered lines on one page.
pub fn create_long_page(path: &Path, lines: usize) -> Result<PathBuf> {
    TestPdfBuilder::new()
        .with_lines((1..=lines).map(|i| format!("Entry number {}", i)))
        .build(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_pattern() {
        let builder = TestPdfBuilder::new()
            .with_title("Test")
            .with_line("first")
            .new_page()
            .with_line("second");

        assert_eq!(builder.title, "Test");
        assert_eq!(builder.page_count(), 2);
    }

    #[test]
    fn test_create_employee_form() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("form.pdf");

        create_employee_form(&pdf_path)?;

        assert!(pdf_path.exists());
        Ok(())
    }
}
