//! Plain-text transcript rendering.
//!
//! Every logical page of redacted text is drawn top-down in 10 pt
//! Helvetica on US Letter paper. Lines are split on line boundaries and
//! truncated, never wrapped. When a page runs out of vertical space the
//! text continues on a fresh physical page, so the transcript can have
//! more pages than the source but never fewer.

use super::strategy::TranscriptWriter;
use crate::error::{RedactorError, RedactorResult};
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Page geometry and typography for transcripts, in PDF points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Left edge of every line
    pub left_margin: f32,
    /// Distance from the top edge to the first baseline
    pub top_margin: f32,
    /// Baselines below this start a new page
    pub bottom_margin: f32,
    pub line_height: f32,
    pub font_size: f32,
    /// Characters kept per line; the rest is dropped
    pub max_line_chars: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            left_margin: 40.0,
            top_margin: 40.0,
            bottom_margin: 40.0,
            line_height: 12.0,
            font_size: 10.0,
            max_line_chars: 100,
        }
    }
}

/// A line of text at a fixed baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// The content of one physical output page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

impl LayoutConfig {
    fn first_baseline(&self) -> f32 {
        self.page_height - self.top_margin
    }

    /// Positions every line of every logical page onto physical pages.
    ///
    /// Each logical page starts a new physical page; an empty logical page
    /// still yields one blank physical page. A page whose last line fills
    /// the remaining space is followed by a blank page, and an empty input
    /// yields a single blank page.
    pub fn layout(&self, pages: &[String]) -> Vec<PageLayout> {
        let mut physical = Vec::new();

        for text in pages {
            let mut current = PageLayout::default();
            let mut y = self.first_baseline();

            for line in split_lines(text) {
                current.lines.push(PlacedLine {
                    x: self.left_margin,
                    y,
                    text: truncate_chars(line, self.max_line_chars).to_string(),
                });
                y -= self.line_height;
                if y < self.bottom_margin {
                    physical.push(std::mem::take(&mut current));
                    y = self.first_baseline();
                }
            }

            physical.push(current);
        }

        if physical.is_empty() {
            physical.push(PageLayout::default());
        }
        physical
    }
}

/// Splits text on line boundaries, dropping the boundaries.
///
/// Recognizes `\n`, `\r\n`, `\r`, vertical tab, form feed, the ASCII file,
/// group and record separators, NEL, and the Unicode line and paragraph
/// separators. A trailing boundary does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let is_break = matches!(
            c,
            '\n' | '\r'
                | '\u{0b}'
                | '\u{0c}'
                | '\u{1c}'
                | '\u{1d}'
                | '\u{1e}'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        );
        if !is_break {
            continue;
        }

        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Returns at most the first `max_chars` characters of `line`.
pub fn truncate_chars(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &line[..byte_idx],
        None => line,
    }
}

/// Writes transcripts with printpdf's built-in Helvetica.
#[derive(Debug, Clone)]
pub struct PrintPdfWriter {
    config: LayoutConfig,
    title: String,
}

impl PrintPdfWriter {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            title: "Redacted transcript".to_string(),
        }
    }

    /// Sets the title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}

impl Default for PrintPdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptWriter for PrintPdfWriter {
    fn write(&self, pages: &[String], output: &Path) -> RedactorResult<usize> {
        let layout = self.config.layout(pages);
        let width = Mm::from(Pt(self.config.page_width));
        let height = Mm::from(Pt(self.config.page_height));

        let (doc, first_page, first_layer) = PdfDocument::new(&self.title, width, height, "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        for (page_idx, page) in layout.iter().enumerate() {
            let (page_ref, layer_ref) = if page_idx == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, "Layer 1")
            };
            let layer = doc.get_page(page_ref).get_layer(layer_ref);

            for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
                layer.use_text(
                    line.text.as_str(),
                    self.config.font_size,
                    Mm::from(Pt(line.x)),
                    Mm::from(Pt(line.y)),
                    &font,
                );
            }
        }

        let file = File::create(output).map_err(|e| RedactorError::Io {
            path: output.to_path_buf(),
            source: e,
        })?;
        doc.save(&mut BufWriter::new(file))?;

        debug!(pages = layout.len(), output = %output.display(), "wrote transcript");
        Ok(layout.len())
    }

    fn name(&self) -> &str {
        "printpdf"
    }
}
