use std::io::Cursor;

use anyhow::Result;
use docx_rs::{Docx, Paragraph, Run, RunFonts};
use once_cell::sync::Lazy;
use regex::Regex;

/// Font every run is set in.
pub const FONT_FAMILY: &str = "Helvetica";
/// Run size in half-points (14pt).
pub const FONT_SIZE_HALF_POINTS: usize = 28;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Word-processor document generator for plain-text reports.
pub struct DocxGenerator;

impl DocxGenerator {
    pub fn new() -> Self {
        DocxGenerator
    }

    /// Builds the `.docx` bytes for `report`, one paragraph per line.
    pub async fn generate(&self, report: String) -> Result<Vec<u8>> {
        // zip packing is CPU bound
        tokio::task::spawn_blocking(move || Self::pack(Self::build_document(&report))).await?
    }

    /// Splitting on `'\n'` keeps empty lines, so an empty report still gets
    /// one empty paragraph.
    pub fn build_document(report: &str) -> Docx {
        report
            .split('\n')
            .fold(Docx::new(), |doc, line| doc.add_paragraph(Self::paragraph(line)))
    }

    fn paragraph(line: &str) -> Paragraph {
        let run = Run::new()
            .add_text(line)
            .size(FONT_SIZE_HALF_POINTS)
            .fonts(
                RunFonts::new()
                    .ascii(FONT_FAMILY)
                    .hi_ansi(FONT_FAMILY)
                    .cs(FONT_FAMILY)
                    .east_asia(FONT_FAMILY),
            );
        Paragraph::new().add_run(run)
    }

    fn pack(doc: Docx) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        doc.build().pack(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}

impl Default for DocxGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Download filename for a report title: every whitespace run becomes a
/// single hyphen. No other sanitization is applied.
pub fn attachment_filename(title: &str) -> String {
    format!("{}.docx", WHITESPACE_RUN.replace_all(title, "-"))
}
