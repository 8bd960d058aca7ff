//! PDF rendering of report documents.

use std::fs;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use tracing::debug;

use crate::error::{BiasLensError, Result};

use super::document::ReportDocument;

/// US Letter, in millimetres.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 25.4;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;

/// Summary table geometry (150pt / 250pt columns).
const LABEL_COL: f32 = 52.9;
const VALUE_COL: f32 = 88.2;
const ROW_HEIGHT: f32 = 8.0;
const LINE_HEIGHT: f32 = 6.5;

/// Characters per wrapped fix line at body size.
const WRAP_WIDTH: usize = 85;

/// Writes report PDFs into a directory, one file per analysis.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    dir: PathBuf,
}

impl ReportRenderer {
    /// Write reports under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The report directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic location of the report for an analysis.
    pub fn report_path(&self, analysis_id: u64) -> PathBuf {
        self.dir.join(report_file_name(analysis_id))
    }

    /// Render `doc` and write it, replacing any earlier report for the same analysis.
    pub fn write(&self, doc: &ReportDocument) -> Result<PathBuf> {
        let bytes = render_pdf(doc)?;
        let path = self.report_path(doc.analysis_id);

        fs::create_dir_all(&self.dir).map_err(|e| BiasLensError::io(&self.dir, e))?;
        fs::write(&path, &bytes).map_err(|e| BiasLensError::io(&path, e))?;

        if !path.is_file() {
            return Err(BiasLensError::RenderFailure(format!(
                "'{}' was not written",
                path.display()
            )));
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Wrote PDF report");
        Ok(path)
    }
}

/// File name of the report for an analysis.
pub fn report_file_name(analysis_id: u64) -> String {
    format!("bias_report_{}.pdf", analysis_id)
}

/// Lay out a report document as a PDF.
pub fn render_pdf(doc: &ReportDocument) -> Result<Vec<u8>> {
    let (pdf, page, layer) =
        PdfDocument::new(doc.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_error)?;
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_error)?;

    let mut cursor = Cursor {
        layer: pdf.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT - MARGIN,
    };

    cursor.layer.use_text(doc.title.as_str(), TITLE_SIZE, Mm(MARGIN), Mm(cursor.y), &bold);
    cursor.y -= 15.0;

    draw_summary_table(&cursor.layer, &doc.summary, cursor.y, &bold, &regular);
    cursor.y -= ROW_HEIGHT * doc.summary.len() as f32 + 12.0;

    cursor.layer.use_text("Applied Fixes:", HEADING_SIZE, Mm(MARGIN), Mm(cursor.y), &bold);
    cursor.y -= 10.0;

    for line in doc.fix_lines() {
        for wrapped in wrap(&line, WRAP_WIDTH) {
            cursor.ensure_room(&pdf);
            cursor
                .layer
                .use_text(wrapped, BODY_SIZE, Mm(MARGIN), Mm(cursor.y), &regular);
            cursor.y -= LINE_HEIGHT;
        }
    }

    pdf.save_to_bytes().map_err(render_error)
}

/// Current page layer and vertical position.
struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor {
    /// Start a new page when the next line would cross the bottom margin.
    fn ensure_room(&mut self, pdf: &PdfDocumentReference) {
        if self.y >= MARGIN {
            return;
        }
        let (page, layer) = pdf.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Report");
        self.layer = pdf.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }
}

fn draw_summary_table(
    layer: &PdfLayerReference,
    rows: &[(String, String)],
    top: f32,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
) {
    let left = MARGIN;
    let middle = MARGIN + LABEL_COL;
    let right = MARGIN + LABEL_COL + VALUE_COL;
    let bottom = top - ROW_HEIGHT * rows.len() as f32;

    layer.set_outline_color(Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None)));
    layer.set_outline_thickness(0.5);

    for i in 0..=rows.len() {
        let y = top - ROW_HEIGHT * i as f32;
        layer.add_line(segment((left, y), (right, y)));
    }
    for x in [left, middle, right] {
        layer.add_line(segment((x, top), (x, bottom)));
    }

    for (i, (label, value)) in rows.iter().enumerate() {
        let baseline = top - ROW_HEIGHT * i as f32 - 5.5;
        layer.use_text(label.as_str(), BODY_SIZE, Mm(left + 2.0), Mm(baseline), bold);
        layer.use_text(value.as_str(), BODY_SIZE, Mm(middle + 2.0), Mm(baseline), regular);
    }
}

fn segment(from: (f32, f32), to: (f32, f32)) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    }
}

/// Greedy word wrap. Words longer than `width` are kept whole.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
            current.push_str("  ");
        } else if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }
    lines
}

fn render_error(err: impl std::fmt::Debug) -> BiasLensError {
    BiasLensError::RenderFailure(format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn document(fixes: Vec<String>) -> ReportDocument {
        ReportDocument {
            analysis_id: 5,
            title: "Bias Analysis Report (ID: 5)".to_string(),
            summary: vec![
                ("Accuracy:".to_string(), "75.00%".to_string()),
                ("Bias Score:".to_string(), "0.6000".to_string()),
            ],
            applied_fixes: fixes,
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_pdf(&document(vec![])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_fix_list_spills_onto_new_pages() {
        let fixes = (0..120).map(|i| format!("Fix number {}", i)).collect();
        let bytes = render_pdf(&document(fixes)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_overwrites_previous_report() {
        let dir = TempDir::new().unwrap();
        let renderer = ReportRenderer::new(dir.path().join("generated_reports"));

        let first = renderer.write(&document(vec![])).unwrap();
        let second = renderer
            .write(&document(vec!["Rebalance dataset".to_string()]))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), "bias_report_5.pdf");
        assert_eq!(fs::read_dir(renderer.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("- short fix", 85), vec!["- short fix"]);
        let lines = wrap("- aaaa bbbb cccc", 10);
        assert_eq!(lines, vec!["- aaaa", "  bbbb", "  cccc"]);
    }
}
