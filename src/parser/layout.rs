//! Content-stream layout extraction.
//!
//! Walks a page's content stream, tracking the text matrix and current font,
//! and turns text-showing operators into positioned runs. Runs are then
//! grouped into lines by baseline.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{Line, Span};

use super::backend::decode_text_simple;

/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Fraction of the font size within which two baselines share a line.
const LINE_TOLERANCE_RATIO: f32 = 0.3;

/// A text run with its PDF-space position.
#[derive(Debug, Clone)]
pub struct PositionedRun {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline, bottom-up)
    pub y: f32,
    /// Effective font size in points
    pub font_size: f32,
}

/// Extracts positioned runs and lines from lopdf pages.
pub struct LayoutExtractor<'a> {
    doc: &'a LopdfDocument,
    normalize_unicode: bool,
}

impl<'a> LayoutExtractor<'a> {
    /// Create a new extractor.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self {
            doc,
            normalize_unicode: true,
        }
    }

    /// Enable or disable NFC normalization of run text.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Extract the lines of a page, top to bottom.
    ///
    /// `page_height` converts PDF baselines into top-down positions.
    pub fn extract_page_lines(
        &self,
        page_id: lopdf::ObjectId,
        page_height: f32,
    ) -> Result<Vec<Line>> {
        let runs = self.extract_page_runs(page_id)?;
        Ok(group_runs_into_lines(runs, page_height))
    }

    /// Extract positioned runs from a page's content stream.
    pub fn extract_page_runs(&self, page_id: lopdf::ObjectId) -> Result<Vec<PositionedRun>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        self.parse_content_stream(&content, &fonts)
    }

    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<PositionedRun>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut runs = Vec::new();
        let mut font_name: Vec<u8> = Vec::new();
        let mut font_size: f32 = 12.0;
        let mut leading: f32 = 0.0;
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix = TextMatrix::default();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            font_name = name.clone();
                        }
                        font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(value) = op.operands.first().and_then(get_number) {
                        leading = value;
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            leading = -ty;
                        }
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => matrix.next_line(leading),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line(leading);
                    }
                    if !in_text_block {
                        continue;
                    }

                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(Object::Array(items)) => self.decode_tj_array(items, &font_name, fonts),
                            _ => String::new(),
                        },
                        "\"" => self.decode_operand(op.operands.get(2), &font_name, fonts),
                        _ => self.decode_operand(op.operands.first(), &font_name, fonts),
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position();
                        runs.push(PositionedRun {
                            text: self.normalize(text),
                            x,
                            y,
                            font_size: font_size * matrix.scale(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(runs)
    }

    fn decode_operand(
        &self,
        operand: Option<&Object>,
        font_name: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        match operand {
            Some(Object::String(bytes, _)) => self.decode_bytes(bytes, font_name, fonts),
            _ => String::new(),
        }
    }

    /// Decode a TJ array, inserting a space where the kerning adjustment is
    /// wide enough to be a word gap.
    fn decode_tj_array(
        &self,
        items: &[Object],
        font_name: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decode_bytes(bytes, font_name, fonts));
                }
                Object::Integer(_) | Object::Real(_) => {
                    let adjustment = -get_number(item).unwrap_or(0.0);
                    let ends_with_space =
                        combined.ends_with(' ') || combined.ends_with('\u{00A0}');
                    if adjustment > TJ_SPACE_THRESHOLD && !combined.is_empty() && !ends_with_space
                    {
                        if let Some(c) = combined.chars().last() {
                            if !is_spaceless_script_char(c) {
                                combined.push(' ');
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        combined
    }

    fn decode_bytes(
        &self,
        bytes: &[u8],
        font_name: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        let encoding = fonts
            .get(font_name)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        match encoding {
            Some(ref enc) => LopdfDocument::decode_text(enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    fn normalize(&self, text: String) -> String {
        if self.normalize_unicode {
            text.nfc().collect()
        } else {
            text
        }
    }
}

/// Group runs into lines by baseline and convert them to top-down spans.
///
/// Runs are sorted top to bottom, then left to right; a run joins the
/// current line when its baseline is within 30% of its font size.
pub fn group_runs_into_lines(mut runs: Vec<PositionedRun>, page_height: f32) -> Vec<Line> {
    runs.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<Vec<PositionedRun>> = Vec::new();
    let mut current_y: Option<f32> = None;

    for run in runs {
        let tolerance = run.font_size * LINE_TOLERANCE_RATIO;
        let same_line = current_y.is_some_and(|y| (run.y - y).abs() <= tolerance);
        if same_line {
            if let Some(line) = lines.last_mut() {
                line.push(run);
                continue;
            }
        }
        current_y = Some(run.y);
        lines.push(vec![run]);
    }

    lines
        .into_iter()
        .map(|mut line_runs| {
            line_runs.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
            let spans = line_runs
                .into_iter()
                .map(|r| Span::from_font_size(r.text, r.font_size, to_top_down(r.y, page_height)))
                .collect();
            Line::new(spans)
        })
        .collect()
}

/// Convert a bottom-up baseline into a top-down position at 0.1 precision.
fn to_top_down(y: f32, page_height: f32) -> f32 {
    ((page_height - y) * 10.0).round() / 10.0
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        // No TL seen yet: assume 12pt leading.
        let leading = if leading == 0.0 { 12.0 } else { leading };
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if a character belongs to a script written without word spaces
/// (Chinese, Japanese). Korean uses spaces and is not included.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}
