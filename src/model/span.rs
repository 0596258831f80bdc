//! Layout-level types: spans, lines and pages.

use serde::{Deserialize, Serialize};

/// A run of text sharing one font size at one vertical position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,

    /// Rounded font size
    pub size: u32,

    /// Vertical position, measured top-down
    pub y: f32,
}

impl Span {
    /// Create a new span with an already rounded size.
    pub fn new(text: impl Into<String>, size: u32, y: f32) -> Self {
        Self {
            text: text.into(),
            size,
            y,
        }
    }

    /// Create a span from a raw font size, rounding it half-to-even.
    pub fn from_font_size(text: impl Into<String>, font_size: f32, y: f32) -> Self {
        Self::new(text, round_font_size(font_size), y)
    }

    /// Check if the span has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Round a font size to an integer, ties going to the even neighbour.
///
/// `10.5` rounds to `10` and `11.5` to `12`, so sizes that sit exactly
/// between two points are bucketed the same way across documents.
pub fn round_font_size(size: f32) -> u32 {
    if !size.is_finite() || size <= 0.0 {
        return 0;
    }
    size.round_ties_even() as u32
}

/// One visual row of spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Create a single-span line.
    pub fn single(text: impl Into<String>, size: u32, y: f32) -> Self {
        Self::new(vec![Span::new(text, size, y)])
    }

    /// Normalized text of the line.
    ///
    /// Non-blank span texts are trimmed and joined with one space, then
    /// whitespace is collapsed and a space before `!` is dropped.
    pub fn text(&self) -> String {
        let joined = self
            .spans
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        normalize_line_text(&joined)
    }

    /// Trimmed span texts joined with one space, blank spans included.
    pub fn raw_text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Largest size among the non-blank spans.
    pub fn max_size(&self) -> Option<u32> {
        self.spans
            .iter()
            .filter(|s| !s.is_blank())
            .map(|s| s.size)
            .max()
    }

    /// Largest size among all spans.
    pub fn max_size_any(&self) -> Option<u32> {
        self.spans.iter().map(|s| s.size).max()
    }

    /// Topmost span position, or `0.0` for an empty line.
    pub fn y(&self) -> f32 {
        self.spans
            .iter()
            .map(|s| s.y)
            .reduce(f32::min)
            .unwrap_or(0.0)
    }

    /// Check if every span is blank.
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(Span::is_blank)
    }
}

/// Collapse whitespace runs to one space, glue `" !"` to `"!"` and trim.
pub fn normalize_line_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" !", "!")
}

/// A page of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Lines in top-to-bottom order
    pub lines: Vec<Line>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            lines: Vec::new(),
        }
    }

    /// Create a page from lines.
    pub fn with_lines(number: u32, lines: Vec<Line>) -> Self {
        Self { number, lines }
    }

    /// Add a line to the page.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Iterate over every span on the page.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }

    /// Check if the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_font_size_half_even() {
        assert_eq!(round_font_size(10.5), 10);
        assert_eq!(round_font_size(11.5), 12);
        assert_eq!(round_font_size(11.51), 12);
        assert_eq!(round_font_size(9.49), 9);
        assert_eq!(round_font_size(f32::NAN), 0);
        assert_eq!(round_font_size(-3.0), 0);
    }

    #[test]
    fn test_line_text_normalization() {
        let line = Line::new(vec![
            Span::new("  YOU ARE ", 20, 10.0),
            Span::new("   ", 20, 10.0),
            Span::new("INVITED  !", 20, 10.0),
        ]);
        assert_eq!(line.text(), "YOU ARE INVITED!");
        assert_eq!(line.raw_text(), "YOU ARE  INVITED  !");
    }

    #[test]
    fn test_line_max_size_ignores_blank_spans() {
        let line = Line::new(vec![Span::new(" ", 30, 0.0), Span::new("Intro", 14, 0.0)]);
        assert_eq!(line.max_size(), Some(14));
        assert_eq!(line.max_size_any(), Some(30));

        let blank = Line::new(vec![Span::new("  ", 12, 0.0)]);
        assert!(blank.is_blank());
        assert_eq!(blank.max_size(), None);
    }

    #[test]
    fn test_page_spans() {
        let mut page = Page::new(1);
        page.add_line(Line::single("A", 12, 1.0));
        page.add_line(Line::new(vec![
            Span::new("B", 12, 2.0),
            Span::new("C", 12, 2.0),
        ]));
        assert_eq!(page.spans().count(), 3);
        assert!(!page.is_empty());
    }
}
