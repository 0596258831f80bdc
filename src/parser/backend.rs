//! Span source abstraction layer.
//!
//! Provides a trait-based interface for the layout data the analysis stages
//! consume, isolating the concrete PDF library (lopdf) from the heuristics.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::Page;

/// Abstract interface for per-page text layout.
///
/// Implementations yield pages of lines of spans, and the plain text of a
/// single page for excerpt extraction.
pub trait SpanSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Return every page in order, each with its lines top to bottom.
    fn pages(&self) -> Result<Vec<Page>>;

    /// Return the plain text of one page (1-indexed).
    fn page_text(&self, page_num: u32) -> Result<String>;
}

/// In-memory [`SpanSource`] over pre-built pages.
///
/// Useful for callers that run their own extraction, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Page>,
    texts: HashMap<u32, String>,
}

impl MemorySource {
    /// Create a source from pages.
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            texts: HashMap::new(),
        }
    }

    /// Override the plain text returned for a page.
    ///
    /// Without an override the page text is its line texts joined by newlines.
    pub fn with_page_text(mut self, page_num: u32, text: impl Into<String>) -> Self {
        self.texts.insert(page_num, text.into());
        self
    }
}

impl SpanSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn pages(&self) -> Result<Vec<Page>> {
        Ok(self.pages.clone())
    }

    fn page_text(&self, page_num: u32) -> Result<String> {
        if let Some(text) = self.texts.get(&page_num) {
            return Ok(text.clone());
        }

        let page = self
            .pages
            .iter()
            .find(|p| p.number == page_num)
            .ok_or(Error::PageOutOfRange(page_num, self.page_count()))?;

        Ok(page
            .lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Simple text decoding fallback when no font encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
