//! Outline extraction pipeline.
//!
//! Font levels are profiled once per document and shared by the title
//! resolver and the outline builder; short documents then go through the
//! flyer fallback.

mod classify;
mod cluster;
mod flyer;
mod fonts;
mod options;
mod outline;
mod title;

pub use classify::{
    heading_cue, is_digits, is_heading_like, is_lower, is_separator, is_upper, HeadingCue,
    LocationReason, NoiseReason, TextClassifier,
};
pub use cluster::LineClusterer;
pub use flyer::{FlyerCandidate, FlyerFallback, FlyerScore};
pub use fonts::{FontLevels, FontStatistics};
pub use options::{
    CorpusRules, FlyerOptions, FormPageOptions, OutlineOptions, TitleOptions, PROPOSAL_TITLE,
};
pub use outline::{OutlineBuilder, OutlineDraft};
pub use title::{dedupe_title_tokens, TitleResolver};

use crate::error::Result;
use crate::model::{DocumentOutline, Page};
use crate::parser::SpanSource;

/// Extracts a title and outline from span sources.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    /// Create an extractor.
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Extract from a source, propagating source errors.
    pub fn try_extract(&self, source: &dyn SpanSource) -> Result<DocumentOutline> {
        let pages = source.pages()?;
        Ok(self.extract_pages(&pages))
    }

    /// Extract from a source; a source that fails yields the empty outline.
    pub fn extract(&self, source: &dyn SpanSource) -> DocumentOutline {
        self.try_extract(source).unwrap_or_else(|e| {
            log::warn!("Could not read document spans: {}", e);
            DocumentOutline::empty()
        })
    }

    /// Extract from pages already in memory.
    pub fn extract_pages(&self, pages: &[Page]) -> DocumentOutline {
        let levels = FontLevels::from_pages(pages, self.options.max_font_levels);
        if levels.is_empty() {
            return DocumentOutline::empty();
        }
        log::debug!("Font levels: {:?}", levels.as_slice());

        let mut title = TitleResolver::new(&self.options).resolve(pages.first(), &levels);
        let draft = OutlineBuilder::new(&self.options).build(pages, &levels, &title);

        let mut outline = draft.collapsed;
        if FlyerFallback::applies(pages.len(), outline.is_empty()) {
            outline =
                FlyerFallback::new(&self.options).resolve(pages.first(), &draft.entries, &title);
        }

        // An outline that only repeats the title says nothing
        let title_key = title.trim().to_lowercase();
        if !title_key.is_empty()
            && outline
                .iter()
                .all(|e| e.text.trim().to_lowercase() == title_key)
        {
            outline.clear();
        }

        if !title.is_empty() && !title.ends_with(' ') {
            title.push(' ');
        }
        DocumentOutline::new(title, outline)
    }
}

/// Extract an outline from pages with the given options.
pub fn extract_outline(pages: &[Page], options: &OutlineOptions) -> DocumentOutline {
    OutlineExtractor::new(options.clone()).extract_pages(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, Line, OutlineEntry};
    use crate::parser::MemorySource;

    #[test]
    fn test_empty_document() {
        let outline = OutlineExtractor::default().extract_pages(&[]);
        assert_eq!(outline, DocumentOutline::empty());

        let blank = vec![Page::new(1), Page::new(2)];
        assert_eq!(OutlineExtractor::default().extract_pages(&blank), DocumentOutline::empty());
    }

    #[test]
    fn test_flyer_document() {
        let page = Page::with_lines(
            1,
            vec![
                Line::single("RSVP: 555-0100", 20, 10.0),
                Line::single("YOU ARE INVITED!", 12, 40.0),
                Line::single("bring snacks and friends.", 10, 70.0),
            ],
        );
        let outline = OutlineExtractor::default().extract(&MemorySource::new(vec![page]));

        assert_eq!(outline.title, "");
        assert_eq!(
            outline.outline,
            vec![OutlineEntry::new(HeadingLevel::H1, "YOU ARE INVITED! ", 0)]
        );
    }

    #[test]
    fn test_outline_repeating_title_is_cleared() {
        let page = Page::with_lines(
            1,
            vec![
                Line::single("WELCOME HOME", 24, 10.0),
                Line::single("bring snacks.", 12, 40.0),
            ],
        );
        let outline = OutlineExtractor::default().extract_pages(&[page]);
        assert_eq!(outline.title, "WELCOME HOME  ");
        // The flyer headline is the title line itself
        assert!(outline.outline.is_empty());
    }

    #[test]
    fn test_multi_page_report() {
        let pages = vec![
            Page::with_lines(
                1,
                vec![
                    Line::single("Quarterly Report", 24, 20.0),
                    Line::single("Table of Contents", 14, 80.0),
                ],
            ),
            Page::with_lines(2, vec![Line::single("1. Introduction", 18, 20.0)]),
            Page::with_lines(3, vec![Line::single("1.1 Scope", 14, 20.0)]),
        ];
        let outline = extract_outline(&pages, &OutlineOptions::default());

        assert_eq!(outline.title, "Quarterly Report  ");
        let got: Vec<_> = outline
            .outline
            .iter()
            .map(|e| (e.level, e.text.as_str(), e.page))
            .collect();
        assert_eq!(
            got,
            vec![
                (HeadingLevel::H1, "Table of Contents ", 1),
                (HeadingLevel::H1, "1. Introduction ", 2),
                (HeadingLevel::H2, "1.1 Scope ", 3),
            ]
        );
    }
}
