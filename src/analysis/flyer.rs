//! Single-heading fallback for short promotional documents.

use crate::model::{HeadingLevel, OutlineEntry, Page};

use super::classify::{is_upper, TextClassifier};
use super::options::{FlyerOptions, OutlineOptions};

/// Ranking key for a flyer headline candidate, compared field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FlyerScore {
    /// Contains an exclamation mark
    pub exclaims: bool,
    /// Number of promotional keywords present
    pub keyword_hits: usize,
    /// Length in characters, padding included
    pub length: usize,
}

/// A scored headline candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlyerCandidate {
    pub text: String,
    pub score: FlyerScore,
}

/// Picks a single headline for one- and two-page documents.
pub struct FlyerFallback<'a> {
    options: &'a FlyerOptions,
    classifier: TextClassifier<'a>,
}

impl<'a> FlyerFallback<'a> {
    /// Create the fallback.
    pub fn new(options: &'a OutlineOptions) -> Self {
        Self {
            options: &options.flyer,
            classifier: TextClassifier::new(&options.rules, &options.form_page),
        }
    }

    /// Check if the fallback replaces the built outline.
    pub fn applies(page_count: usize, outline_is_empty: bool) -> bool {
        page_count == 1 || (page_count == 2 && outline_is_empty)
    }

    /// Headline candidates of a page, best first. Lines equal to `title`
    /// (ignoring case) are never candidates.
    pub fn candidates(&self, page: &Page, title: &str) -> Vec<FlyerCandidate> {
        let title_key = title.trim().to_lowercase();
        let mut candidates: Vec<FlyerCandidate> = page
            .lines
            .iter()
            .filter_map(|line| {
                let text = line.text();
                if text.is_empty() || self.classifier.is_rejected(&text) {
                    return None;
                }
                let lower = text.to_lowercase();
                if lower == title_key {
                    return None;
                }
                let keyword = self.options.keywords.iter().any(|k| lower.contains(k.as_str()));
                let caps = is_upper(&text) && text.chars().count() < self.options.max_caps_len;
                (keyword || caps).then(|| self.candidate(text))
            })
            .collect();

        // Stable, so equal scores keep page order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates
    }

    fn candidate(&self, text: String) -> FlyerCandidate {
        let mut text = text;
        if !text.ends_with(' ') {
            text.push(' ');
        }
        let lower = text.to_lowercase();
        let score = FlyerScore {
            exclaims: text.contains('!'),
            keyword_hits: self
                .options
                .keywords
                .iter()
                .filter(|k| lower.contains(k.as_str()))
                .count(),
            length: text.chars().count(),
        };
        FlyerCandidate { text, score }
    }

    /// Outline to use instead of the built one.
    ///
    /// The best candidate of the first page becomes the only entry, at H1 on
    /// page 0. Without a candidate the first deduplicated entry is kept.
    pub fn resolve(
        &self,
        first_page: Option<&Page>,
        entries: &[OutlineEntry],
        title: &str,
    ) -> Vec<OutlineEntry> {
        let best = first_page.and_then(|page| self.candidates(page, title).into_iter().next());
        match best {
            Some(candidate) => {
                log::debug!("Flyer headline {:?} scored {:?}", candidate.text, candidate.score);
                vec![OutlineEntry::new(HeadingLevel::H1, candidate.text, 0)]
            }
            None => entries.first().cloned().into_iter().collect(),
        }
    }
}
