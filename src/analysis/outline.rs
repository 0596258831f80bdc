//! Outline building: level assignment and deduplication.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::model::{HeadingLevel, OutlineEntry, Page};

use super::classify::{is_heading_like, TextClassifier};
use super::fonts::FontLevels;
use super::options::OutlineOptions;

static NUMBERED_H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+").unwrap());
static NUMBERED_H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+").unwrap());
static NUMBERED_H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").unwrap());

/// Headings found by the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineDraft {
    /// Entries unique by (level, text, page), in document order
    pub entries: Vec<OutlineEntry>,

    /// `entries` with consecutive repeats of (level, text) collapsed
    pub collapsed: Vec<OutlineEntry>,
}

/// Scans pages for heading lines and assigns levels.
pub struct OutlineBuilder<'a> {
    options: &'a OutlineOptions,
    classifier: TextClassifier<'a>,
}

impl<'a> OutlineBuilder<'a> {
    /// Create a builder.
    pub fn new(options: &'a OutlineOptions) -> Self {
        Self {
            options,
            classifier: TextClassifier::new(&options.rules, &options.form_page),
        }
    }

    /// Build the outline of `pages`, leaving out lines equal to `title`.
    pub fn build(&self, pages: &[Page], levels: &FontLevels, title: &str) -> OutlineDraft {
        let title_key = title.trim().to_lowercase();
        let mut seen: HashSet<(HeadingLevel, String, u32)> = HashSet::new();
        let mut entries = Vec::new();

        for page in pages {
            if self.classifier.is_form_page(page) {
                log::debug!("Skipping form page {}", page.number);
                continue;
            }

            for line in &page.lines {
                let text = line.text();
                if text.is_empty() || self.classifier.is_rejected(&text) {
                    continue;
                }
                if text.trim().to_lowercase() == title_key {
                    continue;
                }
                let Some(size) = line.max_size() else {
                    continue;
                };

                let level = self
                    .level_by_numbering(&text)
                    .unwrap_or_else(|| levels.heading_level(size));

                if !is_heading_like(&text) {
                    continue;
                }
                let entry = OutlineEntry::new(level, text, page.number);
                if self.classifier.is_rejected(&entry.text) {
                    continue;
                }
                if seen.insert((entry.level, entry.text.clone(), entry.page)) {
                    entries.push(entry);
                }
            }
        }

        let collapsed = collapse_repeats(&entries);
        OutlineDraft { entries, collapsed }
    }

    /// Level implied by canonical section names or explicit numbering.
    pub fn level_by_numbering(&self, text: &str) -> Option<HeadingLevel> {
        let t = text.trim();
        let lower = t.to_lowercase();

        if self.options.canonical_sections.iter().any(|s| *s == lower) {
            Some(HeadingLevel::H1)
        } else if NUMBERED_H3.is_match(t) {
            Some(HeadingLevel::H3)
        } else if NUMBERED_H2.is_match(t) {
            Some(HeadingLevel::H2)
        } else if NUMBERED_H1.is_match(t) {
            Some(HeadingLevel::H1)
        } else {
            None
        }
    }
}

/// Drop entries repeating the (level, text) of the entry kept before them.
fn collapse_repeats(entries: &[OutlineEntry]) -> Vec<OutlineEntry> {
    let mut collapsed: Vec<OutlineEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let repeat = collapsed
            .last()
            .is_some_and(|last| last.level == entry.level && last.text == entry.text);
        if !repeat {
            collapsed.push(entry.clone());
        }
    }
    collapsed
}
