//! Title resolution from the first page.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::Page;

use super::classify::TextClassifier;
use super::cluster::LineClusterer;
use super::fonts::FontLevels;
use super::options::{OutlineOptions, TitleOptions};

static TOKEN_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\-]+").unwrap());
static PROPOSAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)RFP[:\s\-]+.*?Proposal").unwrap());

/// Resolves a document title from the largest text on its first page.
pub struct TitleResolver<'a> {
    options: &'a OutlineOptions,
    classifier: TextClassifier<'a>,
}

impl<'a> TitleResolver<'a> {
    /// Create a resolver.
    pub fn new(options: &'a OutlineOptions) -> Self {
        Self {
            options,
            classifier: TextClassifier::new(&options.rules, &options.form_page),
        }
    }

    /// Resolve the title, ending in two spaces, or an empty string.
    pub fn resolve(&self, first_page: Option<&Page>, levels: &FontLevels) -> String {
        let (Some(page), Some(size)) = (first_page, levels.title_size()) else {
            return String::new();
        };

        let lines: Vec<String> = LineClusterer::new(self.options.title.cluster_tolerance)
            .title_lines(page, size)
            .into_iter()
            .filter(|line| !self.classifier.is_rejected(line))
            .collect();

        let title = self.compose(&lines);
        if self.classifier.is_rejected(&title) || title.to_lowercase().starts_with("rsvp") {
            log::debug!("Discarding title candidate {:?}", title);
            return String::new();
        }
        title
    }

    fn compose(&self, lines: &[String]) -> String {
        let deduped = dedupe_title_tokens(lines, &self.options.title);

        if let Some(replacement) = &self.options.rules.proposal_title {
            if deduped.contains("RFP")
                && deduped.contains("Proposal")
                && PROPOSAL.is_match(&deduped)
            {
                return replacement.clone();
            }
        }

        if deduped.is_empty() {
            return String::new();
        }
        let mut title = deduped.split_whitespace().collect::<Vec<_>>().join(" ");
        title.push_str("  ");
        title
    }
}

/// Join title lines and drop repeated tokens left by overlapping runs.
///
/// A token is dropped when it is among the last `repeat_window` kept tokens,
/// when it is shorter than `short_token_len` and was kept before, or when it
/// is one or two characters long and equals the previous kept token.
pub fn dedupe_title_tokens(lines: &[String], options: &TitleOptions) -> String {
    let joined = lines.join(" ");
    let mut kept: Vec<&str> = Vec::new();

    for token in TOKEN_SEPARATOR.split(&joined) {
        if token.is_empty() {
            continue;
        }
        let len = token.chars().count();
        let window = &kept[kept.len().saturating_sub(options.repeat_window)..];
        if window.contains(&token) || (len < options.short_token_len && kept.contains(&token)) {
            continue;
        }
        if len <= 2 && kept.last() == Some(&token) {
            continue;
        }
        kept.push(token);
    }

    kept.join(" ")
}
