//! Relevance ranking of section headings across documents.

use std::collections::HashSet;

use crate::analysis::{is_digits, is_lower};
use crate::model::{Page, SectionCandidate};

use super::options::RankOptions;

/// A line that may be a section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingCandidate {
    pub text: String,
    pub page: u32,
    pub size: u32,
}

/// Heading candidates of one document, largest first.
///
/// Lines qualify by length and casing alone. Candidates are ordered by size
/// descending then page ascending, with ties in document order, and repeated
/// texts keep only their first occurrence.
pub fn heading_candidates(pages: &[Page], options: &RankOptions) -> Vec<HeadingCandidate> {
    let mut candidates = Vec::new();

    for page in pages {
        for line in &page.lines {
            let raw = line.raw_text();
            let len = raw.chars().count();
            if len <= options.min_line_len || len >= options.max_line_len {
                continue;
            }
            if is_lower(&raw) || is_digits(&raw) {
                continue;
            }
            let Some(size) = line.max_size_any() else {
                continue;
            };
            candidates.push(HeadingCandidate {
                text: raw.trim().to_string(),
                page: page.number,
                size,
            });
        }
    }

    candidates.sort_by(|a, b| b.size.cmp(&a.size).then(a.page.cmp(&b.page)));

    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(c.text.clone()));
    candidates
}

/// Score the leading candidates of one document and keep the relevant ones.
pub fn rank_document(
    document: &str,
    candidates: &[HeadingCandidate],
    options: &RankOptions,
) -> Vec<SectionCandidate> {
    candidates
        .iter()
        .take(options.per_document)
        .filter_map(|c| {
            let rank = options.rank_of(&c.text);
            (rank <= options.max_rank).then(|| SectionCandidate {
                document: document.to_string(),
                section_title: c.text.clone(),
                importance_rank: rank,
                page_number: c.page,
            })
        })
        .collect()
}

/// Pick the best sections from candidates pooled in document order.
pub fn select_sections(
    mut pooled: Vec<SectionCandidate>,
    options: &RankOptions,
) -> Vec<SectionCandidate> {
    pooled.sort_by(|a, b| {
        a.importance_rank
            .cmp(&b.importance_rank)
            .then(a.page_number.cmp(&b.page_number))
    });
    pooled.truncate(options.max_sections);
    pooled
}
