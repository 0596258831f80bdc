//! Font size profiling.

use std::collections::BTreeMap;

use crate::model::{HeadingLevel, Page};

/// Font size histogram for a document.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Rounded font size to occurrence count
    pub size_histogram: BTreeMap<u32, usize>,
}

impl FontStatistics {
    /// Add a font size observation.
    pub fn add_size(&mut self, size: u32) {
        *self.size_histogram.entry(size).or_insert(0) += 1;
    }

    /// Add every span of every page.
    pub fn add_pages(&mut self, pages: &[Page]) {
        for span in pages.iter().flat_map(Page::spans) {
            self.add_size(span.size);
        }
    }

    /// Derive heading thresholds: distinct sizes by value, largest first.
    ///
    /// Frequency plays no part in the ordering; a size seen once on a cover
    /// page ranks above body text seen thousands of times.
    pub fn levels(&self, max_levels: usize) -> FontLevels {
        FontLevels {
            sizes: self
                .size_histogram
                .keys()
                .rev()
                .take(max_levels)
                .copied()
                .collect(),
        }
    }
}

/// Up to `max_levels` distinct font sizes, strictly descending.
///
/// Index 0 is the title size. In the font-rank fallback indices 0..=3 map to
/// H1..H4 and everything else collapses to H4.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontLevels {
    sizes: Vec<u32>,
}

impl FontLevels {
    /// Profile every span of the given pages.
    pub fn from_pages(pages: &[Page], max_levels: usize) -> Self {
        let mut stats = FontStatistics::default();
        stats.add_pages(pages);
        stats.levels(max_levels)
    }

    /// Build levels directly from sizes (deduplicated, sorted descending).
    pub fn from_sizes(sizes: &[u32]) -> Self {
        let mut sizes = sizes.to_vec();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();
        Self { sizes }
    }

    /// The largest size, used for the title.
    pub fn title_size(&self) -> Option<u32> {
        self.sizes.first().copied()
    }

    /// Position of a size among the levels.
    pub fn index_of(&self, size: u32) -> Option<usize> {
        self.sizes.iter().position(|&s| s == size)
    }

    /// Heading level implied by a font size.
    pub fn heading_level(&self, size: u32) -> HeadingLevel {
        match self.index_of(size) {
            Some(idx) if idx < 4 => HeadingLevel::from_depth(idx + 1),
            _ => HeadingLevel::H4,
        }
    }

    /// The sizes, largest first.
    pub fn as_slice(&self) -> &[u32] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;

    #[test]
    fn test_levels_ordered_by_size_not_frequency() {
        let mut stats = FontStatistics::default();
        for _ in 0..100 {
            stats.add_size(10);
        }
        stats.add_size(24);
        for _ in 0..5 {
            stats.add_size(14);
        }

        assert_eq!(stats.size_histogram[&10], 100);
        assert_eq!(stats.levels(6).as_slice(), &[24, 14, 10]);
    }

    #[test]
    fn test_levels_keep_at_most_six() {
        let levels = FontLevels::from_sizes(&[8, 9, 10, 11, 12, 14, 16, 20]);
        let mut stats = FontStatistics::default();
        for size in levels.as_slice() {
            stats.add_size(*size);
        }
        assert_eq!(stats.levels(6).as_slice(), &[20, 16, 14, 12, 11, 10]);
    }

    #[test]
    fn test_heading_level_by_rank() {
        let levels = FontLevels::from_sizes(&[24, 18, 14, 12, 11, 10]);
        assert_eq!(levels.heading_level(24), HeadingLevel::H1);
        assert_eq!(levels.heading_level(18), HeadingLevel::H2);
        assert_eq!(levels.heading_level(14), HeadingLevel::H3);
        assert_eq!(levels.heading_level(12), HeadingLevel::H4);
        assert_eq!(levels.heading_level(10), HeadingLevel::H4);
        assert_eq!(levels.heading_level(7), HeadingLevel::H4);
    }

    #[test]
    fn test_profile_empty_document() {
        let levels = FontLevels::from_pages(&[], 6);
        assert!(levels.is_empty());
        assert_eq!(levels.title_size(), None);
    }

    #[test]
    fn test_profile_counts_blank_spans() {
        let page = Page::with_lines(
            1,
            vec![Line::single("   ", 30, 0.0), Line::single("Body", 10, 20.0)],
        );
        let levels = FontLevels::from_pages(&[page], 6);
        assert_eq!(levels.as_slice(), &[30, 10]);
    }
}
