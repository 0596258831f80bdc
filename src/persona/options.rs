//! Ranking and excerpt options.

/// Keywords mapped to an importance rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRule {
    /// Importance rank, 1 is most relevant
    pub rank: u32,

    /// Lowercase substrings that select this rank
    pub keywords: Vec<String>,
}

impl RankRule {
    /// Create a rule.
    pub fn new(rank: u32, keywords: &[&str]) -> Self {
        Self {
            rank,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Check if the lowercased title contains one of the keywords.
    pub fn matches(&self, lower_title: &str) -> bool {
        self.keywords.iter().any(|k| lower_title.contains(k.as_str()))
    }
}

/// Excerpt extraction limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcerptOptions {
    /// Stop once the joined excerpt is longer than this
    pub max_chars: usize,

    /// Uppercase lines shorter than this end the excerpt
    pub heading_line_len: usize,
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        Self {
            max_chars: 700,
            heading_line_len: 100,
        }
    }
}

/// Options for multi-document ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankOptions {
    /// Rules tried in order; the first match gives the rank
    pub rules: Vec<RankRule>,

    /// Rank of titles no rule matches
    pub unmatched_rank: u32,

    /// Candidates per document that get scored
    pub per_document: usize,

    /// Highest rank kept
    pub max_rank: u32,

    /// Sections kept across all documents
    pub max_sections: usize,

    /// Qualifying line length bounds, both exclusive
    pub min_line_len: usize,
    pub max_line_len: usize,

    /// Excerpt limits
    pub excerpt: ExcerptOptions,

    /// Read documents in parallel
    pub parallel: bool,
}

impl RankOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rank table.
    pub fn with_rules(mut self, rules: Vec<RankRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Set the number of sections kept.
    pub fn with_max_sections(mut self, max: usize) -> Self {
        self.max_sections = max;
        self
    }

    /// Set excerpt limits.
    pub fn with_excerpt(mut self, excerpt: ExcerptOptions) -> Self {
        self.excerpt = excerpt;
        self
    }

    /// Read documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Rank of a section title.
    pub fn rank_of(&self, title: &str) -> u32 {
        let lower = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map_or(self.unmatched_rank, |rule| rule.rank)
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            rules: vec![
                RankRule::new(1, &["guide", "major cities", "overview"]),
                RankRule::new(2, &["things to do", "coastal adventure", "activities"]),
                RankRule::new(3, &["cuisine", "culinary", "wine"]),
                RankRule::new(4, &["tips", "tricks", "packing"]),
                RankRule::new(5, &["nightlife", "entertainment"]),
            ],
            unmatched_rank: 10,
            per_document: 7,
            max_rank: 5,
            max_sections: 5,
            min_line_len: 6,
            max_line_len: 90,
            excerpt: ExcerptOptions::default(),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_of() {
        let options = RankOptions::default();
        assert_eq!(options.rank_of("City Guide"), 1);
        assert_eq!(options.rank_of("Coastal Adventures"), 2);
        assert_eq!(options.rank_of("Wine Tasting"), 3);
        assert_eq!(options.rank_of("Nightlife Tips"), 4);
        assert_eq!(options.rank_of("Late Entertainment"), 5);
        assert_eq!(options.rank_of("Random Notes"), 10);
    }

    #[test]
    fn test_first_rule_wins() {
        // "guide" outranks "wine"
        assert_eq!(RankOptions::default().rank_of("Wine Guide"), 1);
    }
}
