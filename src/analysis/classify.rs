//! Text classification predicates.
//!
//! Each predicate works on trimmed text and reports the first rule that
//! fired, so individual rules can be tested and logged in isolation.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::Page;

use super::options::{CorpusRules, FormPageOptions};

static RELATIONSHIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^relationship\s*\d").unwrap());
static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z ]+,?\s*\d{5,6}$").unwrap());
static CITY_STATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+, [A-Z]{2,}").unwrap());
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]?\d+(\.\d+)*[.:]?\s").unwrap());

const BULLET_PREFIXES: [char; 5] = ['●', '-', '•', '*', 'o'];

/// Why a line was classified as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseReason {
    /// "relationship 1" style form rows
    Relationship,
    /// Starts with a known boilerplate prefix
    Boilerplate,
    /// Page number marker
    PageMarker,
    /// Contains an "address:" label
    AddressLabel,
    /// A known form label
    KnownLabel,
    /// Fewer than three ASCII letters
    TooFewLetters,
    /// URL or web address
    Link,
    /// Address or place line
    Location(LocationReason),
}

/// Why a line was classified as an address or location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationReason {
    /// Uppercase words followed by a postal code
    PostalCode,
    /// "City, STATE"
    CityState,
    /// Mentions a known place
    KnownPlace,
    /// Ends with a known "STATE ZIP"
    StateZip,
    /// RSVP line
    Rsvp,
}

/// What made a line look like a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingCue {
    /// Explicit numbering such as "2.1 " or "A3: "
    Numbered,
    /// Short line ending in a colon
    Colon,
    /// All uppercase
    AllCaps,
    /// Starts uppercase without sentence punctuation at the end
    Capitalized,
    /// Few words without sentence punctuation at the end
    ShortPhrase,
}

/// Noise, location and form-page classifier parameterised by corpus rules.
#[derive(Debug, Clone, Copy)]
pub struct TextClassifier<'a> {
    rules: &'a CorpusRules,
    form_page: &'a FormPageOptions,
}

impl<'a> TextClassifier<'a> {
    /// Create a classifier.
    pub fn new(rules: &'a CorpusRules, form_page: &'a FormPageOptions) -> Self {
        Self { rules, form_page }
    }

    /// First noise rule matching the text, if any.
    pub fn noise_reason(&self, text: &str) -> Option<NoiseReason> {
        let t = text.trim();
        let lower = t.to_lowercase();

        if RELATIONSHIP.is_match(&lower) {
            return Some(NoiseReason::Relationship);
        }
        if self
            .rules
            .boilerplate_prefixes
            .iter()
            .any(|p| lower.starts_with(p.as_str()))
        {
            return Some(NoiseReason::Boilerplate);
        }
        if lower.starts_with("page ") {
            return Some(NoiseReason::PageMarker);
        }
        if lower.contains("address:") {
            return Some(NoiseReason::AddressLabel);
        }
        if self.rules.known_labels.iter().any(|l| *l == lower) {
            return Some(NoiseReason::KnownLabel);
        }
        if t.chars().filter(char::is_ascii_alphabetic).count() < 3 {
            return Some(NoiseReason::TooFewLetters);
        }
        if lower.contains("www.") || lower.contains("http") {
            return Some(NoiseReason::Link);
        }
        self.location_reason(t).map(NoiseReason::Location)
    }

    /// Check if the text is noise.
    pub fn is_noise(&self, text: &str) -> bool {
        self.noise_reason(text).is_some()
    }

    /// First location rule matching the text, if any.
    pub fn location_reason(&self, text: &str) -> Option<LocationReason> {
        let t = text.trim();
        let lower = t.to_lowercase();

        if POSTAL_CODE.is_match(t) {
            return Some(LocationReason::PostalCode);
        }
        if CITY_STATE.is_match(t) {
            return Some(LocationReason::CityState);
        }
        if self
            .rules
            .known_places
            .iter()
            .any(|p| lower.contains(p.as_str()))
        {
            return Some(LocationReason::KnownPlace);
        }
        if self
            .rules
            .state_zip_suffixes
            .iter()
            .any(|s| t.ends_with(s.as_str()))
        {
            return Some(LocationReason::StateZip);
        }
        if lower.contains("rsvp") {
            return Some(LocationReason::Rsvp);
        }
        None
    }

    /// Check if the text is an address or location line.
    pub fn is_location(&self, text: &str) -> bool {
        self.location_reason(text).is_some()
    }

    /// Check if the text is noise or a location line.
    pub fn is_rejected(&self, text: &str) -> bool {
        self.is_noise(text) || self.is_location(text)
    }

    /// Check if a page is dominated by short label-like runs.
    pub fn is_form_page(&self, page: &Page) -> bool {
        let mut runs = 0usize;
        let mut labels = 0usize;

        for span in page.spans() {
            let t = span.text.trim();
            if t.is_empty() {
                continue;
            }
            runs += 1;
            if t.chars().count() <= self.form_page.max_label_len
                && (t.contains(':') || t.split_whitespace().count() < self.form_page.label_word_limit)
            {
                labels += 1;
            }
        }

        runs > self.form_page.min_runs
            && labels as f32 / runs as f32 > self.form_page.label_ratio
    }
}

/// First heading cue matching the text, if any.
pub fn heading_cue(text: &str) -> Option<HeadingCue> {
    let t = text.trim();
    let len = t.chars().count();
    if len < 3 || t.starts_with(BULLET_PREFIXES) {
        return None;
    }

    let sentence_end = t.ends_with(['.', ';']);

    if NUMBERED.is_match(t) {
        Some(HeadingCue::Numbered)
    } else if t.ends_with(':') && len <= 60 {
        Some(HeadingCue::Colon)
    } else if len > 5 && is_upper(t) {
        Some(HeadingCue::AllCaps)
    } else if t.chars().next().is_some_and(char::is_uppercase) && !sentence_end {
        Some(HeadingCue::Capitalized)
    } else if t.split_whitespace().count() <= 15 && !sentence_end {
        Some(HeadingCue::ShortPhrase)
    } else {
        None
    }
}

/// Check if the text looks like a heading.
pub fn is_heading_like(text: &str) -> bool {
    heading_cue(text).is_some()
}

/// At least one cased character and none of them lowercase.
pub fn is_upper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        cased |= c.is_uppercase();
    }
    cased
}

/// At least one cased character and none of them uppercase.
pub fn is_lower(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            return false;
        }
        cased |= c.is_lowercase();
    }
    cased
}

/// Non-empty and made only of digits.
pub fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_numeric)
}

/// Non-empty and made only of `-`, `:` and spaces.
pub fn is_separator(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| matches!(c, '-' | ':' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;

    fn classify<T>(f: impl FnOnce(&TextClassifier<'_>) -> T) -> T {
        let rules = CorpusRules::default();
        let form = FormPageOptions::default();
        f(&TextClassifier::new(&rules, &form))
    }

    #[test]
    fn test_noise_reasons() {
        classify(|c| {
            assert_eq!(c.noise_reason("Relationship 2"), Some(NoiseReason::Relationship));
            assert_eq!(c.noise_reason("PAY + SI + NPA rules"), Some(NoiseReason::Boilerplate));
            assert_eq!(c.noise_reason("Page 3 of 12"), Some(NoiseReason::PageMarker));
            assert_eq!(c.noise_reason("Home Address: 12"), Some(NoiseReason::AddressLabel));
            assert_eq!(c.noise_reason("Regular Pathway"), Some(NoiseReason::KnownLabel));
            assert_eq!(c.noise_reason("1.2 (a)"), Some(NoiseReason::TooFewLetters));
            assert_eq!(c.noise_reason("Visit www.example.com"), Some(NoiseReason::Link));
            assert_eq!(
                c.noise_reason("PIGEON FORGE, TN 37863"),
                Some(NoiseReason::Location(LocationReason::KnownPlace))
            );
            assert_eq!(c.noise_reason("Revision History"), None);
        });
    }

    #[test]
    fn test_location_reasons() {
        classify(|c| {
            assert_eq!(c.location_reason("TORONTO 123456"), Some(LocationReason::PostalCode));
            assert_eq!(c.location_reason("Parsippany, NJ"), Some(LocationReason::CityState));
            assert_eq!(c.location_reason("near Pigeon Forge"), Some(LocationReason::KnownPlace));
            assert_eq!(c.location_reason("3735 Parkway TN 37863"), Some(LocationReason::StateZip));
            assert_eq!(c.location_reason("Suite 4 NJ 07054"), Some(LocationReason::StateZip));
            assert_eq!(c.location_reason("Please RSVP by Friday"), Some(LocationReason::Rsvp));
            assert_eq!(c.location_reason("Introduction"), None);
        });
    }

    #[test]
    fn test_corpus_rules_can_be_disabled() {
        let rules = CorpusRules::none();
        let form = FormPageOptions::default();
        let c = TextClassifier::new(&rules, &form);

        assert!(!c.is_noise("Regular Pathway"));
        assert!(!c.is_noise("pay + si + npa rules"));
        assert!(!c.is_location("Suite 4 NJ 07054"));
        // General rules stay on
        assert!(c.is_noise("Page 2"));
        assert!(c.is_location("Please RSVP"));
    }

    #[test]
    fn test_heading_cues() {
        assert_eq!(heading_cue("2.3.1 Something"), Some(HeadingCue::Numbered));
        assert_eq!(heading_cue("A1. Scope"), Some(HeadingCue::Numbered));
        assert_eq!(heading_cue("what is covered:"), Some(HeadingCue::Colon));
        assert_eq!(heading_cue("SUMMARY OF FINDINGS"), Some(HeadingCue::AllCaps));
        assert_eq!(heading_cue("Background"), Some(HeadingCue::Capitalized));
        assert_eq!(heading_cue("the business plan"), Some(HeadingCue::ShortPhrase));
    }

    #[test]
    fn test_heading_rejections() {
        assert!(!is_heading_like(""));
        assert!(!is_heading_like("ab"));
        assert!(!is_heading_like("• Bullet item"));
        assert!(!is_heading_like("- dash item"));
        assert!(!is_heading_like("overview of things"));
        assert!(!is_heading_like("this ends like a sentence."));
        let long = "word ".repeat(16);
        assert!(!is_heading_like(&long));
    }

    #[test]
    fn test_case_predicates() {
        assert!(is_upper("YOU ARE INVITED!"));
        assert!(!is_upper("1234"));
        assert!(!is_upper("Mixed"));
        assert!(is_lower("all lower 12"));
        assert!(!is_lower("12 34"));
        assert!(is_digits("2024"));
        assert!(!is_digits(""));
        assert!(is_separator("- : -"));
        assert!(!is_separator("-a-"));
    }

    #[test]
    fn test_form_page_detection() {
        let labels = ["Name:", "Date", "Designation", "Service", "PAY", "Amount", "Signature", "Place", "Home Town", "Block Year"];
        let form = Page::with_lines(
            1,
            labels
                .iter()
                .enumerate()
                .map(|(i, t)| Line::single(*t, 10, i as f32 * 12.0))
                .collect(),
        );
        classify(|c| assert!(c.is_form_page(&form)));

        // Too few runs to be a form
        let short = Page::with_lines(1, form.lines[..8].to_vec());
        classify(|c| assert!(!c.is_form_page(&short)));

        let mut prose = form.clone();
        for i in 0..10 {
            prose.add_line(Line::single(
                "This paragraph explains the background of the project in detail.",
                10,
                200.0 + i as f32 * 12.0,
            ));
        }
        classify(|c| assert!(!c.is_form_page(&prose)));
    }
}
