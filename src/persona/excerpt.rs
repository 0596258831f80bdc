//! Excerpt extraction below a section heading.

use super::options::ExcerptOptions;

/// Extract the paragraph following `heading` in a page's plain text.
///
/// The heading is found case-insensitively; a heading that cannot be found
/// yields an empty excerpt. Lines after the heading line are collected until
/// a blank line, a short all-uppercase line, or until the collected text
/// grows past the length cap. The line that crosses the cap is kept.
pub fn extract_excerpt(page_text: &str, heading: &str, options: &ExcerptOptions) -> String {
    let Some(start) = find_case_insensitive(page_text, heading) else {
        return String::new();
    };

    let mut parts: Vec<&str> = Vec::new();
    let mut joined_len = 0usize;

    for line in page_text[start..].lines().skip(1) {
        let line = line.trim();
        if line.is_empty() || is_heading_line(line, options.heading_line_len) {
            break;
        }
        if !parts.is_empty() {
            joined_len += 1;
        }
        joined_len += line.chars().count();
        parts.push(line);
        if joined_len > options.max_chars {
            break;
        }
    }

    parts.join(" ")
}

fn is_heading_line(line: &str, max_len: usize) -> bool {
    line.chars().count() < max_len && line == line.to_uppercase()
}

/// Byte offset of the first case-insensitive occurrence of `needle`.
///
/// Offsets always fall on a char boundary of `haystack`.
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| starts_with_case_insensitive(&haystack[i..], needle))
}

fn starts_with_case_insensitive(text: &str, prefix: &str) -> bool {
    let mut text = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| text.next() == Some(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "Coastal Adventures\nThe coast offers beaches.\nRent a boat in Nice.\n\nOther text";

    #[test]
    fn test_excerpt_stops_at_blank_line() {
        let excerpt = extract_excerpt(PAGE, "coastal adventures", &ExcerptOptions::default());
        assert_eq!(excerpt, "The coast offers beaches. Rent a boat in Nice.");
    }

    #[test]
    fn test_excerpt_stops_at_caps_heading() {
        let text = "Intro\nFirst line here.\nNEXT SECTION\nNot included.";
        let excerpt = extract_excerpt(text, "Intro", &ExcerptOptions::default());
        assert_eq!(excerpt, "First line here.");
    }

    #[test]
    fn test_missing_heading_gives_empty_excerpt() {
        assert_eq!(extract_excerpt(PAGE, "Nightlife", &ExcerptOptions::default()), "");
    }

    #[test]
    fn test_heading_mid_line() {
        let text = "See the City Guide below\nLyon is large.\n";
        let excerpt = extract_excerpt(text, "city guide", &ExcerptOptions::default());
        assert_eq!(excerpt, "Lyon is large.");
    }

    #[test]
    fn test_excerpt_cap_at_line_boundary() {
        let line = "a".repeat(99) + ".";
        let mut text = String::from("Heading\n");
        for _ in 0..10 {
            text.push_str(&line);
            text.push('\n');
        }

        let excerpt = extract_excerpt(&text, "Heading", &ExcerptOptions::default());
        // Seven lines join to 706 chars, the first length past 700
        assert_eq!(excerpt.len(), 7 * 100 + 6);
        assert!(excerpt.ends_with('.'));
    }

    #[test]
    fn test_find_case_insensitive_non_ascii() {
        assert_eq!(find_case_insensitive("Ça va ÉTÉ", "été"), Some(7));
        assert_eq!(find_case_insensitive("abc", "x"), None);
    }
}
