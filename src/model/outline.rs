//! Outline types produced in single-document mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hierarchical heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Level from a 1-based depth; anything deeper than 4 collapses to H4.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        }
    }

    /// 1-based depth of this level.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A single heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text, always ending in one trailing space
    pub text: String,

    /// Page number (1-indexed; 0 for the flyer fallback entry)
    pub page: u32,
}

impl OutlineEntry {
    /// Create an entry, padding the text with a trailing space if needed.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        let mut text = text.into();
        if !text.ends_with(' ') {
            text.push(' ');
        }
        Self { level, text, page }
    }
}

/// Title and outline of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title (trailing space unless empty)
    pub title: String,

    /// Headings in document order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// The empty result used for unreadable or empty documents.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if neither a title nor headings were found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }
}
