//! Output-side types: heading records and the document result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level: a coarse three-tier proxy for section depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Level for a size-rank tier (0 = largest size). Ranks past the third
    /// tier have no level.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(HeadingLevel::H1),
            1 => Some(HeadingLevel::H2),
            2 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingLevel::H1 => write!(f, "H1"),
            HeadingLevel::H2 => write!(f, "H2"),
            HeadingLevel::H3 => write!(f, "H3"),
        }
    }
}

/// A single outline entry: level, text, and source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Source page
    pub page: u32,
}

impl HeadingRecord {
    /// Create a new heading record.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }

    /// Normalized text key used for deduplication.
    pub fn dedup_key(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// The externally visible artifact: a title plus an ordered outline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Resolved document title (empty for degenerate input)
    pub title: String,
    /// Ordered, deduplicated headings
    pub outline: Vec<HeadingRecord>,
}

impl DocumentResult {
    /// Create a result from a title and outline.
    pub fn new(title: impl Into<String>, outline: Vec<HeadingRecord>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// The well-formed empty result returned for degenerate input.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether this is the empty result.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }
}
