//! Input-side types: the extracted document delivered by the collaborator.

use serde::{Deserialize, Serialize};

/// A raw positioned text fragment as delivered by the extraction
/// collaborator.
///
/// Fragments are the lowest-level unit: one style run at a known page
/// position. Raw extraction frequently splits a single visual line into
/// several fragments; the [`SpanMerger`](crate::engine::merge::SpanMerger)
/// coalesces them back into [`Span`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFragment {
    /// The fragment text
    pub text: String,

    /// Normalized font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font: String,

    /// Font size in points
    pub size: f32,

    /// Page number, consistently indexed across the document
    pub page: u32,

    /// Top edge of the bounding box
    pub top: f32,

    /// Left edge of the bounding box
    #[serde(default)]
    pub left: f32,

    /// Right edge of the bounding box
    #[serde(default)]
    pub right: f32,
}

/// A merged span: one visually contiguous run of text on a line.
///
/// Produced by the SpanMerger and immutable afterward. Downstream stages
/// only enrich spans with derived scores, never mutate these fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// The span text (fragment texts joined with single spaces)
    pub text: String,
    /// Font name of the first fragment in the run
    pub font: String,
    /// Maximum font size seen across the merged fragments
    pub size: f32,
    /// Page number
    pub page: u32,
    /// Top edge
    pub top: f32,
    /// Left edge
    pub left: f32,
    /// Right edge (extended as fragments merge)
    pub right: f32,
}

impl Span {
    /// Number of whitespace-separated words in the span text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl From<RawFragment> for Span {
    fn from(f: RawFragment) -> Self {
        Self {
            text: f.text,
            font: f.font,
            size: f.size,
            page: f.page,
            top: f.top,
            left: f.left,
            right: f.right,
        }
    }
}

/// One extracted page: its index and the fragments found on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedPage {
    /// Page number
    pub page: u32,

    /// Page width, if the extractor reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,

    /// Page height, if the extractor reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,

    /// Fragments on this page, top-to-bottom as extracted
    #[serde(default)]
    pub fragments: Vec<RawFragment>,
}

/// A fully extracted document: the engine's sole input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Document metadata title, if the source carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Total page count reported by the extractor
    #[serde(default)]
    pub total_pages: u32,

    /// Extracted pages
    #[serde(default)]
    pub pages: Vec<ExtractedPage>,
}

impl ExtractedDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate all fragments across all pages.
    pub fn fragments(&self) -> impl Iterator<Item = &RawFragment> {
        self.pages.iter().flat_map(|p| p.fragments.iter())
    }

    /// Check whether the document has any non-blank text at all.
    pub fn has_text(&self) -> bool {
        self.fragments().any(|f| !f.text.trim().is_empty())
    }

    /// Collect all non-blank fragments into a single flat list.
    pub fn all_fragments(&self) -> Vec<RawFragment> {
        self.fragments()
            .filter(|f| !f.text.trim().is_empty())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, page: u32) -> RawFragment {
        RawFragment {
            text: text.to_string(),
            font: "Helvetica".to_string(),
            size: 12.0,
            page,
            top: 100.0,
            left: 50.0,
            right: 150.0,
        }
    }

    #[test]
    fn test_document_has_text() {
        let mut doc = ExtractedDocument::new();
        assert!(!doc.has_text());

        doc.pages.push(ExtractedPage {
            page: 1,
            fragments: vec![fragment("   ", 1)],
            ..Default::default()
        });
        assert!(!doc.has_text());

        doc.pages[0].fragments.push(fragment("Hello", 1));
        assert!(doc.has_text());
    }

    #[test]
    fn test_all_fragments_skips_blank() {
        let doc = ExtractedDocument {
            pages: vec![ExtractedPage {
                page: 1,
                fragments: vec![fragment("", 1), fragment("a", 1), fragment(" \t", 1)],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(doc.all_fragments().len(), 1);
    }

    #[test]
    fn test_deserialize_minimal_fragment() {
        let json = r#"{"text": "Intro", "size": 18.0, "page": 1, "top": 40.0}"#;
        let f: RawFragment = serde_json::from_str(json).unwrap();
        assert_eq!(f.text, "Intro");
        assert_eq!(f.left, 0.0);
        assert!(f.font.is_empty());
    }
}
