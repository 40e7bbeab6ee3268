//! Final sanitization guaranteeing the output contract.
//!
//! Runs after all inference: whatever upstream produced, the emitted result
//! has collapsed whitespace, bounded lengths, and no empty heading texts.

/// Maximum emitted title length, in characters, before truncation.
const MAX_TITLE_LEN: usize = 200;

/// Maximum emitted heading length, in characters, before truncation.
const MAX_HEADING_LEN: usize = 150;

const ELLIPSIS: &str = "...";

use crate::model::DocumentResult;

/// Enforces the output contract on a finished result.
#[derive(Debug, Default)]
pub struct OutputValidator;

impl OutputValidator {
    /// Create a validator.
    pub fn new() -> Self {
        Self
    }

    /// Sanitize the title and every heading; drop headings whose text
    /// sanitizes to empty.
    pub fn validate(&self, mut result: DocumentResult) -> DocumentResult {
        result.title = sanitize(&result.title, MAX_TITLE_LEN);
        result.outline.retain_mut(|h| {
            h.text = sanitize(&h.text, MAX_HEADING_LEN);
            !h.text.is_empty()
        });
        result
    }
}

/// Collapse internal whitespace runs to single spaces, trim, and truncate
/// to `max_len` characters with a trailing ellipsis.
fn sanitize(text: &str, max_len: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_len {
        return collapsed;
    }

    let cut = max_len.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = collapsed.chars().take(cut).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
