//! JSON rendering for analysis results.

use crate::error::{Error, Result};
use crate::model::DocumentResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an analysis result to JSON.
pub fn to_json(result: &DocumentResult, format: JsonFormat) -> Result<String> {
    let rendered = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    rendered.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, HeadingRecord};

    #[test]
    fn test_to_json_pretty() {
        let result = DocumentResult::new(
            "Test",
            vec![HeadingRecord::new(HeadingLevel::H1, "Intro", 1)],
        );

        let json = to_json(&result, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"H1\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&DocumentResult::empty(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }
}
