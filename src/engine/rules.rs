//! Lexical pattern rules that assert or veto heading levels independent of
//! score.
//!
//! The rules form an ordered table evaluated short-circuit: the first rule
//! with an opinion wins. Numbering assertions come before the date/version
//! vetoes, so a span matching both is judged as a numbered heading first and
//! the vetoes act as a fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::metrics::StyleMetrics;
use crate::engine::text::is_bare_numeral;
use crate::model::{HeadingLevel, Span};

/// Verdict of a single rule, or of the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleVerdict {
    /// The span is a heading at this level, overriding score-based tiers.
    Assert(HeadingLevel),
    /// The span is definitively not a heading; no further consideration.
    Veto,
    /// No opinion.
    Pass,
}

static NUMBERED_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\b").unwrap());
static NUMBERED_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\b").unwrap());
static NUMBERED_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s+\S").unwrap());
static CHAPTER_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Chapter|Section|Part)\s+\d+\s*:").unwrap());
static APPENDIX_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Appendix\s+[A-Z]\s*:").unwrap());

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}$").unwrap(),
        Regex::new(
            r"^(January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}$",
        )
        .unwrap(),
        Regex::new(
            r"^\d{1,2}\s+(January|February|March|April|May|June|July|August|September|October|November|December),?\s+\d{4}$",
        )
        .unwrap(),
    ]
});
static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(19|20)\d{2}$").unwrap());
static VERSION_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([Vv]ersion\s+\d+(\.\d+)*|v\d+(\.\d+)*)$").unwrap());

/// Check whether trimmed text reads as a calendar date or bare year.
/// Shared with the title resolver's absorption cutoff.
pub(crate) fn is_date_like(text: &str) -> bool {
    DATE_PATTERNS.iter().any(|p| p.is_match(text)) || BARE_YEAR.is_match(text)
}

/// Inputs a rule predicate sees.
struct RuleContext<'a> {
    text: &'a str,
    size: f32,
    mean_size: f32,
}

/// One table entry: a named predicate with a possible verdict.
struct Rule {
    name: &'static str,
    eval: fn(&RuleContext) -> Option<RuleVerdict>,
}

/// The ordered rule table. First opinion wins.
static RULES: &[Rule] = &[
    Rule {
        name: "short-text",
        eval: |ctx| {
            if ctx.text.chars().count() < 5 && !is_bare_numeral(ctx.text) {
                Some(RuleVerdict::Veto)
            } else {
                None
            }
        },
    },
    Rule {
        name: "numbered-h3",
        eval: |ctx| {
            if NUMBERED_H3.is_match(ctx.text) && ctx.size > ctx.mean_size {
                Some(RuleVerdict::Assert(HeadingLevel::H3))
            } else {
                None
            }
        },
    },
    Rule {
        name: "numbered-h2",
        eval: |ctx| {
            if !NUMBERED_H3.is_match(ctx.text)
                && NUMBERED_H2.is_match(ctx.text)
                && ctx.size > ctx.mean_size
            {
                Some(RuleVerdict::Assert(HeadingLevel::H2))
            } else {
                None
            }
        },
    },
    Rule {
        name: "numbered-h1",
        eval: |ctx| {
            // "<int>. Word..." needs at least two words and a noticeably
            // large size, else it reads as a list item
            if NUMBERED_H1.is_match(ctx.text)
                && !NUMBERED_H2.is_match(ctx.text)
                && ctx.text.split_whitespace().count() >= 2
                && ctx.size > ctx.mean_size * 1.2
            {
                Some(RuleVerdict::Assert(HeadingLevel::H1))
            } else {
                None
            }
        },
    },
    Rule {
        name: "chapter",
        eval: |ctx| {
            if CHAPTER_HEADING.is_match(ctx.text) {
                Some(RuleVerdict::Assert(HeadingLevel::H1))
            } else {
                None
            }
        },
    },
    Rule {
        name: "appendix",
        eval: |ctx| {
            if APPENDIX_HEADING.is_match(ctx.text) {
                Some(RuleVerdict::Assert(HeadingLevel::H2))
            } else {
                None
            }
        },
    },
    Rule {
        name: "date-veto",
        eval: |ctx| {
            if DATE_PATTERNS.iter().any(|p| p.is_match(ctx.text)) {
                Some(RuleVerdict::Veto)
            } else {
                None
            }
        },
    },
    Rule {
        name: "year-veto",
        eval: |ctx| {
            if BARE_YEAR.is_match(ctx.text) {
                Some(RuleVerdict::Veto)
            } else {
                None
            }
        },
    },
    Rule {
        name: "version-veto",
        eval: |ctx| {
            if VERSION_STRING.is_match(ctx.text) {
                Some(RuleVerdict::Veto)
            } else {
                None
            }
        },
    },
];

/// Evaluates the rule table against candidate spans.
pub struct PatternRuleEngine;

impl PatternRuleEngine {
    /// Evaluate the table on a span's trimmed text.
    pub fn evaluate(span: &Span, metrics: &StyleMetrics) -> RuleVerdict {
        let ctx = RuleContext {
            text: span.text.trim(),
            size: span.size,
            mean_size: metrics.mean_size,
        };

        for rule in RULES {
            if let Some(verdict) = (rule.eval)(&ctx) {
                log::debug!("rule {:?} fired for {:?}: {:?}", rule.name, ctx.text, verdict);
                return verdict;
            }
        }
        RuleVerdict::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f32) -> Span {
        Span {
            text: text.to_string(),
            font: String::new(),
            size,
            page: 1,
            top: 50.0,
            left: 0.0,
            right: 100.0,
        }
    }

    fn metrics(mean: f32) -> StyleMetrics {
        StyleMetrics {
            median_size: mean,
            mean_size: mean,
            significant_sizes: vec![],
        }
    }

    #[test]
    fn test_short_text_vetoed_unless_bare_numeral() {
        let m = metrics(10.0);
        assert_eq!(
            PatternRuleEngine::evaluate(&span("ab", 18.0), &m),
            RuleVerdict::Veto
        );
        // Bare numerals survive the length check and reach no other rule
        assert_eq!(
            PatternRuleEngine::evaluate(&span("7", 18.0), &m),
            RuleVerdict::Pass
        );
    }

    #[test]
    fn test_short_text_length_counts_characters() {
        let m = metrics(10.0);
        // Two CJK characters are as short a fragment as two Latin ones
        assert_eq!(
            PatternRuleEngine::evaluate(&span("概要", 18.0), &m),
            RuleVerdict::Veto
        );
        // Five characters clear the length check regardless of byte width
        assert_eq!(
            PatternRuleEngine::evaluate(&span("概要と背景", 18.0), &m),
            RuleVerdict::Pass
        );
    }

    #[test]
    fn test_numbered_heading_asserts_h1_when_large() {
        let m = metrics(10.0);
        assert_eq!(
            PatternRuleEngine::evaluate(&span("1. Overview", 14.0), &m),
            RuleVerdict::Assert(HeadingLevel::H1)
        );
        // Same text at body size is a list item: no label
        assert_eq!(
            PatternRuleEngine::evaluate(&span("1. Overview", 10.0), &m),
            RuleVerdict::Pass
        );
    }

    #[test]
    fn test_dotted_numbering_levels() {
        let m = metrics(10.0);
        assert_eq!(
            PatternRuleEngine::evaluate(&span("2.1 Methods", 12.0), &m),
            RuleVerdict::Assert(HeadingLevel::H2)
        );
        assert_eq!(
            PatternRuleEngine::evaluate(&span("2.1.3 Sampling", 12.0), &m),
            RuleVerdict::Assert(HeadingLevel::H3)
        );
        // Size gate: exactly average is not enough
        assert_eq!(
            PatternRuleEngine::evaluate(&span("2.1 Methods", 10.0), &m),
            RuleVerdict::Pass
        );
    }

    #[test]
    fn test_chapter_and_appendix_are_size_independent() {
        let m = metrics(20.0);
        assert_eq!(
            PatternRuleEngine::evaluate(&span("Chapter 4: Results", 8.0), &m),
            RuleVerdict::Assert(HeadingLevel::H1)
        );
        assert_eq!(
            PatternRuleEngine::evaluate(&span("Part 2: Analysis", 8.0), &m),
            RuleVerdict::Assert(HeadingLevel::H1)
        );
        assert_eq!(
            PatternRuleEngine::evaluate(&span("Appendix B: Raw Data", 8.0), &m),
            RuleVerdict::Assert(HeadingLevel::H2)
        );
    }

    #[test]
    fn test_vetoes() {
        let m = metrics(10.0);
        for text in [
            "12/03/2024",
            "March 15, 2024",
            "15 March 2024",
            "2019",
            "Version 2",
            "v1.3",
        ] {
            assert_eq!(
                PatternRuleEngine::evaluate(&span(text, 24.0), &m),
                RuleVerdict::Veto,
                "expected veto for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_numbering_checked_before_vetoes() {
        // A numbered heading whose body happens to look date-ish is judged
        // by the numbering rule first
        let m = metrics(10.0);
        assert_eq!(
            PatternRuleEngine::evaluate(&span("2020 Annual Report", 14.0), &m),
            RuleVerdict::Assert(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_no_opinion_for_plain_text() {
        let m = metrics(10.0);
        assert_eq!(
            PatternRuleEngine::evaluate(&span("Introduction", 18.0), &m),
            RuleVerdict::Pass
        );
    }
}
