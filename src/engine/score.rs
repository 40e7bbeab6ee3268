//! Candidate scoring: heading likelihood from size, position, and shape.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::config::EngineConfig;
use crate::engine::metrics::StyleMetrics;
use crate::engine::text::{is_all_caps, is_title_case, is_western};
use crate::model::Span;

/// Structural numbering/caption patterns worth the full content score.
static STRUCTURAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d+\.?\s+[A-Z]").unwrap(),
        Regex::new(r"^[IVX]+\.?\s+[A-Z]").unwrap(),
        Regex::new(r"^(Chapter|Section|Part)\s+\d+").unwrap(),
        Regex::new(r"^Appendix\s+[A-Z]").unwrap(),
    ]
});

/// A span that survived scoring, enriched with its heading likelihood.
///
/// Exists only transiently between scoring and level assignment.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The underlying span
    pub span: Span,
    /// Heading likelihood in (0, 1]
    pub heading_score: f32,
}

/// Assigns heading-likelihood scores and filters low-scoring spans.
pub struct CandidateScorer<'a> {
    config: &'a EngineConfig,
    metrics: &'a StyleMetrics,
}

impl<'a> CandidateScorer<'a> {
    /// Create a scorer over the document's style metrics.
    pub fn new(config: &'a EngineConfig, metrics: &'a StyleMetrics) -> Self {
        Self { config, metrics }
    }

    /// Score every span, keeping only those above the cutoff.
    pub fn score_candidates(&self, spans: &[Span]) -> Vec<Candidate> {
        spans
            .iter()
            .filter_map(|span| {
                let score = self.score_span(span);
                if score > self.config.score_cutoff {
                    Some(Candidate {
                        span: span.clone(),
                        heading_score: score,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Weighted score: typography dominates, placement is secondary, and
    /// lexical shape is a minor signal.
    pub fn score_span(&self, span: &Span) -> f32 {
        let size_score = if self.metrics.is_significant(span.size) {
            (span.size / (self.metrics.median_size * 2.5)).min(1.0)
        } else {
            0.0
        };

        let position_score = (1.0 - span.top / self.config.page_height).max(0.0);
        let content_score = self.content_score(&span.text);

        let mut score = size_score * self.config.size_weight
            + position_score * self.config.position_weight
            + content_score * self.config.content_weight;

        // Long runs are unlikely headings
        if span.text.chars().count() > self.config.long_text_len {
            score *= 0.5;
        }

        score
    }

    fn content_score(&self, text: &str) -> f32 {
        if STRUCTURAL_PATTERNS.iter().any(|p| p.is_match(text)) {
            return 0.5;
        }
        if is_western(text) {
            if is_all_caps(text) {
                return 0.4;
            }
            if is_title_case(text) {
                return 0.2;
            }
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f32, top: f32) -> Span {
        Span {
            text: text.to_string(),
            font: "Helvetica".to_string(),
            size,
            page: 1,
            top,
            left: 50.0,
            right: 200.0,
        }
    }

    fn metrics_for(spans: &[Span]) -> StyleMetrics {
        StyleMetrics::compute(spans, &EngineConfig::default())
    }

    #[test]
    fn test_large_caps_near_top_scores_high() {
        let spans = vec![
            span("INTRODUCTION", 18.0, 50.0),
            span("This is body text.", 10.0, 120.0),
            span("More body text here.", 10.0, 150.0),
        ];
        let config = EngineConfig::default();
        let metrics = metrics_for(&spans);
        let scorer = CandidateScorer::new(&config, &metrics);

        let candidates = scorer.score_candidates(&spans);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].span.text, "INTRODUCTION");
        assert!(candidates[0].heading_score > 0.35);
    }

    #[test]
    fn test_body_text_never_surfaces() {
        let spans = vec![
            span("INTRODUCTION", 18.0, 50.0),
            span("This is body text.", 10.0, 120.0),
        ];
        let config = EngineConfig::default();
        let metrics = metrics_for(&spans);
        let scorer = CandidateScorer::new(&config, &metrics);

        // Body size is not significant: size_score 0, position only
        let body_score = scorer.score_span(&spans[1]);
        assert!(body_score <= 0.35);
    }

    #[test]
    fn test_structural_pattern_beats_case_shape() {
        let spans = vec![span("1. Overview", 14.0, 50.0), span("body", 10.0, 300.0)];
        let config = EngineConfig::default();
        let metrics = metrics_for(&spans);
        let scorer = CandidateScorer::new(&config, &metrics);

        assert_eq!(scorer.content_score("1. Overview"), 0.5);
        assert_eq!(scorer.content_score("OVERVIEW"), 0.4);
        assert_eq!(scorer.content_score("Quick Overview"), 0.2);
        assert_eq!(scorer.content_score("plain body text"), 0.0);
    }

    #[test]
    fn test_long_text_penalty() {
        let long_text = "A ".repeat(100);
        let spans = vec![span(&long_text, 18.0, 50.0), span("x", 10.0, 300.0)];
        let config = EngineConfig::default();
        let metrics = metrics_for(&spans);
        let scorer = CandidateScorer::new(&config, &metrics);

        let short = scorer.score_span(&span("A A", 18.0, 50.0));
        let long = scorer.score_span(&spans[0]);
        assert!(long < short);
    }

    #[test]
    fn test_long_text_penalty_counts_characters() {
        let spans = vec![span("概要", 18.0, 50.0), span("body text", 10.0, 300.0)];
        let config = EngineConfig::default();
        let metrics = metrics_for(&spans);
        let scorer = CandidateScorer::new(&config, &metrics);

        // 60 CJK characters are 180 bytes but not a long line
        let base = scorer.score_span(&span("概要", 18.0, 50.0));
        let sixty = scorer.score_span(&span(&"概".repeat(60), 18.0, 50.0));
        let overlong = scorer.score_span(&span(&"概".repeat(200), 18.0, 50.0));

        assert_eq!(sixty, base);
        assert!(overlong < sixty);
    }

    #[test]
    fn test_case_shape_zeroed_for_non_western() {
        let config = EngineConfig::default();
        let spans = vec![span("x", 10.0, 0.0)];
        let metrics = metrics_for(&spans);
        let scorer = CandidateScorer::new(&config, &metrics);

        assert_eq!(scorer.content_score("第一章 概要"), 0.0);
    }
}
