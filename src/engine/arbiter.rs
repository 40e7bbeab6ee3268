//! Conflict resolution between pattern rules, the learned classifier, and
//! the score-based tiers.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::engine::classify::LeveledCandidate;
use crate::engine::config::EngineConfig;
use crate::engine::learned::{LearnedClassifier, ModelVerdict};
use crate::engine::metrics::StyleMetrics;
use crate::engine::rules::{PatternRuleEngine, RuleVerdict};
use crate::model::{HeadingLevel, HeadingRecord};

/// Bare table-header words dropped unconditionally after arbitration.
static TABLE_HEADER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["date", "remarks", "version", "identifier", "reference"])
});

/// Resolves disagreement between the rule engine, the learned classifier,
/// and size/position heuristics into one final label per span.
pub struct Arbiter<'a> {
    config: &'a EngineConfig,
    metrics: &'a StyleMetrics,
    model: Option<&'a dyn LearnedClassifier>,
}

impl<'a> Arbiter<'a> {
    /// Create an arbiter; `model` is optional.
    pub fn new(
        config: &'a EngineConfig,
        metrics: &'a StyleMetrics,
        model: Option<&'a dyn LearnedClassifier>,
    ) -> Self {
        Self {
            config,
            metrics,
            model,
        }
    }

    /// Arbitrate every leveled candidate and apply the denylist.
    pub fn arbitrate_all(&self, candidates: Vec<LeveledCandidate>) -> Vec<HeadingRecord> {
        candidates
            .iter()
            .filter_map(|c| self.arbitrate(c))
            .filter(|h| !TABLE_HEADER_WORDS.contains(h.text.to_lowercase().as_str()))
            .collect()
    }

    /// Resolve one candidate. Precedence: rule assertion, rule veto, model
    /// label, model rejection, then geometry; without a model the
    /// provisional size-tier level stands.
    pub fn arbitrate(&self, candidate: &LeveledCandidate) -> Option<HeadingRecord> {
        let span = &candidate.span;

        match PatternRuleEngine::evaluate(span, self.metrics) {
            RuleVerdict::Assert(level) => return Some(self.record(candidate, level)),
            RuleVerdict::Veto => return None,
            RuleVerdict::Pass => {}
        }

        match self.model.map(|m| m.classify(span)) {
            Some(ModelVerdict::Label(level)) => Some(self.record(candidate, level)),
            // Rules had no assertion either: agreement that this is not a
            // heading. A title verdict belongs to the TitleResolver, not
            // the outline.
            Some(ModelVerdict::NotHeading) | Some(ModelVerdict::Title) => None,
            // Abstention: the span stays eligible via geometry
            Some(ModelVerdict::UnknownFont) => self.geometric_rescue(candidate),
            // No model configured: the score-based tier is the fallback
            None => Some(self.record(candidate, candidate.level)),
        }
    }

    /// Size/position tie-breaker for spans the model abstained on.
    fn geometric_rescue(&self, candidate: &LeveledCandidate) -> Option<HeadingRecord> {
        let span = &candidate.span;
        let relative_size = span.size / self.metrics.mean_size;
        let position = span.top / self.config.page_height;

        if relative_size > 1.5 && position < 0.3 && span.word_count() < 10 {
            let level = if relative_size > 2.0 {
                HeadingLevel::H1
            } else {
                HeadingLevel::H2
            };
            log::debug!(
                "geometric rescue: {:?} (relative_size {:.2}) -> {}",
                span.text,
                relative_size,
                level
            );
            Some(self.record(candidate, level))
        } else {
            None
        }
    }

    fn record(&self, candidate: &LeveledCandidate, level: HeadingLevel) -> HeadingRecord {
        HeadingRecord::new(level, candidate.span.text.trim(), candidate.span.page)
    }
}
