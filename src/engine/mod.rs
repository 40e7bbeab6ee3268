//! The structure-inference engine.
//!
//! Data flows strictly forward: raw fragments → merged spans → scored
//! candidates → leveled headings → arbitrated headings → title +
//! deduplicated outline → validated output. The only shared state is the
//! read-only [`StyleMetrics`](metrics::StyleMetrics) computed once from all
//! spans.

pub mod arbiter;
pub mod classify;
pub mod config;
pub mod learned;
pub mod merge;
pub mod metrics;
pub mod rules;
pub mod score;
pub mod title;
pub mod postprocess;

mod text;

pub use arbiter::Arbiter;
pub use classify::{LevelClassifier, LeveledCandidate};
pub use config::{EngineConfig, TitleStrategy};
pub use learned::{FeatureVector, LearnedClassifier, LinearModel, ModelVerdict};
pub use merge::SpanMerger;
pub use metrics::StyleMetrics;
pub use postprocess::PostProcessor;
pub use rules::{PatternRuleEngine, RuleVerdict};
pub use score::{Candidate, CandidateScorer};
pub use title::{ResolvedTitle, TitleResolver};

use crate::model::{DocumentResult, ExtractedDocument};
use crate::output::OutputValidator;

/// Run the full inference pipeline over one extracted document.
///
/// Never fails: degenerate input (zero pages, zero spans) short-circuits to
/// the well-formed empty result.
pub fn analyze(
    doc: &ExtractedDocument,
    config: &EngineConfig,
    model: Option<&dyn LearnedClassifier>,
) -> DocumentResult {
    if !doc.has_text() {
        log::debug!("document has no extractable text, returning empty result");
        return DocumentResult::empty();
    }

    let spans = SpanMerger::new(config).merge(doc.all_fragments());
    if spans.is_empty() {
        return DocumentResult::empty();
    }

    let metrics = StyleMetrics::compute(&spans, config);
    log::debug!(
        "{} spans, median size {:.1}, {} significant sizes",
        spans.len(),
        metrics.median_size,
        metrics.significant_sizes.len()
    );

    let title = TitleResolver::new(config, &metrics).resolve(doc.title.as_deref(), &spans);

    let candidates = CandidateScorer::new(config, &metrics).score_candidates(&spans);
    let leveled = LevelClassifier::classify(candidates);
    let arbitrated = Arbiter::new(config, &metrics, model).arbitrate_all(leveled);
    let outline = PostProcessor::new(config).process(&title, arbitrated);

    OutputValidator::new().validate(DocumentResult::new(title.text, outline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtractedPage, HeadingLevel, RawFragment};

    fn fragment(text: &str, size: f32, page: u32, top: f32) -> RawFragment {
        RawFragment {
            text: text.to_string(),
            font: "Helvetica".to_string(),
            size,
            page,
            top,
            left: 50.0,
            right: 300.0,
        }
    }

    fn doc(fragments: Vec<RawFragment>) -> ExtractedDocument {
        let mut pages: Vec<ExtractedPage> = Vec::new();
        for f in fragments {
            match pages.iter_mut().find(|p| p.page == f.page) {
                Some(page) => page.fragments.push(f),
                None => pages.push(ExtractedPage {
                    page: f.page,
                    fragments: vec![f],
                    ..Default::default()
                }),
            }
        }
        ExtractedDocument {
            title: None,
            total_pages: pages.len() as u32,
            pages,
        }
    }

    #[test]
    fn test_empty_document_contract() {
        let result = analyze(&ExtractedDocument::new(), &EngineConfig::default(), None);
        assert_eq!(result, DocumentResult::empty());
    }

    #[test]
    fn test_whitespace_only_document_contract() {
        let result = analyze(
            &doc(vec![fragment("   ", 12.0, 1, 100.0)]),
            &EngineConfig::default(),
            None,
        );
        assert_eq!(result, DocumentResult::empty());
    }

    #[test]
    fn test_introduction_scenario() {
        let result = analyze(
            &doc(vec![
                fragment("INTRODUCTION", 18.0, 1, 50.0),
                fragment("This is body text.", 10.0, 1, 120.0),
                fragment("Another body line follows.", 10.0, 1, 140.0),
            ]),
            &EngineConfig::default(),
            None,
        );

        assert_eq!(result.outline.len(), 1);
        assert_eq!(result.outline[0].level, HeadingLevel::H1);
        assert_eq!(result.outline[0].text, "INTRODUCTION");
        assert_eq!(result.outline[0].page, 1);
    }
}
