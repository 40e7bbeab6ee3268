//! # outliner
//!
//! Document structure inference for Rust.
//!
//! This library takes flat, positioned text fragments extracted from paged
//! documents and infers a structural outline: a document title plus H1/H2/H3
//! headings with page numbers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outliner::{analyze_file, output};
//!
//! fn main() -> outliner::Result<()> {
//!     // Analyze an extracted document (JSON of positioned fragments)
//!     let result = analyze_file("extracted.json")?;
//!
//!     println!("{}", output::to_json(&result, output::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typography-driven scoring**: font size, page position, and casing
//! - **Pattern rules**: numbered sections, chapters, date/version vetoes
//! - **Pluggable learned classifier**: bring your own model behind a trait
//! - **Batch mode**: parallel directory processing with Rayon
//! - **Predictable output**: bounded lengths, deduplicated, always valid

pub mod batch;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;

// Re-export commonly used types
pub use engine::{
    analyze, Arbiter, Candidate, CandidateScorer, EngineConfig, FeatureVector, LearnedClassifier,
    LevelClassifier, LinearModel, ModelVerdict, PatternRuleEngine, RuleVerdict, SpanMerger,
    StyleMetrics, TitleResolver, TitleStrategy,
};
pub use error::{Error, Result};
pub use model::{
    DocumentResult, ExtractedDocument, ExtractedPage, HeadingLevel, HeadingRecord, RawFragment,
    Span,
};
pub use output::JsonFormat;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read an extracted document from a JSON file.
///
/// # Example
///
/// ```no_run
/// use outliner::read_document;
///
/// let doc = read_document("extracted.json").unwrap();
/// println!("Pages: {}", doc.total_pages);
/// ```
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument> {
    let file = File::open(path.as_ref())?;
    let doc = serde_json::from_reader(BufReader::new(file))?;
    Ok(doc)
}

/// Analyze an extracted document with default configuration.
///
/// # Example
///
/// ```no_run
/// use outliner::{analyze_document, ExtractedDocument};
///
/// let doc = ExtractedDocument::new();
/// let result = analyze_document(&doc);
/// assert!(result.outline.is_empty());
/// ```
pub fn analyze_document(doc: &ExtractedDocument) -> DocumentResult {
    engine::analyze(doc, &EngineConfig::default(), None)
}

/// Analyze an extracted document with a custom configuration and an
/// optional learned classifier.
pub fn analyze_document_with(
    doc: &ExtractedDocument,
    config: &EngineConfig,
    model: Option<&dyn LearnedClassifier>,
) -> DocumentResult {
    engine::analyze(doc, config, model)
}

/// Read an extracted-document JSON file and analyze it.
///
/// # Example
///
/// ```no_run
/// use outliner::analyze_file;
///
/// let result = analyze_file("extracted.json").unwrap();
/// println!("Title: {}", result.title);
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<DocumentResult> {
    let doc = read_document(path)?;
    Ok(analyze_document(&doc))
}

/// Like [`analyze_file`], but unreadable or malformed input yields the
/// well-formed empty result instead of an error.
pub fn analyze_file_lenient<P: AsRef<Path>>(path: P) -> DocumentResult {
    match analyze_file(path.as_ref()) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("analysis of {} failed: {}", path.as_ref().display(), e);
            DocumentResult::empty()
        }
    }
}

/// Builder for configuring and running outline analysis.
///
/// # Example
///
/// ```no_run
/// use outliner::{Outliner, TitleStrategy};
///
/// let result = Outliner::new()
///     .with_title_strategy(TitleStrategy::FrontMatter)
///     .with_score_cutoff(0.4)
///     .analyze_file("extracted.json")?;
/// # Ok::<(), outliner::Error>(())
/// ```
pub struct Outliner {
    config: EngineConfig,
    model: Option<Box<dyn LearnedClassifier>>,
}

impl Outliner {
    /// Create a new Outliner builder.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            model: None,
        }
    }

    /// Replace the whole engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the title resolution strategy.
    pub fn with_title_strategy(mut self, strategy: TitleStrategy) -> Self {
        self.config = self.config.with_title_strategy(strategy);
        self
    }

    /// Set the minimum heading score.
    pub fn with_score_cutoff(mut self, cutoff: f32) -> Self {
        self.config = self.config.with_score_cutoff(cutoff);
        self
    }

    /// Set the size/position/content score weights.
    pub fn with_weights(mut self, size: f32, position: f32, content: f32) -> Self {
        self.config = self.config.with_weights(size, position, content);
        self
    }

    /// Attach a learned classifier.
    pub fn with_model(mut self, model: Box<dyn LearnedClassifier>) -> Self {
        self.model = Some(model);
        self
    }

    /// Attach a linear model loaded from a JSON file.
    pub fn with_model_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.model = Some(Box::new(LinearModel::from_json_file(path)?));
        Ok(self)
    }

    /// Analyze an extracted document.
    pub fn analyze(&self, doc: &ExtractedDocument) -> DocumentResult {
        engine::analyze(doc, &self.config, self.model.as_deref())
    }

    /// Read an extracted-document JSON file and analyze it.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentResult> {
        let doc = read_document(path)?;
        Ok(self.analyze(&doc))
    }

    /// Consume the builder into batch options for directory processing.
    pub fn into_batch_options(self) -> batch::BatchOptions {
        batch::BatchOptions {
            config: self.config,
            model: self.model,
            ..Default::default()
        }
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .with_title_strategy(TitleStrategy::FrontMatter)
            .with_score_cutoff(0.4);

        assert_eq!(outliner.config.title_strategy, TitleStrategy::FrontMatter);
        assert!((outliner.config.score_cutoff - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_analyze_empty_document() {
        let result = analyze_document(&ExtractedDocument::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_analyze_file_missing_path_errors() {
        assert!(analyze_file("/nonexistent/doc.json").is_err());
    }

    #[test]
    fn test_analyze_file_lenient_swallows_errors() {
        let result = analyze_file_lenient("/nonexistent/doc.json");
        assert_eq!(result, DocumentResult::empty());
    }
}
