//! Engine configuration.
//!
//! Every heuristic constant lives here as an immutable value passed into the
//! pipeline, so tests can vary thresholds without cross-test leakage.

/// Title resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleStrategy {
    /// Metadata title, else the largest near-top span on the first page.
    #[default]
    Simple,
    /// Front-matter aware: marker-phrase absorption and grouped large-text
    /// runs, for documents with busy cover pages.
    FrontMatter,
}

/// Immutable configuration for the inference engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum vertical gap between fragments merged into one span
    pub merge_v_threshold: f32,

    /// Maximum horizontal gap between fragments merged into one span
    pub merge_h_threshold: f32,

    /// Neutral font size assumed for empty documents
    pub neutral_size: f32,

    /// A size is "significant" when greater than `median * this ratio`
    pub heading_threshold_ratio: f32,

    /// Weight of the size signal in the candidate score
    pub size_weight: f32,

    /// Weight of the position signal in the candidate score
    pub position_weight: f32,

    /// Weight of the lexical-shape signal in the candidate score
    pub content_weight: f32,

    /// Candidates scoring at or below this are discarded
    pub score_cutoff: f32,

    /// Text longer than this has its score halved
    pub long_text_len: usize,

    /// Assumed page height for normalizing vertical position
    pub page_height: f32,

    /// Title resolution strategy
    pub title_strategy: TitleStrategy,

    /// First-page vertical cutoff for the simple title heuristic
    pub title_top_cutoff: f32,

    /// Marker phrases that anchor front-matter title absorption
    pub title_markers: Vec<String>,
}

impl EngineConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the span-merge gap thresholds.
    pub fn with_merge_thresholds(mut self, vertical: f32, horizontal: f32) -> Self {
        self.merge_v_threshold = vertical;
        self.merge_h_threshold = horizontal;
        self
    }

    /// Set the significant-size ratio.
    pub fn with_heading_threshold_ratio(mut self, ratio: f32) -> Self {
        self.heading_threshold_ratio = ratio;
        self
    }

    /// Set the candidate score cutoff.
    pub fn with_score_cutoff(mut self, cutoff: f32) -> Self {
        self.score_cutoff = cutoff;
        self
    }

    /// Set the score weights (size, position, content).
    pub fn with_weights(mut self, size: f32, position: f32, content: f32) -> Self {
        self.size_weight = size;
        self.position_weight = position;
        self.content_weight = content;
        self
    }

    /// Set the title resolution strategy.
    pub fn with_title_strategy(mut self, strategy: TitleStrategy) -> Self {
        self.title_strategy = strategy;
        self
    }

    /// Set the marker phrases for front-matter title detection.
    pub fn with_title_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_markers = markers.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            merge_v_threshold: 5.0,
            merge_h_threshold: 10.0,
            neutral_size: 12.0,
            heading_threshold_ratio: 1.2,
            size_weight: 0.5,
            position_weight: 0.4,
            content_weight: 0.1,
            score_cutoff: 0.35,
            long_text_len: 150,
            page_height: 800.0,
            title_strategy: TitleStrategy::Simple,
            title_top_cutoff: 200.0,
            title_markers: Vec::new(),
        }
    }
}
