//! Document title resolution.

use once_cell::sync::Lazy;

use crate::engine::config::{EngineConfig, TitleStrategy};
use crate::engine::metrics::StyleMetrics;
use crate::engine::rules::is_date_like;
use crate::model::Span;

/// Phrases that mark a span group as body content rather than a title.
static CONTENT_LIST_INDICATORS: &[&str] = &["ingredients:", "step", "procedure"];

/// Vertical gap within which same-page runs group into one title block.
const GROUP_WINDOW: f32 = 50.0;

/// Maximum joined length for a front-matter title group.
const MAX_GROUP_LEN: usize = 150;

static FALLBACK_TITLE: Lazy<String> = Lazy::new(|| "Untitled Document".to_string());

/// A resolved title and the page it was read from (when it came from page
/// content rather than metadata).
#[derive(Debug, Clone)]
pub struct ResolvedTitle {
    /// The title text
    pub text: String,
    /// Source page for content-derived titles
    pub page: Option<u32>,
}

/// Determines the document title from metadata or first-page typography.
pub struct TitleResolver<'a> {
    config: &'a EngineConfig,
    metrics: &'a StyleMetrics,
}

impl<'a> TitleResolver<'a> {
    /// Create a resolver over the document's style metrics.
    pub fn new(config: &'a EngineConfig, metrics: &'a StyleMetrics) -> Self {
        Self { config, metrics }
    }

    /// Resolve the title. `metadata_title` takes priority when non-empty;
    /// otherwise the configured strategy inspects the first page's spans.
    pub fn resolve(&self, metadata_title: Option<&str>, spans: &[Span]) -> ResolvedTitle {
        if let Some(title) = metadata_title {
            let trimmed = title.trim();
            if !trimmed.is_empty() {
                return ResolvedTitle {
                    text: trimmed.to_string(),
                    page: None,
                };
            }
        }

        let first_page = match spans.iter().map(|s| s.page).min() {
            Some(p) => p,
            None => {
                return ResolvedTitle {
                    text: FALLBACK_TITLE.clone(),
                    page: None,
                }
            }
        };
        let page_spans: Vec<&Span> = spans.iter().filter(|s| s.page == first_page).collect();

        let text = match self.config.title_strategy {
            TitleStrategy::Simple => self.resolve_simple(&page_spans),
            TitleStrategy::FrontMatter => self
                .resolve_front_matter(&page_spans)
                .unwrap_or_else(|| self.resolve_simple(&page_spans)),
        };

        ResolvedTitle {
            text,
            page: Some(first_page),
        }
    }

    /// Largest span above the near-top cutoff on the first page. Among
    /// equal sizes the first-encountered span wins.
    fn resolve_simple(&self, page_spans: &[&Span]) -> String {
        let mut best: Option<&Span> = None;
        for &span in page_spans {
            if span.top >= self.config.title_top_cutoff {
                continue;
            }
            match best {
                Some(b) if span.size <= b.size => {}
                _ => best = Some(span),
            }
        }

        best.map(|s| s.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_TITLE.clone())
    }

    /// Front-matter variant: marker absorption first, then grouped
    /// significant runs.
    fn resolve_front_matter(&self, page_spans: &[&Span]) -> Option<String> {
        if let Some(title) = self.absorb_from_marker(page_spans) {
            return Some(title);
        }
        self.best_significant_group(page_spans)
    }

    /// When a marker phrase appears, absorb subsequent lines on the page
    /// until a date-like line is met.
    fn absorb_from_marker(&self, page_spans: &[&Span]) -> Option<String> {
        if self.config.title_markers.is_empty() {
            return None;
        }

        let start = page_spans.iter().position(|s| {
            let lower = s.text.to_lowercase();
            self.config
                .title_markers
                .iter()
                .any(|m| lower.contains(&m.to_lowercase()))
        })?;

        let mut parts = Vec::new();
        for span in &page_spans[start..] {
            let trimmed = span.text.trim();
            if is_date_like(trimmed) {
                break;
            }
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Group significant-size runs by vertical proximity and score each
    /// group; the winner becomes the title.
    fn best_significant_group(&self, page_spans: &[&Span]) -> Option<String> {
        let significant: Vec<&Span> = page_spans
            .iter()
            .copied()
            .filter(|s| self.metrics.is_significant(s.size))
            .collect();
        if significant.is_empty() {
            return None;
        }

        let mut groups: Vec<Vec<&Span>> = Vec::new();
        for span in significant {
            match groups.last_mut() {
                Some(group)
                    if (span.top - group.last().unwrap().top).abs() < GROUP_WINDOW =>
                {
                    group.push(span);
                }
                _ => groups.push(vec![span]),
            }
        }

        groups
            .into_iter()
            .filter_map(|group| {
                let joined = group
                    .iter()
                    .map(|s| s.text.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                if joined.chars().count() > MAX_GROUP_LEN {
                    return None;
                }
                let lower = joined.to_lowercase();
                if CONTENT_LIST_INDICATORS.iter().any(|i| lower.contains(i)) {
                    return None;
                }

                let avg_size =
                    group.iter().map(|s| s.size).sum::<f32>() / group.len() as f32;
                let mut score = avg_size * joined.chars().count().min(100) as f32;
                if group[0].top < 400.0 {
                    score *= 1.5;
                }
                Some((score, joined))
            })
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, joined)| joined)
    }
}
