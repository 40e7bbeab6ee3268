//! Document-wide style statistics.

use crate::engine::config::EngineConfig;
use crate::model::Span;

/// Font-size statistics computed once per document and read by every
/// downstream scoring stage.
///
/// Always derived from ALL spans in the document, never a subset, so
/// scoring stays globally consistent.
#[derive(Debug, Clone)]
pub struct StyleMetrics {
    /// Median span size (neutral 12.0 for empty documents)
    pub median_size: f32,
    /// Arithmetic mean span size, used by the rule and arbiter size gates
    pub mean_size: f32,
    /// Distinct sizes strictly greater than `median * threshold ratio`,
    /// sorted descending
    pub significant_sizes: Vec<f32>,
}

impl StyleMetrics {
    /// Compute metrics over the full span list.
    pub fn compute(spans: &[Span], config: &EngineConfig) -> Self {
        if spans.is_empty() {
            return Self {
                median_size: config.neutral_size,
                mean_size: config.neutral_size,
                significant_sizes: vec![],
            };
        }

        let mut sizes: Vec<f32> = spans.iter().map(|s| s.size).collect();
        sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mid = sizes.len() / 2;
        let median_size = if sizes.len() % 2 == 0 {
            (sizes[mid - 1] + sizes[mid]) / 2.0
        } else {
            sizes[mid]
        };

        let mean_size = sizes.iter().sum::<f32>() / sizes.len() as f32;

        let threshold = median_size * config.heading_threshold_ratio;
        let mut significant_sizes: Vec<f32> = Vec::new();
        for &size in &sizes {
            if size > threshold && !significant_sizes.contains(&size) {
                significant_sizes.push(size);
            }
        }
        significant_sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            median_size,
            mean_size,
            significant_sizes,
        }
    }

    /// Check whether a size counts as significant for this document.
    pub fn is_significant(&self, size: f32) -> bool {
        self.significant_sizes.contains(&size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(size: f32) -> Span {
        Span {
            text: "x".to_string(),
            font: String::new(),
            size,
            page: 1,
            top: 0.0,
            left: 0.0,
            right: 0.0,
        }
    }

    #[test]
    fn test_empty_document_defaults_neutral() {
        let metrics = StyleMetrics::compute(&[], &EngineConfig::default());
        assert_eq!(metrics.median_size, 12.0);
        assert_eq!(metrics.mean_size, 12.0);
        assert!(metrics.significant_sizes.is_empty());
    }

    #[test]
    fn test_median_and_significant_sizes() {
        let spans: Vec<Span> = [10.0, 10.0, 10.0, 10.0, 10.0, 14.0, 18.0, 18.0, 24.0]
            .iter()
            .map(|&s| span(s))
            .collect();
        let metrics = StyleMetrics::compute(&spans, &EngineConfig::default());

        assert_eq!(metrics.median_size, 10.0);
        // Threshold 12.0: 14, 18, 24 qualify, descending and distinct
        assert_eq!(metrics.significant_sizes, vec![24.0, 18.0, 14.0]);
        assert!(metrics.is_significant(18.0));
        assert!(!metrics.is_significant(10.0));
    }

    #[test]
    fn test_size_at_threshold_is_not_significant() {
        // Strictly greater: 12.0 == 10.0 * 1.2 stays out
        let spans: Vec<Span> = [10.0, 10.0, 10.0, 12.0].iter().map(|&s| span(s)).collect();
        let metrics = StyleMetrics::compute(&spans, &EngineConfig::default());
        assert!(!metrics.is_significant(12.0));
    }
}
