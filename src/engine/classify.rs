//! Level assignment: bucket candidates into size tiers mapped to H1-H3.

use crate::engine::score::Candidate;
use crate::model::{HeadingLevel, Span};

/// A candidate carrying its provisional size-tier level.
#[derive(Debug, Clone)]
pub struct LeveledCandidate {
    /// The underlying span
    pub span: Span,
    /// Heading likelihood from the scorer
    pub heading_score: f32,
    /// Provisional level from the size tiers
    pub level: HeadingLevel,
}

/// Buckets surviving candidates by exact font size into at most three rank
/// tiers. The largest distinct size maps to H1, the next to H2, the third to
/// H3; candidates outside the top three tiers are dropped.
pub struct LevelClassifier;

impl LevelClassifier {
    /// Assign provisional levels and return candidates in `(page, level)`
    /// order.
    pub fn classify(candidates: Vec<Candidate>) -> Vec<LeveledCandidate> {
        if candidates.is_empty() {
            return vec![];
        }

        // Ties rank by size value, not by frequency
        let mut sizes: Vec<f32> = Vec::new();
        for c in &candidates {
            if !sizes.contains(&c.span.size) {
                sizes.push(c.span.size);
            }
        }
        sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        sizes.truncate(3);

        let mut leveled: Vec<LeveledCandidate> = candidates
            .into_iter()
            .filter_map(|c| {
                let rank = sizes.iter().position(|&s| s == c.span.size)?;
                let level = HeadingLevel::from_rank(rank)?;
                Some(LeveledCandidate {
                    span: c.span,
                    heading_score: c.heading_score,
                    level,
                })
            })
            .collect();

        // Stable: within a page-level group, insertion order survives
        leveled.sort_by(|a, b| a.span.page.cmp(&b.span.page).then(a.level.cmp(&b.level)));
        leveled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, size: f32, page: u32) -> Candidate {
        Candidate {
            span: Span {
                text: text.to_string(),
                font: String::new(),
                size,
                page,
                top: 50.0,
                left: 0.0,
                right: 100.0,
            },
            heading_score: 0.8,
        }
    }

    #[test]
    fn test_top_three_sizes_map_to_levels() {
        let leveled = LevelClassifier::classify(vec![
            candidate("Title Tier", 24.0, 1),
            candidate("Second Tier", 18.0, 1),
            candidate("Third Tier", 14.0, 2),
            candidate("Fourth Tier", 13.0, 2),
        ]);

        assert_eq!(leveled.len(), 3);
        assert_eq!(leveled[0].level, HeadingLevel::H1);
        assert_eq!(leveled[1].level, HeadingLevel::H2);
        assert_eq!(leveled[2].level, HeadingLevel::H3);
    }

    #[test]
    fn test_same_size_shares_level() {
        let leveled = LevelClassifier::classify(vec![
            candidate("One", 18.0, 1),
            candidate("Two", 18.0, 3),
            candidate("Sub", 14.0, 2),
        ]);

        let h1: Vec<_> = leveled
            .iter()
            .filter(|l| l.level == HeadingLevel::H1)
            .collect();
        assert_eq!(h1.len(), 2);
    }

    #[test]
    fn test_page_then_level_order() {
        let leveled = LevelClassifier::classify(vec![
            candidate("Late H1", 24.0, 5),
            candidate("Early H2", 18.0, 1),
            candidate("Early H1", 24.0, 1),
        ]);

        assert_eq!(leveled[0].span.text, "Early H1");
        assert_eq!(leveled[1].span.text, "Early H2");
        assert_eq!(leveled[2].span.text, "Late H1");
    }

    #[test]
    fn test_empty_input() {
        assert!(LevelClassifier::classify(vec![]).is_empty());
    }
}
