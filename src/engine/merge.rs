//! Span merging: coalesce adjacent fragments into line-level spans.
//!
//! Raw extraction frequently splits one visual line into multiple style
//! runs. Merging restores line-level units without losing the per-run
//! maximum size, which downstream scoring uses as a proxy for "any part of
//! this line is large".

use crate::engine::config::EngineConfig;
use crate::model::{RawFragment, Span};

/// Merges adjacent low-level fragments on the same line into semantic spans.
pub struct SpanMerger {
    v_threshold: f32,
    h_threshold: f32,
}

impl SpanMerger {
    /// Create a merger with the configured gap thresholds.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            v_threshold: config.merge_v_threshold,
            h_threshold: config.merge_h_threshold,
        }
    }

    /// Merge a sequence of fragments (unordered across pages) into ordered
    /// spans, one per visually contiguous run of text.
    pub fn merge(&self, mut fragments: Vec<RawFragment>) -> Vec<Span> {
        if fragments.is_empty() {
            return vec![];
        }

        fragments.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then(
                    a.top
                        .partial_cmp(&b.top)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
                .then(
                    a.left
                        .partial_cmp(&b.left)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });

        let mut spans: Vec<Span> = Vec::new();
        let mut current: Option<Span> = None;

        for fragment in fragments {
            match current.take() {
                Some(mut acc) if self.belongs_to(&acc, &fragment) => {
                    acc.text.push(' ');
                    acc.text.push_str(fragment.text.trim());
                    acc.right = fragment.right.max(acc.right);
                    acc.size = fragment.size.max(acc.size);
                    current = Some(acc);
                }
                Some(acc) => {
                    spans.push(acc);
                    current = Some(Self::open_span(fragment));
                }
                None => {
                    current = Some(Self::open_span(fragment));
                }
            }
        }

        // Flush the open accumulator
        if let Some(acc) = current {
            spans.push(acc);
        }

        spans
    }

    /// Start a new accumulator. The opening fragment's text is trimmed so
    /// later concatenations never double up whitespace.
    fn open_span(mut fragment: RawFragment) -> Span {
        fragment.text = fragment.text.trim().to_string();
        Span::from(fragment)
    }

    /// A fragment joins the accumulator iff it sits on the same page, the
    /// same visual line, and within horizontal reach.
    fn belongs_to(&self, acc: &Span, fragment: &RawFragment) -> bool {
        fragment.page == acc.page
            && (fragment.top - acc.top).abs() < self.v_threshold
            && fragment.left - acc.right < self.h_threshold
    }
}
