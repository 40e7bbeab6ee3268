//! Post-processing: known misclassification fixes and deduplication.

use std::collections::HashSet;

use crate::engine::config::{EngineConfig, TitleStrategy};
use crate::engine::title::ResolvedTitle;
use crate::model::{HeadingLevel, HeadingRecord};

/// Pages counted as "early" for the Background reclassification.
const EARLY_PAGE_LIMIT: u32 = 3;

/// Title-page fragments shorter than this without a colon are noise.
const SHORT_FRAGMENT_LEN: usize = 10;

/// Applies ordered cleanup passes to arbitrated headings, ending with
/// first-occurrence deduplication. Idempotent on its own output.
pub struct PostProcessor<'a> {
    config: &'a EngineConfig,
}

impl<'a> PostProcessor<'a> {
    /// Create a post-processor.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Run every pass in order.
    pub fn process(
        &self,
        title: &ResolvedTitle,
        mut records: Vec<HeadingRecord>,
    ) -> Vec<HeadingRecord> {
        // Title-page cleanup only makes sense for front-matter-heavy
        // documents where a dedicated title page was assembled; the simple
        // strategy may legitimately pick a first heading as the title.
        if self.config.title_strategy == TitleStrategy::FrontMatter {
            if let Some(title_page) = title.page {
                records = self.drop_title_fragments(title, title_page, records);
                records = self.drop_short_title_page_noise(title_page, records);
            }
        }

        records = Self::merge_syllabus_continuation(records);
        records = Self::reclassify_background(records);
        Self::deduplicate(records)
    }

    /// Drop title-page headings whose text duplicates a fragment of the
    /// resolved title.
    fn drop_title_fragments(
        &self,
        title: &ResolvedTitle,
        title_page: u32,
        records: Vec<HeadingRecord>,
    ) -> Vec<HeadingRecord> {
        let title_lower = title.text.to_lowercase();
        records
            .into_iter()
            .filter(|h| {
                if h.page != title_page {
                    return true;
                }
                let text = h.text.trim().to_lowercase();
                text.is_empty() || !title_lower.contains(&text)
            })
            .collect()
    }

    /// Drop very short title-page fragments lacking a colon.
    fn drop_short_title_page_noise(
        &self,
        title_page: u32,
        records: Vec<HeadingRecord>,
    ) -> Vec<HeadingRecord> {
        records
            .into_iter()
            .filter(|h| {
                h.page != title_page
                    || h.text.trim().chars().count() >= SHORT_FRAGMENT_LEN
                    || h.text.contains(':')
            })
            .collect()
    }

    /// Merge a bare "Syllabus" continuation into the immediately preceding
    /// heading on the same page.
    fn merge_syllabus_continuation(records: Vec<HeadingRecord>) -> Vec<HeadingRecord> {
        let mut merged: Vec<HeadingRecord> = Vec::new();
        for record in records {
            match merged.last_mut() {
                Some(prev)
                    if record.text.trim() == "Syllabus"
                        && prev.page == record.page
                        && !prev.text.trim().eq_ignore_ascii_case("syllabus") =>
                {
                    prev.text = format!("{} Syllabus", prev.text.trim());
                }
                _ => merged.push(record),
            }
        }
        merged
    }

    /// A bare "Background" in the opening pages is a section, not a
    /// sub-sub-section.
    fn reclassify_background(records: Vec<HeadingRecord>) -> Vec<HeadingRecord> {
        records
            .into_iter()
            .map(|mut h| {
                if h.level == HeadingLevel::H3
                    && h.page <= EARLY_PAGE_LIMIT
                    && h.text.trim() == "Background"
                {
                    h.level = HeadingLevel::H2;
                }
                h
            })
            .collect()
    }

    /// Deduplicate by case-insensitive trimmed text, keeping the first
    /// occurrence in page-then-level order.
    fn deduplicate(mut records: Vec<HeadingRecord>) -> Vec<HeadingRecord> {
        records.sort_by(|a, b| a.page.cmp(&b.page).then(a.level.cmp(&b.level)));

        let mut seen: HashSet<String> = HashSet::new();
        records.retain(|h| seen.insert(h.dedup_key()));
        records
    }
}
