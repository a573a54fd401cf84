//! Collapsing of repeated stylesheet observations.
//!
//! The same CSS is often served to several pages, or under several URLs.
//! Identical text must only be counted once, but every occurrence is
//! evidence of what was used, so ranges from all occurrences are merged.
use std::collections::HashMap;

use crate::model::{CoverageRecord, DeduplicatedSheet};

/// Merge records with byte-identical `text` into one sheet per distinct
/// text, in first-seen order. The first record's URL wins; ranges are the
/// union of all occurrences with exact duplicates removed, in the order they
/// were first observed. Empty ranges carry no coverage and are dropped.
pub fn deduplicate_entries(records: Vec<CoverageRecord>) -> Vec<DeduplicatedSheet> {
    let mut sheets: Vec<DeduplicatedSheet> = Vec::new();
    let mut index_by_text: HashMap<String, usize> = HashMap::new();

    for record in records {
        let idx = match index_by_text.get(&record.text) {
            Some(&idx) => idx,
            None => {
                index_by_text.insert(record.text.clone(), sheets.len());
                sheets.push(DeduplicatedSheet {
                    url: record.url,
                    text: record.text,
                    ranges: Vec::with_capacity(record.ranges.len()),
                });
                sheets.len() - 1
            }
        };

        let ranges = &mut sheets[idx].ranges;
        for range in record.ranges {
            if range.end > range.start && !ranges.contains(&range) {
                ranges.push(range);
            }
        }
    }

    tracing::debug!(unique = sheets.len(), "deduplicated stylesheets");
    sheets
}
