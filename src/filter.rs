use crate::detect::{classify, EntryKind};
use crate::html::{remap_html, StyleExtractor};
use crate::model::CoverageRecord;

/// Keep only records that carry CSS. Scripts are dropped, HTML documents
/// are reduced to their `<style>` contents with remapped ranges, and
/// everything else passes through unchanged.
///
/// Without an extractor, HTML records cannot be processed and are skipped.
pub fn filter_coverage(
    records: Vec<CoverageRecord>,
    extractor: Option<&dyn StyleExtractor>,
) -> Vec<CoverageRecord> {
    let mut result = Vec::with_capacity(records.len());

    for record in records {
        let kind = classify(&record);
        tracing::debug!(url = %record.url, %kind, "classified coverage record");
        match kind {
            EntryKind::Script => continue,
            EntryKind::Css => result.push(record),
            EntryKind::Html => {
                let Some(extractor) = extractor else {
                    tracing::debug!(url = %record.url, "skipping HTML entry: no style extractor");
                    continue;
                };
                let extracted = remap_html(extractor, &record.text, &record.ranges);
                result.push(CoverageRecord {
                    url: record.url,
                    text: extracted.css,
                    ranges: extracted.ranges,
                });
            }
        }
    }

    result
}
