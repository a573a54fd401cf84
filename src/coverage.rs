//! CSS coverage calculation.
//!
//! The pipeline, in order:
//!   1. validate the input and filter out records that are not CSS
//!   2. deduplicate stylesheets, merging ranges of identical texts
//!   3. widen ranges to include at-rule preludes
//!   4. split each stylesheet into covered/uncovered chunks
//!   5. pretty-print the chunks and assign line/byte positions
//!   6. count covered/uncovered bytes and lines per stylesheet and overall
use serde_json::Value;

use crate::chunk::chunkify;
use crate::dedup::deduplicate_entries;
use crate::error::Result;
use crate::extend::extend_ranges;
use crate::filter::filter_coverage;
use crate::format::{CssFormatter, PrettyCss};
use crate::html::{HtmlStyleExtractor, StyleExtractor};
use crate::model::{rate, CoverageRecord, CoverageResult, PrettySheet, StylesheetCoverage};
use crate::parse::{parse_coverage, records_from_value};
use crate::prettify::prettify;

/// Collaborators used by the pipeline.
#[derive(Clone, Copy)]
pub struct Options<'a> {
    /// Pretty-printer applied to every chunk.
    pub formatter: &'a dyn CssFormatter,
    /// Used to pull `<style>` contents out of HTML documents. Without one,
    /// HTML records are skipped.
    pub extractor: Option<&'a dyn StyleExtractor>,
}

impl Default for Options<'static> {
    fn default() -> Self {
        Self {
            formatter: &PrettyCss,
            extractor: Some(&HtmlStyleExtractor),
        }
    }
}

impl<'a> Options<'a> {
    #[must_use]
    pub fn with_formatter(self, formatter: &'a dyn CssFormatter) -> Self {
        Self { formatter, ..self }
    }

    #[must_use]
    pub fn with_extractor(self, extractor: &'a dyn StyleExtractor) -> Self {
        Self {
            extractor: Some(extractor),
            ..self
        }
    }

    #[must_use]
    pub fn without_html(self) -> Self {
        Self {
            extractor: None,
            ..self
        }
    }
}

/// Byte and line counters, split by coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    total_bytes: usize,
    covered_bytes: usize,
    uncovered_bytes: usize,
    total_lines: usize,
    covered_lines: usize,
    uncovered_lines: usize,
}

impl Tally {
    fn add(&mut self, is_covered: bool, bytes: usize, lines: usize) {
        self.total_bytes += bytes;
        self.total_lines += lines;
        if is_covered {
            self.covered_bytes += bytes;
            self.covered_lines += lines;
        } else {
            self.uncovered_bytes += bytes;
            self.uncovered_lines += lines;
        }
    }

    fn add_sheet(&mut self, sheet: &StylesheetCoverage) {
        self.total_bytes += sheet.total_bytes;
        self.covered_bytes += sheet.covered_bytes;
        self.uncovered_bytes += sheet.uncovered_bytes;
        self.total_lines += sheet.total_lines;
        self.covered_lines += sheet.covered_lines;
        self.uncovered_lines += sheet.uncovered_lines;
    }
}

/// Count bytes and lines of a reflowed stylesheet.
pub fn stylesheet_coverage(sheet: PrettySheet) -> StylesheetCoverage {
    let mut tally = Tally::default();
    for chunk in &sheet.chunks {
        let bytes = chunk.end_offset.saturating_sub(chunk.start_offset);
        tally.add(chunk.is_covered, bytes, chunk.total_lines);
    }

    StylesheetCoverage {
        url: sheet.url,
        text: sheet.text,
        chunks: sheet.chunks,
        total_bytes: tally.total_bytes,
        covered_bytes: tally.covered_bytes,
        uncovered_bytes: tally.uncovered_bytes,
        total_lines: tally.total_lines,
        covered_lines: tally.covered_lines,
        uncovered_lines: tally.uncovered_lines,
        byte_coverage_ratio: rate(tally.covered_bytes, tally.total_bytes),
        line_coverage_ratio: rate(tally.covered_lines, tally.total_lines),
    }
}

/// Compute coverage for an already-decoded JSON value.
///
/// A value that does not match the coverage schema is rejected with
/// [`CsscovError::InvalidCoverage`](crate::error::CsscovError::InvalidCoverage).
pub fn calculate_coverage(input: &Value, options: &Options<'_>) -> Result<CoverageResult> {
    let records = records_from_value(input)?;
    Ok(calculate_records(records, options))
}

/// Compute coverage for raw JSON text. Malformed text is treated as an empty
/// batch, not as an error.
pub fn calculate_coverage_json(input: &str, options: &Options<'_>) -> CoverageResult {
    calculate_records(parse_coverage(input), options)
}

/// Compute coverage for typed records.
///
/// A stylesheet whose ranges overlap or run out of order after merging and
/// widening (see [`crate::chunk::check_ranges`]) is left out of every count
/// and listed in `unsupported_stylesheets`; the rest are still reported.
pub fn calculate_records(records: Vec<CoverageRecord>, options: &Options<'_>) -> CoverageResult {
    let total_files_found = records.len();

    let filtered = filter_coverage(records, options.extractor);
    tracing::debug!(
        found = total_files_found,
        kept = filtered.len(),
        "filtered coverage records"
    );
    let sheets = extend_ranges(deduplicate_entries(filtered));

    let mut coverage_per_stylesheet = Vec::with_capacity(sheets.len());
    let mut unsupported_stylesheets = Vec::new();
    for sheet in &sheets {
        let chunks = match chunkify(&sheet.ranges, sheet.text.len()) {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::warn!(url = %sheet.url, error = %e, "skipping stylesheet");
                unsupported_stylesheets.push(sheet.url.clone());
                continue;
            }
        };
        let pretty = prettify(sheet, &chunks, options.formatter);
        coverage_per_stylesheet.push(stylesheet_coverage(pretty));
    }

    let mut totals = Tally::default();
    for sheet in &coverage_per_stylesheet {
        totals.add_sheet(sheet);
    }

    CoverageResult {
        total_files_found,
        total_stylesheets: coverage_per_stylesheet.len(),
        total_bytes: totals.total_bytes,
        covered_bytes: totals.covered_bytes,
        uncovered_bytes: totals.uncovered_bytes,
        total_lines: totals.total_lines,
        covered_lines: totals.covered_lines,
        uncovered_lines: totals.uncovered_lines,
        byte_coverage_ratio: rate(totals.covered_bytes, totals.total_bytes),
        line_coverage_ratio: rate(totals.covered_lines, totals.total_lines),
        coverage_per_stylesheet,
        unsupported_stylesheets,
    }
}
