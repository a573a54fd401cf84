//! Value objects flowing through the coverage pipeline. Raw browser records
//! come in as [`CoverageRecord`]s and leave as a [`CoverageResult`]; every
//! stage in between consumes one of these types and produces the next.

use serde::{Deserialize, Serialize};

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// A half-open byte interval `[start, end)` reported as executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One raw coverage observation: a stylesheet (or document) as served,
/// plus the ranges the browser reported for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRecord {
    pub url: String,
    #[serde(default)]
    pub text: String,
    pub ranges: Vec<Range>,
}

impl CoverageRecord {
    pub fn new(url: impl Into<String>, text: impl Into<String>, ranges: Vec<Range>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            ranges,
        }
    }
}

/// A unique stylesheet text with the union of all ranges observed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeduplicatedSheet {
    /// URL of the first record seen with this text.
    pub url: String,
    pub text: String,
    pub ranges: Vec<Range>,
}

/// A contiguous slice of the original text sharing one coverage status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub start_offset: usize,
    pub end_offset: usize,
    pub is_covered: bool,
}

impl Chunk {
    pub fn covered(start_offset: usize, end_offset: usize) -> Self {
        Self {
            start_offset,
            end_offset,
            is_covered: true,
        }
    }

    pub fn uncovered(start_offset: usize, end_offset: usize) -> Self {
        Self {
            start_offset,
            end_offset,
            is_covered: false,
        }
    }
}

/// A chunk after reformatting. Offsets and lines refer to the reassembled
/// pretty text of the stylesheet, not the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrettyChunk {
    pub start_offset: usize,
    pub end_offset: usize,
    pub is_covered: bool,
    pub start_line: usize,
    pub end_line: usize,
    pub total_lines: usize,
    pub css: String,
}

/// A stylesheet whose chunks have all been reformatted and re-stitched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrettySheet {
    pub url: String,
    /// Concatenation of every chunk's `css`, in order.
    pub text: String,
    pub chunks: Vec<PrettyChunk>,
}

/// Coverage statistics for one deduplicated stylesheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylesheetCoverage {
    pub url: String,
    pub text: String,
    pub chunks: Vec<PrettyChunk>,
    pub total_bytes: usize,
    pub covered_bytes: usize,
    pub uncovered_bytes: usize,
    pub total_lines: usize,
    pub covered_lines: usize,
    pub uncovered_lines: usize,
    pub byte_coverage_ratio: f64,
    pub line_coverage_ratio: f64,
}

/// Coverage statistics for a whole batch of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageResult {
    /// Number of input records, before filtering and deduplication.
    pub total_files_found: usize,
    pub total_stylesheets: usize,
    pub total_bytes: usize,
    pub covered_bytes: usize,
    pub uncovered_bytes: usize,
    pub total_lines: usize,
    pub covered_lines: usize,
    pub uncovered_lines: usize,
    pub byte_coverage_ratio: f64,
    pub line_coverage_ratio: f64,
    pub coverage_per_stylesheet: Vec<StylesheetCoverage>,
    /// URLs of stylesheets left out of every count because their ranges
    /// could not be chunked (overlapping after widening, or out of bounds).
    pub unsupported_stylesheets: Vec<String>,
}
