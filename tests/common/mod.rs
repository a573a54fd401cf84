#![allow(dead_code)]

use csscov::model::{CoverageResult, PrettyChunk, StylesheetCoverage};
use csscov::{CoverageRecord, Range};

/// Build a coverage record from `(start, end)` pairs.
pub fn record(url: &str, text: &str, ranges: &[(usize, usize)]) -> CoverageRecord {
    CoverageRecord::new(
        url,
        text,
        ranges.iter().map(|&(s, e)| Range::new(s, e)).collect(),
    )
}

/// Chunk positions without the css, as `(start_offset, end_offset, start_line, end_line, total_lines, is_covered)`.
pub fn positions(chunks: &[PrettyChunk]) -> Vec<(usize, usize, usize, usize, usize, bool)> {
    chunks
        .iter()
        .map(|c| {
            (
                c.start_offset,
                c.end_offset,
                c.start_line,
                c.end_line,
                c.total_lines,
                c.is_covered,
            )
        })
        .collect()
}

/// Assert the counting invariants of one stylesheet: chunks are line-contiguous
/// from line 1, the text is the concatenation of chunk css, and the totals add up.
pub fn assert_sheet_consistent(sheet: &StylesheetCoverage) {
    let mut next_line = 1;
    for chunk in &sheet.chunks {
        assert_eq!(chunk.start_line, next_line, "chunk lines must be contiguous");
        assert_eq!(chunk.total_lines, chunk.css.split('\n').count());
        next_line = chunk.start_line + chunk.total_lines;
    }

    let joined: String = sheet.chunks.iter().map(|c| c.css.as_str()).collect();
    assert_eq!(sheet.text, joined);

    assert_eq!(sheet.covered_lines + sheet.uncovered_lines, sheet.total_lines);
    assert_eq!(sheet.covered_bytes + sheet.uncovered_bytes, sheet.total_bytes);
    assert_eq!(
        sheet.total_lines,
        sheet.chunks.iter().map(|c| c.total_lines).sum::<usize>()
    );
    assert!((0.0..=1.0).contains(&sheet.line_coverage_ratio));
    assert!((0.0..=1.0).contains(&sheet.byte_coverage_ratio));
}

/// Assert the aggregate totals equal the per-stylesheet sums.
pub fn assert_result_consistent(result: &CoverageResult) {
    for sheet in &result.coverage_per_stylesheet {
        assert_sheet_consistent(sheet);
    }

    let sheets = &result.coverage_per_stylesheet;
    assert_eq!(result.total_stylesheets, sheets.len());
    assert!(result.total_stylesheets <= result.total_files_found);
    assert_eq!(result.total_lines, sheets.iter().map(|s| s.total_lines).sum::<usize>());
    assert_eq!(result.covered_lines, sheets.iter().map(|s| s.covered_lines).sum::<usize>());
    assert_eq!(result.total_bytes, sheets.iter().map(|s| s.total_bytes).sum::<usize>());
    assert_eq!(result.covered_bytes, sheets.iter().map(|s| s.covered_bytes).sum::<usize>());
    assert_eq!(result.covered_lines + result.uncovered_lines, result.total_lines);
    assert_eq!(result.covered_bytes + result.uncovered_bytes, result.total_bytes);
    assert!((0.0..=1.0).contains(&result.line_coverage_ratio));
    assert!((0.0..=1.0).contains(&result.byte_coverage_ratio));
}
