//! Output formatting for coverage results.

use std::fmt::Write;

use crate::model::{CoverageResult, StylesheetCoverage};

/// Trait for formatting coverage results.
pub trait ReportFormatter {
    /// Format the result to a string.
    fn format(&self, result: &CoverageResult) -> String;
}

impl CoverageResult {
    /// Format using a specific formatter.
    #[must_use]
    pub fn format(&self, formatter: &dyn ReportFormatter) -> String {
        formatter.format(self)
    }
}

/// Plain text formatter.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, result: &CoverageResult) -> String {
        let mut out = String::new();

        if result.total_stylesheets == 0 {
            let found = result.total_files_found;
            writeln!(out, "No stylesheets found in {found} coverage entries.").unwrap();
            write_unsupported(&mut out, result);
            return out;
        }

        let line_pct = result.line_coverage_ratio * 100.0;
        let byte_pct = result.byte_coverage_ratio * 100.0;
        let (covered_lines, total_lines) = (result.covered_lines, result.total_lines);
        let (covered_bytes, total_bytes) = (result.covered_bytes, result.total_bytes);
        writeln!(
            out,
            "CSS coverage: {line_pct:.1}% of lines ({covered_lines}/{total_lines}), \
             {byte_pct:.1}% of bytes ({covered_bytes}/{total_bytes})"
        )
        .unwrap();

        let mut partial: Vec<&StylesheetCoverage> = result
            .coverage_per_stylesheet
            .iter()
            .filter(|s| s.uncovered_lines > 0)
            .collect();
        partial.sort_by(|a, b| a.line_coverage_ratio.total_cmp(&b.line_coverage_ratio));
        if !partial.is_empty() {
            out.push('\n');
            for sheet in &partial {
                let url = &sheet.url;
                let covered = sheet.covered_lines;
                let total = sheet.total_lines;
                let pct = sheet.line_coverage_ratio * 100.0;
                let uncovered = format_line_ranges(&uncovered_lines(sheet));
                writeln!(
                    out,
                    "  {url}  {covered}/{total} ({pct:.1}%)  uncovered: {uncovered}"
                )
                .unwrap();
            }
        }

        write_unsupported(&mut out, result);
        out
    }
}

fn write_unsupported(out: &mut String, result: &CoverageResult) {
    if result.unsupported_stylesheets.is_empty() {
        return;
    }
    let count = result.unsupported_stylesheets.len();
    writeln!(out, "\nSkipped {count} stylesheet(s) with unsupported ranges:").unwrap();
    for url in &result.unsupported_stylesheets {
        writeln!(out, "  {url}").unwrap();
    }
}

/// Markdown formatter.
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, result: &CoverageResult) -> String {
        let mut md = String::new();

        let line_pct = result.line_coverage_ratio * 100.0;
        writeln!(md, "### CSS Coverage: {line_pct:.1}%\n").unwrap();

        let covered = result.covered_lines;
        let total = result.total_lines;
        let stylesheets = result.total_stylesheets;
        writeln!(
            md,
            "**{covered}** of **{total}** lines covered across {stylesheets} stylesheets"
        )
        .unwrap();

        if !result.unsupported_stylesheets.is_empty() {
            let urls = result
                .unsupported_stylesheets
                .iter()
                .map(|url| format!("`{url}`"))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(md, "\n> Skipped (unsupported ranges): {urls}").unwrap();
        }

        if result.coverage_per_stylesheet.is_empty() {
            return md;
        }

        md.push_str("\n| Stylesheet | Lines | Bytes | Uncovered lines |\n");
        md.push_str("|:-----------|------:|------:|:----------------|\n");
        for sheet in &result.coverage_per_stylesheet {
            let url = &sheet.url;
            let lines = sheet.line_coverage_ratio * 100.0;
            let bytes = sheet.byte_coverage_ratio * 100.0;
            let uncovered = format_line_ranges(&uncovered_lines(sheet));
            writeln!(md, "| `{url}` | {lines:.1}% | {bytes:.1}% | {uncovered} |").unwrap();
        }

        md
    }
}

/// Line numbers (in the pretty text's numbering) of every uncovered chunk,
/// ascending.
#[must_use]
pub fn uncovered_lines(sheet: &StylesheetCoverage) -> Vec<usize> {
    sheet
        .chunks
        .iter()
        .filter(|c| !c.is_covered && c.total_lines > 0)
        .flat_map(|c| c.start_line..=c.end_line)
        .collect()
}

/// Coalesce sorted line numbers into inclusive `(start, end)` runs.
#[must_use]
pub fn coalesce_ranges(lines: &[usize]) -> Vec<(usize, usize)> {
    let Some((&first, rest)) = lines.split_first() else {
        return Vec::new();
    };

    debug_assert!(
        lines.windows(2).all(|w| w[0] < w[1]),
        "coalesce_ranges requires sorted, deduplicated input"
    );

    let mut ranges = Vec::new();
    let (mut start, mut end) = (first, first);
    for &line in rest {
        if line == end + 1 {
            end = line;
        } else {
            ranges.push((start, end));
            start = line;
            end = line;
        }
    }
    ranges.push((start, end));
    ranges
}

/// Format line numbers into compact range notation, e.g. "1, 3-5, 8".
///
/// The input slice must be sorted in ascending order.
#[must_use]
pub fn format_line_ranges(lines: &[usize]) -> String {
    coalesce_ranges(lines)
        .iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
