//! Command handler functions for the csscov CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::Value;

use crate::coverage::{calculate_coverage, Options};
use crate::error::CsscovError;
use crate::model::{CoverageResult, StylesheetCoverage};
use crate::report::{self, MarkdownFormatter, TextFormatter};

/// Output style for the `report` command.
#[derive(Clone, ValueEnum)]
pub enum Style {
    Text,
    Markdown,
}

/// Read coverage JSON from `path` (`-` for stdin) and compute coverage.
pub fn load_coverage(path: &Path, options: &Options<'_>) -> Result<CoverageResult> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read coverage from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    let result = calculate_coverage(&value, options)?;
    tracing::debug!(
        stylesheets = result.total_stylesheets,
        entries = result.total_files_found,
        "computed coverage"
    );
    Ok(result)
}

pub fn cmd_summary(result: &CoverageResult) -> String {
    let mut out = String::new();
    writeln!(out, "Entries:      {}", result.total_files_found).unwrap();
    writeln!(out, "Stylesheets:  {}", result.total_stylesheets).unwrap();
    writeln!(
        out,
        "Lines:        {}/{} ({:.1}%)",
        result.covered_lines,
        result.total_lines,
        result.line_coverage_ratio * 100.0
    )
    .unwrap();
    writeln!(
        out,
        "Bytes:        {}/{} ({:.1}%)",
        result.covered_bytes,
        result.total_bytes,
        result.byte_coverage_ratio * 100.0
    )
    .unwrap();
    if !result.unsupported_stylesheets.is_empty() {
        writeln!(out, "Unsupported:  {}", result.unsupported_stylesheets.len()).unwrap();
    }
    out
}

pub fn cmd_files(result: &CoverageResult, sort_by_coverage: bool) -> String {
    let mut sheets: Vec<&StylesheetCoverage> = result.coverage_per_stylesheet.iter().collect();

    if sort_by_coverage {
        sheets.sort_by(|a, b| a.line_coverage_ratio.total_cmp(&b.line_coverage_ratio));
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<60} {:>8} {:>8} {:>8} {:>8}",
        "STYLESHEET", "LINES", "COVERED", "RATE", "BYTES"
    )
    .unwrap();
    writeln!(out, "{}", "-".repeat(96)).unwrap();

    for sheet in &sheets {
        writeln!(
            out,
            "{:<60} {:>8} {:>8} {:>7.1}% {:>7.1}%",
            sheet.url,
            sheet.total_lines,
            sheet.covered_lines,
            sheet.line_coverage_ratio * 100.0,
            sheet.byte_coverage_ratio * 100.0
        )
        .unwrap();
    }

    out
}

/// Show the pretty text of one stylesheet with a marker per line, or with
/// `uncovered` only the compact list of uncovered lines.
pub fn cmd_lines(result: &CoverageResult, url: &str, uncovered: bool) -> Result<String> {
    let sheet = result
        .coverage_per_stylesheet
        .iter()
        .find(|s| s.url == url)
        .ok_or_else(|| CsscovError::StylesheetNotFound(url.to_string()))?;

    let mut out = String::new();

    if uncovered {
        let lines = report::uncovered_lines(sheet);
        if lines.is_empty() {
            return Ok(format!("All lines are covered in '{}'\n", url));
        }
        writeln!(out, "Uncovered lines in '{}':", url).unwrap();
        writeln!(out, "  {}", report::format_line_ranges(&lines)).unwrap();
        writeln!(out, "  ({} lines)", lines.len()).unwrap();
        return Ok(out);
    }

    for chunk in &sheet.chunks {
        let marker = if chunk.is_covered { "✓" } else { "✗" };
        for (i, text) in chunk.css.split('\n').enumerate() {
            writeln!(out, "{:>6} {} {}", chunk.start_line + i, marker, text).unwrap();
        }
    }
    Ok(out)
}

pub fn cmd_report(result: &CoverageResult, style: &Style) -> String {
    match style {
        Style::Text => result.format(&TextFormatter),
        Style::Markdown => result.format(&MarkdownFormatter),
    }
}

pub fn cmd_json(result: &CoverageResult, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::calculate_records;
    use crate::model::{CoverageRecord, Range};

    /// Two stylesheets: one half used, one entirely unused.
    fn sample_result() -> CoverageResult {
        let records = vec![
            CoverageRecord::new(
                "https://example.com/main.css",
                "a{color:red}b{color:blue}",
                vec![Range::new(0, 12)],
            ),
            CoverageRecord::new("https://example.com/unused.css", "c{color:green}", vec![]),
            CoverageRecord::new("https://example.com/app.js", "x()", vec![Range::new(0, 3)]),
        ];
        calculate_records(records, &Options::default())
    }

    #[test]
    fn test_cmd_summary() {
        let out = cmd_summary(&sample_result());

        assert!(out.contains("Entries:      3"));
        assert!(out.contains("Stylesheets:  2"));
        assert!(out.contains("Lines:"));
        assert!(out.contains("Bytes:"));
        assert!(!out.contains("Unsupported:"));
    }

    #[test]
    fn test_cmd_summary_counts_unsupported() {
        let records = vec![
            CoverageRecord::new(
                "https://example.com/broken.css",
                "a{color:red}b{color:blue}",
                vec![Range::new(0, 12), Range::new(6, 20)],
            ),
            CoverageRecord::new("https://example.com/ok.css", "c{color:green}", vec![]),
        ];
        let result = calculate_records(records, &Options::default());
        let out = cmd_summary(&result);

        assert!(out.contains("Stylesheets:  1"));
        assert!(out.contains("Unsupported:  1"));
    }

    #[test]
    fn test_cmd_files() {
        let out = cmd_files(&sample_result(), false);

        assert!(out.contains("STYLESHEET"));
        assert!(out.contains("https://example.com/main.css"));
        assert!(out.contains("https://example.com/unused.css"));
        assert!(out.contains("0.0%"));
    }

    #[test]
    fn test_cmd_files_sorted_by_coverage() {
        let out = cmd_files(&sample_result(), true);

        let unused_pos = out.find("unused.css").unwrap();
        let main_pos = out.find("main.css").unwrap();
        assert!(unused_pos < main_pos);
    }

    #[test]
    fn test_cmd_lines() {
        let out = cmd_lines(&sample_result(), "https://example.com/main.css", false).unwrap();

        assert!(out.contains("     1 ✓ a {"));
        assert!(out.contains("✗ b {"));
    }

    #[test]
    fn test_cmd_lines_unknown_stylesheet() {
        let result = cmd_lines(&sample_result(), "https://example.com/nope.css", false);
        assert!(result.is_err());
    }

    #[test]
    fn test_cmd_lines_uncovered() {
        let out = cmd_lines(&sample_result(), "https://example.com/unused.css", true).unwrap();

        assert!(out.contains("Uncovered lines in 'https://example.com/unused.css':"));
        assert!(out.contains("1-3"));
        assert!(out.contains("(3 lines)"));
    }

    #[test]
    fn test_cmd_report_styles() {
        let result = sample_result();
        assert!(cmd_report(&result, &Style::Text).contains("CSS coverage:"));
        assert!(cmd_report(&result, &Style::Markdown).contains("### CSS Coverage:"));
    }

    #[test]
    fn test_cmd_json() {
        let out = cmd_json(&sample_result(), false).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["total_files_found"], 3);
        assert_eq!(value["total_stylesheets"], 2);
        assert_eq!(
            value["coverage_per_stylesheet"][0]["url"],
            "https://example.com/main.css"
        );
        assert!(value["coverage_per_stylesheet"][0]["chunks"].is_array());
    }

    #[test]
    fn test_load_coverage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coverage.json");
        std::fs::write(
            &path,
            r#"[{ "url": "https://example.com/a.css", "text": "a{color:red}", "ranges": [{ "start": 0, "end": 12 }] }]"#,
        )
        .unwrap();

        let result = load_coverage(&path, &Options::default()).unwrap();
        assert_eq!(result.total_stylesheets, 1);
        assert_eq!(result.line_coverage_ratio, 1.0);
    }

    #[test]
    fn test_load_coverage_rejects_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coverage.json");
        std::fs::write(&path, r#"{ "not": "coverage" }"#).unwrap();

        let err = load_coverage(&path, &Options::default()).unwrap_err();
        assert!(err.to_string().contains("No valid coverage data found"));
    }

    #[test]
    fn test_load_coverage_missing_file() {
        let err = load_coverage(Path::new("/nonexistent/coverage.json"), &Options::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
