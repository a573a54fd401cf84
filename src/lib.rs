pub mod chunk;
pub mod cli;
pub mod coverage;
pub mod dedup;
pub mod detect;
pub mod error;
pub mod extend;
pub mod filter;
pub mod format;
pub mod html;
pub mod model;
pub mod parse;
pub mod prettify;
pub mod report;

pub use coverage::{calculate_coverage, calculate_coverage_json, calculate_records, Options};
pub use error::{CsscovError, Result};
pub use model::{CoverageRecord, CoverageResult, Range, StylesheetCoverage};
pub use parse::parse_coverage;
