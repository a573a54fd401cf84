//! Parsing and schema validation of raw coverage records.
//!
//! The expected shape is the one a browser coverage session emits:
//!
//! ```json
//! [{ "url": "...", "text": "...", "ranges": [{ "start": 0, "end": 10 }] }]
//! ```
//!
//! `text` may be omitted; offsets must be non-negative integers. Unknown
//! keys are ignored.
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CsscovError, Result};
use crate::model::CoverageRecord;

/// Whether an already-decoded JSON value matches the coverage schema.
#[must_use]
pub fn is_valid_coverage(input: &Value) -> bool {
    Vec::<CoverageRecord>::deserialize(input).is_ok()
}

/// Convert an already-decoded JSON value into records. Unlike
/// [`parse_coverage`], a schema mismatch here is an error.
pub fn records_from_value(input: &Value) -> Result<Vec<CoverageRecord>> {
    Vec::<CoverageRecord>::deserialize(input).map_err(|_| CsscovError::InvalidCoverage)
}

/// Parse JSON text into records. Malformed JSON or a schema mismatch yields
/// an empty list rather than an error.
#[must_use]
pub fn parse_coverage(input: &str) -> Vec<CoverageRecord> {
    match serde_json::from_str::<Vec<CoverageRecord>>(input) {
        Ok(records) => records,
        Err(e) => {
            tracing::debug!(error = %e, "discarding malformed coverage input");
            Vec::new()
        }
    }
}
