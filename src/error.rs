use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsscovError {
    #[error("No valid coverage data found")]
    InvalidCoverage,

    #[error(
        "Unsupported range #{index} [{start}, {end}): ranges must be ascending, \
         non-overlapping, non-empty and within the text (previous end {previous_end}, text length {text_len})"
    )]
    UnorderedRanges {
        index: usize,
        start: usize,
        end: usize,
        previous_end: usize,
        text_len: usize,
    },

    #[error("Stylesheet not found: {0}")]
    StylesheetNotFound(String),
}

pub type Result<T> = std::result::Result<T, CsscovError>;
