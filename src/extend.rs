//! At-rule prefix heuristic.
//!
//! Browsers report the body of an at-rule as used but leave out its
//! `@keyword` and prelude (`@media (min-width: 44rem)` in
//! `@media (min-width: 44rem){a{}}`). Each range start is widened to the
//! nearest preceding `@` within a short window so the at-rule itself counts
//! as covered. Range ends are left alone: a closing `}` cannot reliably be
//! told apart from the end of the range.
use crate::model::{DeduplicatedSheet, Range};

/// No at-rule name is longer than this one, including the `@`.
const LONGEST_AT_RULE_NAME: &str = "@-webkit-font-feature-values";

/// Widen every range of every sheet. Each sheet's ranges are put in
/// ascending `(start, end)` order first, since merged ranges from several
/// observations arrive in observation order.
pub fn extend_ranges(mut sheets: Vec<DeduplicatedSheet>) -> Vec<DeduplicatedSheet> {
    for sheet in &mut sheets {
        sheet.ranges.sort_unstable();
        for range in &mut sheet.ranges {
            *range = extend_range(&sheet.text, *range);
        }
    }
    sheets
}

/// Move `range.start` back to the nearest `@` at or before it, looking at
/// most `LONGEST_AT_RULE_NAME.len()` bytes back.
#[must_use]
pub fn extend_range(text: &str, range: Range) -> Range {
    let bytes = text.as_bytes();
    let window = LONGEST_AT_RULE_NAME.len();

    (0..=window.min(range.start))
        .map(|back| range.start - back)
        .find(|&pos| bytes.get(pos) == Some(&b'@'))
        .map_or(range, |start| Range::new(start, range.end))
}
