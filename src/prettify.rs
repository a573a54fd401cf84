//! Reflow of a chunked stylesheet into one pretty text with global line and
//! byte positions.
//!
//! Each chunk is formatted on its own, so the formatter's line breaks at
//! chunk edges mark lines shared with the neighbouring chunk. A covered chunk
//! claims those shared lines: it gets an extra newline on every side that
//! borders another chunk (after the first chunk, before the last, both ways
//! in between). Positions are then assigned by folding a [`Cursor`] over the
//! chunks in order.
use std::borrow::Cow;

use crate::format::CssFormatter;
use crate::model::{Chunk, DeduplicatedSheet, PrettyChunk, PrettySheet};

/// Running line/offset position in the reassembled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    line: usize,
    offset: usize,
}

impl Cursor {
    fn start() -> Self {
        Self { line: 1, offset: 0 }
    }

    /// Position `css` at this cursor and return the placed chunk along with
    /// the cursor for the next one.
    fn place(self, chunk: &Chunk, css: String) -> (PrettyChunk, Cursor) {
        let line_count = css.split('\n').count();
        let start_offset = self.offset;
        let end_offset = (self.offset + css.len()).saturating_sub(1);
        let start_line = self.line;
        let end_line = self.line + line_count;

        let placed = PrettyChunk {
            start_offset,
            end_offset,
            is_covered: chunk.is_covered,
            start_line,
            end_line: end_line - 1,
            total_lines: end_line - start_line,
            css,
        };
        let next = Cursor {
            line: end_line,
            offset: end_offset,
        };
        (placed, next)
    }
}

/// Add the newlines that attribute boundary lines to a covered chunk.
fn claim_boundaries(css: String, index: usize, count: usize, is_covered: bool) -> String {
    if !is_covered {
        css
    } else if index == 0 {
        css + "\n"
    } else if index == count - 1 {
        format!("\n{css}")
    } else {
        format!("\n{css}\n")
    }
}

/// Byte slice `[start, end)` of `text`, decoded lossily if the bounds split
/// a UTF-8 sequence.
pub(crate) fn text_slice(text: &str, start: usize, end: usize) -> Cow<'_, str> {
    match text.get(start..end) {
        Some(s) => Cow::Borrowed(s),
        None => String::from_utf8_lossy(text.as_bytes().get(start..end).unwrap_or_default()),
    }
}

/// Format every chunk of `sheet` and stitch the results together.
///
/// Offsets and lines in the returned chunks refer to the returned `text`,
/// which is the concatenation of every chunk's `css`.
pub fn prettify(
    sheet: &DeduplicatedSheet,
    chunks: &[Chunk],
    formatter: &dyn CssFormatter,
) -> PrettySheet {
    let count = chunks.len();

    let (_, pretty_chunks) = chunks.iter().enumerate().fold(
        (Cursor::start(), Vec::with_capacity(count)),
        |(cursor, mut placed), (index, chunk)| {
            let source = text_slice(&sheet.text, chunk.start_offset, chunk.end_offset);
            let css = claim_boundaries(formatter.format(&source), index, count, chunk.is_covered);
            let (pretty, next) = cursor.place(chunk, css);
            placed.push(pretty);
            (next, placed)
        },
    );

    let text = pretty_chunks.iter().map(|c| c.css.as_str()).collect();

    PrettySheet {
        url: sheet.url.clone(),
        text,
        chunks: pretty_chunks,
    }
}
