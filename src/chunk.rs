use crate::error::{CsscovError, Result};
use crate::model::{Chunk, Range};

/// Verify the chunker's precondition: ranges are ascending, do not overlap,
/// are non-empty (`start < end`) and lie within a text of `text_len` bytes.
///
/// Overlap can legitimately arise (the at-rule heuristic may pull a start in
/// front of the previous range's end, and merged observations may overlap),
/// but there is no agreed way to resolve it, so it is reported rather than
/// patched over.
pub fn check_ranges(ranges: &[Range], text_len: usize) -> Result<()> {
    let mut previous_end = 0;
    for (index, range) in ranges.iter().enumerate() {
        if range.start < previous_end || range.end <= range.start || range.end > text_len {
            return Err(CsscovError::UnorderedRanges {
                index,
                start: range.start,
                end: range.end,
                previous_end,
                text_len,
            });
        }
        previous_end = range.end;
    }
    Ok(())
}

/// Partition `[0, text_len)` into alternating uncovered/covered chunks.
///
/// The result is contiguous and exhaustive: it starts at 0, ends at
/// `text_len`, and each chunk ends where the next begins. No chunk is
/// empty.
pub fn chunkify(ranges: &[Range], text_len: usize) -> Result<Vec<Chunk>> {
    check_ranges(ranges, text_len)?;

    let mut chunks = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut offset = 0;

    for range in ranges {
        if offset != range.start {
            chunks.push(Chunk::uncovered(offset, range.start));
        }
        chunks.push(Chunk::covered(range.start, range.end));
        offset = range.end;
    }

    if offset != text_len {
        chunks.push(Chunk::uncovered(offset, text_len));
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "a { color: red; } b { color: green; } c { color: blue; }";

    fn triples(chunks: &[Chunk]) -> Vec<(usize, usize, bool)> {
        chunks
            .iter()
            .map(|c| (c.start_offset, c.end_offset, c.is_covered))
            .collect()
    }

    #[test]
    fn test_text_length() {
        assert_eq!(TEXT.len(), 56);
    }

    #[test]
    fn test_outer_chunks_covered() {
        let chunks = chunkify(&[Range::new(0, 17), Range::new(38, 56)], TEXT.len()).unwrap();
        assert_eq!(
            triples(&chunks),
            vec![(0, 17, true), (17, 38, false), (38, 56, true)]
        );
    }

    #[test]
    fn test_middle_chunk_covered() {
        let chunks = chunkify(&[Range::new(17, 38)], TEXT.len()).unwrap();
        assert_eq!(
            triples(&chunks),
            vec![(0, 17, false), (17, 38, true), (38, 56, false)]
        );
    }

    #[test]
    fn test_all_covered() {
        let chunks = chunkify(&[Range::new(0, 56)], TEXT.len()).unwrap();
        assert_eq!(triples(&chunks), vec![(0, 56, true)]);
    }

    #[test]
    fn test_none_covered() {
        let chunks = chunkify(&[], TEXT.len()).unwrap();
        assert_eq!(triples(&chunks), vec![(0, 56, false)]);
    }

    #[test]
    fn test_empty_text() {
        assert!(chunkify(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_adjacent_ranges_repeat_coverage() {
        // adjacency (e.g. after widening to an '@') yields consecutive covered chunks
        let chunks = chunkify(&[Range::new(0, 10), Range::new(10, 20)], 30).unwrap();
        assert_eq!(
            triples(&chunks),
            vec![(0, 10, true), (10, 20, true), (20, 30, false)]
        );
    }

    #[test]
    fn test_partition_is_contiguous_and_exhaustive() {
        let cases: Vec<Vec<Range>> = vec![
            vec![],
            vec![Range::new(0, 1)],
            vec![Range::new(3, 9), Range::new(12, 40), Range::new(41, 56)],
            vec![Range::new(5, 6), Range::new(50, 56)],
        ];
        for ranges in cases {
            let chunks = chunkify(&ranges, TEXT.len()).unwrap();
            assert_eq!(chunks.first().unwrap().start_offset, 0);
            assert_eq!(chunks.last().unwrap().end_offset, TEXT.len());
            for pair in chunks.windows(2) {
                assert_eq!(pair[0].end_offset, pair[1].start_offset);
            }
            for chunk in &chunks {
                assert!(chunk.end_offset > chunk.start_offset, "empty chunk emitted");
            }
        }
    }

    #[test]
    fn test_overlapping_ranges_are_unsupported() {
        let err = chunkify(&[Range::new(0, 20), Range::new(10, 30)], 56).unwrap_err();
        assert!(matches!(
            err,
            CsscovError::UnorderedRanges {
                index: 1,
                start: 10,
                previous_end: 20,
                ..
            }
        ));
    }

    #[test]
    fn test_descending_ranges_are_unsupported() {
        let result = chunkify(&[Range::new(30, 40), Range::new(0, 10)], 56);
        assert!(matches!(result, Err(CsscovError::UnorderedRanges { index: 1, .. })));
    }

    #[test]
    fn test_range_past_text_is_unsupported() {
        let result = chunkify(&[Range::new(0, 60)], 56);
        assert!(matches!(result, Err(CsscovError::UnorderedRanges { index: 0, .. })));
    }

    #[test]
    fn test_inverted_range_is_unsupported() {
        assert!(check_ranges(&[Range::new(9, 3)], 56).is_err());
    }

    #[test]
    fn test_empty_range_is_unsupported() {
        let result = chunkify(&[Range::new(12, 12)], 56);
        assert!(matches!(
            result,
            Err(CsscovError::UnorderedRanges { index: 0, start: 12, end: 12, .. })
        ));
    }
}
