//! # Source Map
//!
//! Stitches multiple source origins into a single combined buffer while
//! preserving the ability to map any combined offset back to
//! `(origin, line, column)`. This is what lets include expansion splice
//! file contents into one parse buffer without losing diagnostic locations.
//!
//! ## Usage
//!
//! ```rust
//! use scad_syntax::SourceMap;
//!
//! let mut map = SourceMap::new();
//! map.add_origin("main.scad", "a = 1;\nb = 2;", None);
//! let pos = map.get_location(7).unwrap();
//! assert_eq!(pos.line, 2);
//! assert_eq!(pos.column, 1);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A location within an origin file.
///
/// `offset` is the byte offset within the origin's own text (pre-splice),
/// `line` and `column` are 1-indexed. LF and CRLF both count as a single
/// line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Origin name, a file path or a synthetic tag like `<string>`.
    pub file: String,
    /// Byte offset within the origin's own text.
    pub offset: u32,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number, counted in characters.
    pub column: u32,
}

impl Position {
    /// Creates a position at the start of the given origin.
    pub fn start_of(file: impl Into<String>) -> Self {
        Self { file: file.into(), offset: 0, line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start_of("")
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Error returned when an offset falls into a padding gap or beyond the
/// end of the combined buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("offset {offset} is not covered by any source segment")]
pub struct OutOfRange {
    /// The offending combined offset.
    pub offset: u32,
}

/// A contiguous run of one origin's text within the combined buffer.
///
/// Splicing an include into the middle of a file splits the host segment
/// in two; `origin_offset` and the start line/column record where the
/// segment's content begins within its origin so the tail half still
/// reports positions in the host's own coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSegment {
    origin: String,
    content: String,
    combined_start: u32,
    origin_offset: u32,
    start_line: u32,
    start_column: u32,
}

impl SourceSegment {
    /// Returns the origin name this segment came from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the segment's text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the combined offset at which this segment starts.
    pub fn combined_start(&self) -> u32 {
        self.combined_start
    }

    /// Returns the combined offset one past the segment's last byte.
    pub fn combined_end(&self) -> u32 {
        self.combined_start + self.content.len() as u32
    }
}

/// An ordered sequence of [`SourceSegment`]s plus the derived combined
/// buffer.
///
/// Invariants: segments are sorted by `combined_start`, never overlap,
/// and exactly one segment covers each byte of the combined string that
/// is not splice padding.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    segments: Vec<SourceSegment>,
    combined: String,
}

impl SourceMap {
    /// Creates an empty source map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an origin's content to the map and returns the combined
    /// offset at which it was placed.
    ///
    /// With `insert_at = None` the content is appended. Otherwise it is
    /// spliced at the given combined offset: the covering segment is
    /// split when the offset falls inside one, and every following
    /// segment shifts by the inserted length. A splice point beyond the
    /// current end pads the gap with spaces; padded bytes belong to no
    /// segment.
    pub fn add_origin(&mut self, origin: &str, content: &str, insert_at: Option<u32>) -> u32 {
        let at = insert_at.unwrap_or(self.combined.len() as u32);
        let len = content.len() as u32;

        if at as usize > self.combined.len() {
            let gap = at as usize - self.combined.len();
            self.combined.extend(std::iter::repeat(' ').take(gap));
        }

        if len == 0 {
            return at;
        }

        // Split the segment the insert point falls inside, keeping both
        // halves mapped to the host origin's coordinates.
        if let Some(idx) = self
            .segments
            .iter()
            .position(|seg| seg.combined_start < at && at < seg.combined_end())
        {
            let cut = (at - self.segments[idx].combined_start) as usize;
            let seg = &mut self.segments[idx];
            let tail_content = seg.content.split_off(cut);
            let (tail_line, tail_column) = advance(seg.start_line, seg.start_column, &seg.content);
            let tail = SourceSegment {
                origin: seg.origin.clone(),
                content: tail_content,
                combined_start: at,
                origin_offset: seg.origin_offset + cut as u32,
                start_line: tail_line,
                start_column: tail_column,
            };
            self.segments.insert(idx + 1, tail);
        }

        for seg in &mut self.segments {
            if seg.combined_start >= at {
                seg.combined_start += len;
            }
        }

        let insert_idx = self.segments.partition_point(|seg| seg.combined_start < at);
        self.segments.insert(
            insert_idx,
            SourceSegment {
                origin: origin.to_string(),
                content: content.to_string(),
                combined_start: at,
                origin_offset: 0,
                start_line: 1,
                start_column: 1,
            },
        );
        self.combined.insert_str(at as usize, content);
        at
    }

    /// Returns the stitched buffer.
    pub fn get_combined_string(&self) -> &str {
        &self.combined
    }

    /// Maps a combined offset back to its origin location.
    ///
    /// Fails with [`OutOfRange`] when the offset falls in splice padding
    /// or beyond the combined length.
    pub fn get_location(&self, offset: u32) -> Result<Position, OutOfRange> {
        let idx = self.segments.partition_point(|seg| seg.combined_start <= offset);
        if idx == 0 {
            return Err(OutOfRange { offset });
        }
        let seg = &self.segments[idx - 1];
        if offset >= seg.combined_end() {
            return Err(OutOfRange { offset });
        }
        let local = (offset - seg.combined_start) as usize;
        let (line, column) = advance(seg.start_line, seg.start_column, &seg.content[..local]);
        Ok(Position {
            file: seg.origin.clone(),
            offset: seg.origin_offset + local as u32,
            line,
            column,
        })
    }

    /// Overwrites a combined range with spaces so the covered text parses
    /// away. Line terminators are preserved and each replaced character
    /// keeps its byte width, so no offset in the buffer moves.
    pub fn blank_range(&mut self, start: u32, end: u32) {
        let (start, end) = (start as usize, end as usize);
        if start >= end || end > self.combined.len() {
            return;
        }
        let replacement = blanked(&self.combined[start..end]);
        self.combined.replace_range(start..end, &replacement);

        for seg in &mut self.segments {
            let overlap_start = seg.combined_start.max(start as u32);
            let overlap_end = seg.combined_end().min(end as u32);
            if overlap_start < overlap_end {
                let local_start = (overlap_start - seg.combined_start) as usize;
                let local_end = (overlap_end - seg.combined_start) as usize;
                let rep = blanked(&seg.content[local_start..local_end]);
                seg.content.replace_range(local_start..local_end, &rep);
            }
        }
    }

    /// Debug view of the segment sequence, ordered by combined start.
    pub fn get_segments(&self) -> &[SourceSegment] {
        &self.segments
    }
}

/// Advances a 1-indexed line/column pair over `text`.
fn advance(mut line: u32, mut column: u32, text: &str) -> (u32, u32) {
    for ch in text.chars() {
        match ch {
            '\n' => {
                line += 1;
                column = 1;
            }
            // CR is part of a CRLF terminator, or stray; either way it
            // does not occupy a column.
            '\r' => {}
            _ => column += 1,
        }
    }
    (line, column)
}

/// Space-fills `text`, keeping line terminators and byte widths.
fn blanked(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\n' || ch == '\r' {
            out.push(ch);
        } else {
            out.extend(std::iter::repeat(' ').take(ch.len_utf8()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_origin_locations() {
        let mut map = SourceMap::new();
        map.add_origin("main.scad", "a = 1;\nbb = 2;", None);

        let pos = map.get_location(0).unwrap();
        assert_eq!(pos.file, "main.scad");
        assert_eq!((pos.line, pos.column), (1, 1));

        let pos = map.get_location(8).unwrap();
        assert_eq!((pos.line, pos.column), (2, 2));
        assert_eq!(pos.offset, 8);
    }

    #[test]
    fn test_crlf_counts_as_one_terminator() {
        let mut map = SourceMap::new();
        map.add_origin("main.scad", "a = 1;\r\nb = 2;", None);
        let pos = map.get_location(8).unwrap();
        assert_eq!((pos.line, pos.column), (2, 1));
    }

    #[test]
    fn test_append_two_origins() {
        let mut map = SourceMap::new();
        let first = map.add_origin("a.scad", "x = 1;", None);
        let second = map.add_origin("b.scad", "y = 2;", None);
        assert_eq!(first, 0);
        assert_eq!(second, 6);
        assert_eq!(map.get_combined_string(), "x = 1;y = 2;");
        assert_eq!(map.get_location(7).unwrap().file, "b.scad");
        assert_eq!(map.get_location(7).unwrap().offset, 1);
    }

    #[test]
    fn test_splice_splits_host_segment() {
        let mut map = SourceMap::new();
        map.add_origin("main.scad", "abc\ndef", None);
        map.add_origin("inc.scad", "XY", Some(4));

        assert_eq!(map.get_combined_string(), "abc\nXYdef");
        assert_eq!(map.get_segments().len(), 3);

        // Head half keeps main coordinates.
        let pos = map.get_location(1).unwrap();
        assert_eq!((pos.file.as_str(), pos.offset), ("main.scad", 1));

        // Spliced content maps to its own origin.
        let pos = map.get_location(5).unwrap();
        assert_eq!((pos.file.as_str(), pos.offset), ("inc.scad", 1));
        assert_eq!((pos.line, pos.column), (1, 2));

        // Tail half still reports host coordinates, line 2.
        let pos = map.get_location(6).unwrap();
        assert_eq!((pos.file.as_str(), pos.offset), ("main.scad", 4));
        assert_eq!((pos.line, pos.column), (2, 1));
    }

    #[test]
    fn test_splice_shifts_following_segments() {
        let mut map = SourceMap::new();
        map.add_origin("a.scad", "aaa", None);
        map.add_origin("b.scad", "bbb", None);
        map.add_origin("c.scad", "CC", Some(3));

        assert_eq!(map.get_combined_string(), "aaaCCbbb");
        let pos = map.get_location(5).unwrap();
        assert_eq!((pos.file.as_str(), pos.offset), ("b.scad", 0));
    }

    #[test]
    fn test_gap_padding_is_uncovered() {
        let mut map = SourceMap::new();
        map.add_origin("a.scad", "aa", None);
        map.add_origin("b.scad", "bb", Some(5));

        assert_eq!(map.get_combined_string(), "aa   bb");
        assert!(map.get_location(3).is_err());
        assert_eq!(map.get_location(5).unwrap().file, "b.scad");
    }

    #[test]
    fn test_out_of_range_past_end() {
        let mut map = SourceMap::new();
        map.add_origin("a.scad", "abc", None);
        assert!(map.get_location(3).is_err());
        assert!(map.get_location(2).is_ok());
    }

    #[test]
    fn test_blank_range_keeps_offsets() {
        let mut map = SourceMap::new();
        map.add_origin("a.scad", "abc\ndef", None);
        map.blank_range(0, 5);
        assert_eq!(map.get_combined_string(), "   \n ef");
        // Locations after the blanked range are unchanged.
        let pos = map.get_location(5).unwrap();
        assert_eq!((pos.line, pos.column), (2, 2));
    }

    #[test]
    fn test_segments_are_ordered() {
        let mut map = SourceMap::new();
        map.add_origin("a.scad", "aaaa", None);
        map.add_origin("b.scad", "b", Some(2));
        map.add_origin("c.scad", "c", Some(0));

        let starts: Vec<u32> = map.get_segments().iter().map(|s| s.combined_start()).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);

        // Full coverage, no overlap.
        let mut covered = 0;
        for seg in map.get_segments() {
            assert_eq!(seg.combined_start(), covered);
            covered = seg.combined_end();
        }
        assert_eq!(covered as usize, map.get_combined_string().len());
    }
}
