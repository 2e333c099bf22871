//! Top-level segment splitting.
//!
//! When a patch only needs to copy or regex-rewrite whole definitions, building
//! a tree is unnecessary. [`Segments`] walks the input counting brace depth and
//! yields each top-level `name = { ... }` definition as an opaque byte span,
//! original formatting and comments included.
//!
//! ```rust
//! use clausewitz_patch::split_segments;
//!
//! let input = b"# buildings\nbuilding_a = { cost = 1 }\nbuilding_b = {\n  cost = 2 # }\n}\n";
//! let segments = split_segments(input);
//!
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[0].name(), Some(&b"building_a"[..]));
//! assert_eq!(segments[0].as_bytes(), b"# buildings\nbuilding_a = { cost = 1 }");
//! assert_eq!(segments[1].as_bytes(), b"\nbuilding_b = {\n  cost = 2 # }\n}");
//! ```
//!
//! ## Rules
//!
//! - `#` opens a comment that only a `\n` closes; braces inside it are not counted
//! - a segment runs from the end of the previous one through the `}` that
//!   returns depth to zero, so top-level `a = b` lines before a block end up in
//!   that block's leading bytes
//! - a `}` at depth zero is kept as ordinary bytes
//! - a trailing span that never returns to depth zero is dropped
//!
//! The last rule differs from [`parse`](crate::parse), which rejects an
//! unterminated block. That asymmetry is inherited from the tool this engine
//! replaces and is kept as is.

use crate::grammar::{self, ScanState};
use std::ops::Range;
use tracing::debug;

/// One top-level definition, borrowed from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    source: &'a [u8],
    start: usize,
    open: usize,
    end: usize,
}

impl<'a> Segment<'a> {
    /// The whole span, leading bytes included.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.source[self.start..self.end]
    }

    /// Byte range of this segment within the input.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Everything before the first `{`: comments, stray lines, the name and operator.
    #[must_use]
    pub fn header(&self) -> &'a [u8] {
        &self.source[self.start..self.open]
    }

    /// The outermost block, braces included.
    #[must_use]
    pub fn body(&self) -> &'a [u8] {
        &self.source[self.open..self.end]
    }

    /// The last word of the header outside comments, normally the definition name.
    #[must_use]
    pub fn name(&self) -> Option<&'a [u8]> {
        let header = self.header();
        let mut state = ScanState::Normal;
        let mut word: Option<Range<usize>> = None;
        let mut last: Option<Range<usize>> = None;

        for (i, &byte) in header.iter().enumerate() {
            let is_word_byte = match state {
                ScanState::Comment => {
                    if byte == b'\n' {
                        state = ScanState::Normal;
                    }
                    false
                }
                ScanState::Normal if byte == grammar::COMMENT => {
                    state = ScanState::Comment;
                    false
                }
                ScanState::Normal => {
                    !(grammar::is_blank(byte)
                        || grammar::is_line_break(byte)
                        || grammar::is_relational_prefix(byte)
                        || byte == b'='
                        || byte == grammar::CLOSE)
                }
            };
            if is_word_byte {
                word = Some(word.map_or(i..i + 1, |w| w.start..i + 1));
            } else if let Some(w) = word.take() {
                last = Some(w);
            }
        }
        word.or(last).map(|range| &header[range])
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// Iterator over the top-level segments of an input.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    source: &'a [u8],
    cursor: usize,
}

impl<'a> Segments<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Segments { source, cursor: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let start = self.cursor;
        let mut state = ScanState::Normal;
        let mut depth = 0usize;
        let mut open = None;

        while self.cursor < self.source.len() {
            let byte = self.source[self.cursor];
            self.cursor += 1;

            match state {
                ScanState::Comment => {
                    if byte == b'\n' {
                        state = ScanState::Normal;
                    }
                }
                ScanState::Normal => match byte {
                    grammar::COMMENT => state = ScanState::Comment,
                    grammar::OPEN => {
                        if open.is_none() {
                            open = Some(self.cursor - 1);
                        }
                        depth += 1;
                    }
                    grammar::CLOSE if depth > 0 => {
                        depth -= 1;
                        if depth == 0 {
                            return open.map(|open| Segment {
                                source: self.source,
                                start,
                                open,
                                end: self.cursor,
                            });
                        }
                    }
                    _ => {}
                },
            }
        }

        let tail = &self.source[start..];
        if has_content(tail) {
            debug!(
                discarded = tail.len(),
                depth, "dropping trailing bytes without a complete block"
            );
        }
        None
    }
}

/// Whether `bytes` hold anything besides blanks, line breaks and comments.
fn has_content(bytes: &[u8]) -> bool {
    let mut state = ScanState::Normal;
    bytes.iter().any(|&byte| match state {
        ScanState::Comment => {
            if byte == b'\n' {
                state = ScanState::Normal;
            }
            false
        }
        ScanState::Normal if byte == grammar::COMMENT => {
            state = ScanState::Comment;
            false
        }
        ScanState::Normal => !(grammar::is_blank(byte) || grammar::is_line_break(byte)),
    })
}

/// Splits `input` into its top-level segments, in source order.
#[must_use]
pub fn split_segments(input: &[u8]) -> Vec<Segment<'_>> {
    Segments::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(input: &[u8]) -> Vec<&[u8]> {
        split_segments(input).iter().map(|s| s.as_bytes()).collect()
    }

    #[test]
    fn test_segments_in_order() {
        let input = b"a = { x = 1 }\nb = { y = { z = 2 } }";
        assert_eq!(
            spans(input),
            vec![&b"a = { x = 1 }"[..], &b"\nb = { y = { z = 2 } }"[..]]
        );
    }

    #[test]
    fn test_comment_braces_not_counted() {
        let input = b"a = { # }\n}\n";
        assert_eq!(spans(input), vec![&b"a = { # }\n}"[..]]);
    }

    #[test]
    fn test_carriage_return_does_not_end_comment() {
        // The `}` after `\r` is still inside the comment.
        let input = b"a = { # note\r}\n}";
        assert_eq!(spans(input), vec![&b"a = { # note\r}\n}"[..]]);
    }

    #[test]
    fn test_unterminated_trailing_span_dropped() {
        let input = b"a = { }\nb = { c = {";
        assert_eq!(spans(input), vec![&b"a = { }"[..]]);
    }

    #[test]
    fn test_trailing_prefix_without_block_dropped() {
        let input = b"a = { }\nstray = value\n";
        assert_eq!(spans(input), vec![&b"a = { }"[..]]);
    }

    #[test]
    fn test_top_level_scalars_join_next_segment() {
        let input = b"@cost = 5\nb = { }";
        let segments = split_segments(input);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].header(), b"@cost = 5\nb = ");
        assert_eq!(segments[0].body(), b"{ }");
        assert_eq!(segments[0].name(), Some(&b"b"[..]));
    }

    #[test]
    fn test_stray_close_is_prefix() {
        let input = b"}\na = { }";
        let segments = split_segments(input);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].as_bytes(), b"}\na = { }");
        assert_eq!(segments[0].name(), Some(&b"a"[..]));
    }

    #[test]
    fn test_name_skips_comments() {
        let input = b"# old_name = {\nnew_name={}";
        let segments = split_segments(input);
        assert_eq!(segments[0].name(), Some(&b"new_name"[..]));
        assert_eq!(segments[0].span(), 0..input.len());
    }

    #[test]
    fn test_name_of_anonymous_block() {
        let segments = split_segments(b"{ a = 1 }");
        assert_eq!(segments[0].name(), None);
    }

    #[test]
    fn test_trailing_whitespace_and_comments_are_not_content() {
        assert!(!has_content(b""));
        assert!(!has_content(b"\n\r\n \t"));
        assert!(!has_content(b"\n# footer { not a block\n  # another\n"));
        assert!(has_content(b"\nstray = value\n"));
        assert!(has_content(b"# note\nb = {"));
        assert!(has_content(b"}"));
    }

    #[test]
    fn test_trailing_newline_yields_every_segment() {
        let input = b"a = { }\nb = { }\n\n# end of file\n";
        let segments = split_segments(input);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].as_bytes(), b"\nb = { }");
    }

    #[test]
    fn test_empty_input() {
        assert!(split_segments(b"").is_empty());
    }
}
