//! Script Grammar
//!
//! This module documents the script grammar as implemented by this library and
//! holds the byte classes shared by the [parser](crate::parser) and the
//! [segment splitter](crate::segments).
//!
//! # Overview
//!
//! Game script files are plain byte streams. There is no string escaping, no
//! numeric typing and no required encoding: a value is whatever run of bytes
//! sits between separators, and the consuming game re-parses everything we emit.
//!
//! # Core Syntax
//!
//! ## Assignments
//!
//! A file is a sequence of `name operator value` triples:
//!
//! ```text
//! icon = job_miner
//! possible = {
//!     planet = { has_building = building_mine }
//! }
//! ```
//!
//! **Rules**:
//! - Names and scalar values are maximal runs of non-separator bytes.
//! - Separators are space, tab, form feed, vertical tab, `\n` and `\r`.
//! - A value may be a block: `{`, any number of elements, `}`.
//! - Blocks do not have to hold triples. `traits = { brave patient }` parses,
//!   it just cannot be grouped into triples afterwards.
//!
//! ## Operators
//!
//! | Operator | Meaning |
//! |----------|---------|
//! | `=` | assignment or equality |
//! | `>=` | greater or equal |
//! | `<=` | less or equal |
//! | `>` | greater |
//! | `<` | less |
//! | `!=` | not equal |
//!
//! `>`, `<` and `!` always begin a token of their own. When the very next byte
//! is `=` it is folded in, so `size>=2` yields `size`, `>=`, `2`. Anything
//! between the two bytes (even one space) prevents the fold: `> =` is two tokens.
//!
//! ## Comments
//!
//! `#` starts a comment that runs to the end of the line. Braces inside a
//! comment are not counted:
//!
//! ```text
//! a = 1 # a { in here is ignored
//! b = 2
//! ```
//!
//! Comments are dropped by the parser. The [segment splitter](crate::segments)
//! keeps them inside the byte spans it returns.
//!
//! # Scan States
//!
//! Both scanners share a two-state machine, [`ScanState`]:
//!
//! - `Normal → Comment` on `#`
//! - `Comment → Normal` on a line break
//! - structural effects (brace counting, token building) happen only in `Normal`
//!
//! The parser treats both `\n` and `\r` as a line break. The segment splitter
//! only accepts `\n`.
//!
//! # Output Layout
//!
//! The [writer](crate::writer) emits one triple per line, one space after every
//! name and operator, and four spaces of indentation per block level:
//!
//! ```text
//! x = 1
//! y = {
//!     z = 2
//! }
//! ```

use std::fmt;

pub(crate) const OPEN: u8 = b'{';
pub(crate) const CLOSE: u8 = b'}';
pub(crate) const COMMENT: u8 = b'#';

/// The state shared by both byte scanners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum ScanState {
    #[default]
    Normal,
    Comment,
}

/// Blank bytes other than line breaks.
#[inline]
pub(crate) fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | 0x0C | 0x0B)
}

#[inline]
pub(crate) fn is_line_break(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

/// Bytes that start a token of their own and may absorb a following `=`.
#[inline]
pub(crate) fn is_relational_prefix(byte: u8) -> bool {
    matches!(byte, b'>' | b'<' | b'!')
}

/// A relational operator, the only valid middle element of a triple.
///
/// # Examples
///
/// ```rust
/// use clausewitz_patch::Operator;
///
/// assert_eq!(Operator::from_bytes(b">="), Some(Operator::GreaterEqual));
/// assert_eq!(Operator::from_bytes(b"=>"), None);
/// assert_eq!(Operator::NotEqual.as_bytes(), b"!=");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    GreaterEqual,
    LessEqual,
    Greater,
    Less,
    NotEqual,
}

impl Operator {
    /// Every operator, in the order listed by the grammar.
    pub const ALL: [Operator; 6] = [
        Operator::Equal,
        Operator::GreaterEqual,
        Operator::LessEqual,
        Operator::Greater,
        Operator::Less,
        Operator::NotEqual,
    ];

    /// Recognizes an operator token.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            b"=" => Some(Operator::Equal),
            b">=" => Some(Operator::GreaterEqual),
            b"<=" => Some(Operator::LessEqual),
            b">" => Some(Operator::Greater),
            b"<" => Some(Operator::Less),
            b"!=" => Some(Operator::NotEqual),
            _ => None,
        }
    }

    /// Returns the source spelling of this operator.
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Operator::Equal => b"=",
            Operator::GreaterEqual => b">=",
            Operator::LessEqual => b"<=",
            Operator::Greater => b">",
            Operator::Less => b"<",
            Operator::NotEqual => b"!=",
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `bytes` spells one of the six relational operators.
#[must_use]
pub fn is_operator(bytes: &[u8]) -> bool {
    Operator::from_bytes(bytes).is_some()
}
