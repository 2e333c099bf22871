//! Error types for parsing, grouping and editing script trees.
//!
//! ## Error Categories
//!
//! Every [`Error`] belongs to one [`ErrorKind`]:
//!
//! - **Structural**: unbalanced braces, in either direction
//! - **Arity**: a block that does not split into `name operator value` triples
//! - **Operator**: a triple whose middle element is not a relational operator
//! - **Lookup**: an addressed field is absent (non-fatal, an existence check)
//! - **Policy**: a directive or shape with no defined rewrite
//! - **Io**: reading or writing failed
//!
//! ## Error Context
//!
//! Errors raised against parsed input carry a [`Position`] (byte offset, line
//! and column). Trees built in code have no positions, so their errors omit it.
//! Wrap an error with [`Error::with_path`] to name the offending file:
//!
//! ```rust
//! use clausewitz_patch::{parse, ErrorKind};
//!
//! let err = parse(b"a = {\n  b = 1\n").unwrap_err().with_path("common/pop_jobs/00_jobs.txt");
//! assert_eq!(err.kind(), ErrorKind::Structural);
//! assert!(err.to_string().starts_with("common/pop_jobs/00_jobs.txt: "));
//! assert!(err.to_string().contains("line 1, column 5"));
//! ```

use crate::value::Position;
use std::path::PathBuf;
use thiserror::Error;

/// Represents every failure the engine can report.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A `}` with no open block.
    #[error("Unbalanced close brace at {at}")]
    UnbalancedClose { at: Position },

    /// Input ended while blocks were still open.
    #[error("Unterminated block opened at {opened}: input ended {depth} level(s) deep")]
    UnterminatedBlock { opened: Position, depth: usize },

    /// A block whose length is not a multiple of three.
    #[error("Arity error in {}: {len} elements do not split into triples", describe(.at))]
    Arity { len: usize, at: Option<Position> },

    /// A block in the name slot of a triple.
    #[error("Arity error in {}: a block cannot be used as a field name", describe(.at))]
    MisplacedBlock { at: Option<Position> },

    /// The middle element of a triple is not a relational operator.
    #[error("Operator error at {}: expected one of = >= <= > < !=, found `{found}`", describe(.at))]
    Operator { found: String, at: Option<Position> },

    /// A required field is absent.
    #[error("Field `{name}` not found")]
    MissingField { name: String },

    /// A directive or shape with no defined rewrite.
    #[error("Policy violation at {}: `{directive}` {msg}", describe(.at))]
    Policy {
        directive: String,
        msg: String,
        at: Option<Position>,
    },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Any of the above, attributed to a file.
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

/// The error taxonomy used by callers to pick a recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Structural,
    Arity,
    Operator,
    Lookup,
    Policy,
    Io,
}

fn describe(at: &Option<Position>) -> String {
    match at {
        Some(position) => position.to_string(),
        None => "generated content".to_string(),
    }
}

impl Error {
    /// Creates an unbalanced close error.
    pub fn unbalanced_close(at: Position) -> Self {
        Error::UnbalancedClose { at }
    }

    /// Creates an unterminated block error.
    pub fn unterminated_block(opened: Position, depth: usize) -> Self {
        Error::UnterminatedBlock { opened, depth }
    }

    /// Creates an arity error for a block of `len` elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clausewitz_patch::{Error, ErrorKind};
    ///
    /// let err = Error::arity(4, None);
    /// assert_eq!(err.kind(), ErrorKind::Arity);
    /// assert!(err.to_string().contains("4 elements"));
    /// ```
    pub fn arity(len: usize, at: Option<Position>) -> Self {
        Error::Arity { len, at }
    }

    pub fn misplaced_block(at: Option<Position>) -> Self {
        Error::MisplacedBlock { at }
    }

    /// Creates an operator error; `found` is rendered lossily.
    pub fn operator(found: &[u8], at: Option<Position>) -> Self {
        Error::Operator {
            found: String::from_utf8_lossy(found).into_owned(),
            at,
        }
    }

    pub fn missing_field(name: &[u8]) -> Self {
        Error::MissingField {
            name: String::from_utf8_lossy(name).into_owned(),
        }
    }

    /// Creates a policy violation for `directive`.
    pub fn policy(directive: &[u8], msg: &str, at: Option<Position>) -> Self {
        Error::Policy {
            directive: String::from_utf8_lossy(directive).into_owned(),
            msg: msg.to_string(),
            at,
        }
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Attributes this error to `path`.
    ///
    /// An error that already names a file is re-attributed rather than nested.
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        let source = match self {
            Error::InFile { source, .. } => source,
            other => Box::new(other),
        };
        Error::InFile {
            path: path.into(),
            source,
        }
    }

    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnbalancedClose { .. } | Error::UnterminatedBlock { .. } => ErrorKind::Structural,
            Error::Arity { .. } | Error::MisplacedBlock { .. } => ErrorKind::Arity,
            Error::Operator { .. } => ErrorKind::Operator,
            Error::MissingField { .. } => ErrorKind::Lookup,
            Error::Policy { .. } => ErrorKind::Policy,
            Error::Io(_) => ErrorKind::Io,
            Error::InFile { source, .. } => source.kind(),
        }
    }

    /// Returns `false` only for lookup failures, which callers use as an existence check.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind() != ErrorKind::Lookup
    }

    /// Returns where in the source the error was detected, if known.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::UnbalancedClose { at } => Some(*at),
            Error::UnterminatedBlock { opened, .. } => Some(*opened),
            Error::Arity { at, .. }
            | Error::MisplacedBlock { at }
            | Error::Operator { at, .. }
            | Error::Policy { at, .. } => *at,
            Error::MissingField { .. } | Error::Io(_) => None,
            Error::InFile { source, .. } => source.position(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: usize, line: usize, column: usize) -> Position {
        Position {
            offset,
            line,
            column,
        }
    }

    #[test]
    fn test_display_includes_position() {
        let err = Error::unbalanced_close(at(12, 2, 3));
        assert_eq!(
            err.to_string(),
            "Unbalanced close brace at line 2, column 3 (byte 12)"
        );
    }

    #[test]
    fn test_generated_content_has_no_position() {
        let err = Error::operator(b"foo", None);
        assert!(err.to_string().contains("generated content"));
        assert!(err.to_string().contains("`foo`"));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_with_path_keeps_kind_and_position() {
        let err = Error::arity(5, Some(at(0, 1, 1))).with_path("a.txt");
        assert_eq!(err.kind(), ErrorKind::Arity);
        assert_eq!(err.position(), Some(at(0, 1, 1)));
        assert!(err.to_string().starts_with("a.txt: Arity error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_with_path_does_not_nest() {
        let err = Error::io("denied").with_path("a.txt").with_path("b.txt");
        assert_eq!(err.to_string(), "b.txt: IO error: denied");
    }

    #[test]
    fn test_lookup_is_not_fatal() {
        assert!(!Error::missing_field(b"icon").is_fatal());
        assert!(Error::policy(b"inline_script", "is not supported", None).is_fatal());
    }
}
