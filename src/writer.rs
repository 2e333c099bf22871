//! Script serialization.
//!
//! This module renders a flat-form [`Container`] back into bytes the game's own
//! parser accepts.
//!
//! ## Layout
//!
//! - one triple per line, each line ending in `\n` (including the last)
//! - exactly one space after every name and operator
//! - a block value opens with `{` and a newline, its body indented one level
//!   deeper, then `}` at the parent's indentation
//! - scalar tokens are emitted verbatim
//!
//! ```rust
//! use clausewitz_patch::{script, to_bytes};
//!
//! let doc = script!["x", "=", "1", "y", "=", ["z", "=", "2"]];
//! assert_eq!(to_bytes(&doc), b"x = 1\ny = {\n    z = 2\n}\n");
//! ```
//!
//! Comments and original whitespace are never reproduced. Output of this
//! module re-parses to a structurally equal tree.
//!
//! ## Ungroupable Blocks
//!
//! The writer does not require triples. Bare lists such as
//! `traits = { brave patient }` come out on one line, each token followed by a
//! space, which still re-parses to the same tree.

use crate::grammar::is_operator;
use crate::options::WriteOptions;
use crate::value::{Container, Element};
use crate::{Error, Result};
use std::io;

/// Output state: bytes so far, whether the next element completes a triple,
/// and whether we are at the start of a line.
struct Line {
    output: Vec<u8>,
    expect_value: bool,
    at_line_start: bool,
}

impl Line {
    fn new(capacity: usize) -> Self {
        Line {
            output: Vec::with_capacity(capacity),
            expect_value: false,
            at_line_start: true,
        }
    }

    fn indent(&mut self, width: usize) {
        let len = self.output.len();
        self.output.resize(len + width, b' ');
    }

    fn token(&mut self, bytes: &[u8], width: usize) {
        if self.at_line_start {
            self.indent(width);
        }
        self.output.extend_from_slice(bytes);
        if is_operator(bytes) {
            self.output.push(b' ');
            self.expect_value = true;
            self.at_line_start = false;
        } else if self.expect_value {
            self.output.push(b'\n');
            self.expect_value = false;
            self.at_line_start = true;
        } else {
            self.output.push(b' ');
            self.at_line_start = false;
        }
    }

    /// Writes `{` and returns whether the block completes a triple.
    fn open_block(&mut self, width: usize) -> bool {
        if self.at_line_start {
            self.indent(width);
        }
        self.output.extend_from_slice(b"{\n");
        self.at_line_start = true;
        std::mem::take(&mut self.expect_value)
    }

    fn close_block(&mut self, width: usize, completes_triple: bool) {
        self.indent(width);
        self.output.push(b'}');
        self.expect_value = false;
        if completes_triple {
            self.output.push(b'\n');
            self.at_line_start = true;
        } else {
            self.at_line_start = false;
        }
    }
}

/// A block being written.
struct Frame<'a> {
    children: std::slice::Iter<'a, Element>,
    completes_triple: bool,
}

/// Renders script trees.
///
/// Created via [`Writer::new`]; most callers use [`to_bytes`](crate::to_bytes).
/// Open blocks are tracked on an explicit stack, so nesting depth is bounded
/// only by memory.
pub struct Writer {
    options: WriteOptions,
}

impl Writer {
    pub fn new(options: WriteOptions) -> Self {
        Writer { options }
    }

    /// Renders `container` as a document body at nesting depth zero.
    #[must_use]
    pub fn write(&self, container: &Container) -> Vec<u8> {
        let mut line = Line::new(container.len() * 8);
        let mut stack = vec![Frame {
            children: container.children().iter(),
            completes_triple: false,
        }];

        loop {
            let depth = stack.len() - 1;
            let width = depth * self.options.indent;
            let Some(frame) = stack.last_mut() else {
                break;
            };
            match frame.children.next() {
                Some(Element::Token(token)) => line.token(token.as_bytes(), width),
                Some(Element::Container(block)) => {
                    let completes_triple = line.open_block(width);
                    stack.push(Frame {
                        children: block.children().iter(),
                        completes_triple,
                    });
                }
                None => {
                    let completes_triple = frame.completes_triple;
                    stack.pop();
                    if depth == 0 {
                        break;
                    }
                    line.close_block(width - self.options.indent, completes_triple);
                }
            }
        }
        line.output
    }
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new(WriteOptions::default())
    }
}

/// Serializes a tree with the default layout.
#[must_use]
pub fn to_bytes(container: &Container) -> Vec<u8> {
    Writer::default().write(container)
}

/// Serializes a tree with custom options.
///
/// # Examples
///
/// ```rust
/// use clausewitz_patch::{script, to_bytes_with_options, WriteOptions};
///
/// let doc = script!["y", "=", ["z", "=", "2"]];
/// let out = to_bytes_with_options(&doc, &WriteOptions::new().with_indent(1));
/// assert_eq!(out, b"y = {\n z = 2\n}\n");
/// ```
#[must_use]
pub fn to_bytes_with_options(container: &Container, options: &WriteOptions) -> Vec<u8> {
    Writer::new(options.clone()).write(container)
}

/// Serializes a tree to a writer.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn to_writer<W: io::Write>(writer: W, container: &Container) -> Result<()> {
    to_writer_with_options(writer, container, &WriteOptions::default())
}

/// Serializes a tree to a writer with custom options.
///
/// # Examples
///
/// ```rust
/// use clausewitz_patch::{script, to_writer_with_options, WriteOptions};
///
/// let mut out = Vec::new();
/// let doc = script!["a", "=", ["b", "=", "c"]];
/// to_writer_with_options(&mut out, &doc, &WriteOptions::new().with_indent(2)).unwrap();
/// assert_eq!(out, b"a = {\n  b = c\n}\n");
/// ```
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn to_writer_with_options<W: io::Write>(
    mut writer: W,
    container: &Container,
    options: &WriteOptions,
) -> Result<()> {
    writer
        .write_all(&to_bytes_with_options(container, options))
        .map_err(|e| Error::io(&e.to_string()))
}
