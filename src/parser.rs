//! Script parsing.
//!
//! This module provides the [`Parser`] that turns a raw byte buffer into a
//! [`Document`].
//!
//! ## Overview
//!
//! - **Single pass**: one left-to-right scan, no backtracking, no lookahead
//! - **Verbatim tokens**: token bytes are copied exactly as they appear
//! - **Comments discarded**: `#` to end of line never reaches the tree
//! - **Fail fast**: unbalanced braces abort the parse; no partial tree is returned
//!
//! ## Usage
//!
//! Most users should call [`parse`](crate::parse) in the crate root:
//!
//! ```rust
//! use clausewitz_patch::{parse, script};
//!
//! let doc = parse(b"foo={bar=1 baz>=2}").unwrap();
//! assert_eq!(doc, script!["foo", "=", ["bar", "=", "1", "baz", ">=", "2"]]);
//! ```
//!
//! ## Unterminated Blocks
//!
//! Input that ends inside a block is an error here, while the
//! [segment splitter](crate::segments) silently drops such a trailing span.
//! The two behaviors come from the tool this engine replaces and are kept
//! distinct on purpose.

use crate::grammar::{self, ScanState};
use crate::value::{Container, Document, Element, Position, Token};
use crate::{Error, Result};
use tracing::{debug, instrument};

/// A block under construction.
#[derive(Debug)]
struct Frame {
    children: Vec<Element>,
    origin: Option<Position>,
}

/// The script parser.
///
/// All scan state lives in this struct and is threaded through a single loop.
/// Open blocks are kept as a stack of frames (root at index 0); a child is
/// materialized into its parent only when its `}` is seen, so frames never
/// reference each other.
pub struct Parser<'a> {
    input: &'a [u8],
    position: Position,
    state: ScanState,
    separation_pending: bool,
    // Set by `>`, `<` or `!`; lets exactly the next byte fold in as `=`.
    glue_next: bool,
    frames: Vec<Frame>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Parser {
            input,
            position: Position::START,
            state: ScanState::Normal,
            separation_pending: false,
            glue_next: false,
            frames: vec![Frame {
                children: Vec::new(),
                origin: None,
            }],
        }
    }

    /// Runs the scan to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnbalancedClose`] on a `}` with no open block and
    /// [`Error::UnterminatedBlock`] if input ends inside a block.
    pub fn parse(mut self) -> Result<Document> {
        let input = self.input;
        for &byte in input {
            self.step(byte)?;
            self.position = self.position.advance(byte);
        }
        self.finish()
    }

    fn step(&mut self, byte: u8) -> Result<()> {
        let glue = std::mem::take(&mut self.glue_next);

        if grammar::is_line_break(byte) {
            self.state = ScanState::Normal;
            self.separation_pending = true;
            return Ok(());
        }
        if self.state == ScanState::Comment {
            return Ok(());
        }

        match byte {
            grammar::COMMENT => self.state = ScanState::Comment,
            grammar::OPEN => self.open_block(),
            grammar::CLOSE => self.close_block()?,
            b if grammar::is_blank(b) => self.separation_pending = true,
            b'=' => {
                if glue {
                    self.extend_token(byte);
                } else {
                    self.start_token(byte);
                }
                self.separation_pending = true;
            }
            b if grammar::is_relational_prefix(b) => {
                self.start_token(byte);
                self.glue_next = true;
                self.separation_pending = true;
            }
            _ => self.push_byte(byte),
        }
        Ok(())
    }

    fn top(&mut self) -> &mut Frame {
        // The root frame is never popped.
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn open_block(&mut self) {
        self.frames.push(Frame {
            children: Vec::new(),
            origin: Some(self.position),
        });
    }

    fn close_block(&mut self) -> Result<()> {
        if self.frames.len() == 1 {
            return Err(Error::unbalanced_close(self.position));
        }
        if let Some(frame) = self.frames.pop() {
            let block = Container::located(frame.children, frame.origin);
            self.top().children.push(Element::Container(block));
        }
        Ok(())
    }

    fn start_token(&mut self, byte: u8) {
        let token = Token::located(vec![byte], self.position);
        self.top().children.push(Element::Token(token));
    }

    fn extend_token(&mut self, byte: u8) {
        match self.top().children.last_mut() {
            Some(Element::Token(token)) => token.push(byte),
            _ => self.start_token(byte),
        }
    }

    fn push_byte(&mut self, byte: u8) {
        if std::mem::take(&mut self.separation_pending) {
            self.start_token(byte);
        } else {
            self.extend_token(byte);
        }
    }

    fn finish(mut self) -> Result<Document> {
        if self.frames.len() > 1 {
            let depth = self.frames.len() - 1;
            let opened = self
                .frames
                .last()
                .and_then(|frame| frame.origin)
                .unwrap_or(Position::START);
            return Err(Error::unterminated_block(opened, depth));
        }
        let root = self.top();
        let children = std::mem::take(&mut root.children);
        debug!(elements = children.len(), "parsed document");
        Ok(Container::located(children, None))
    }
}

/// Parses a script buffer into a [`Document`].
///
/// # Errors
///
/// Fails with a structural error when braces do not balance.
#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn parse(input: &[u8]) -> Result<Document> {
    Parser::new(input).parse().map_err(|err| {
        debug!(error = %err, "parse failed");
        err
    })
}
