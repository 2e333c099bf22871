//! Tree representation of parsed script data.
//!
//! This module provides the [`Element`] enum, the node type of every parsed or
//! generated script tree.
//!
//! ## Core Types
//!
//! - [`Element`]: either a scalar [`Token`] or a nested [`Container`]
//! - [`Token`]: a verbatim byte string
//! - [`Container`]: an ordered list of elements, written `{ ... }` in source
//! - [`Document`]: the top-level container of one file
//! - [`Position`]: where in the source a token or block began
//!
//! Containers always hold the *flat form*: names, operators and values side by
//! side, exactly as they appeared. Triples are a borrowed view produced on
//! demand by [`group`](crate::group()).
//!
//! ## Equality
//!
//! Positions are diagnostics only. Two trees compare equal when their bytes
//! and shapes match, wherever they came from:
//!
//! ```rust
//! use clausewitz_patch::{parse, script};
//!
//! let parsed = parse(b"a = { b = 1 }").unwrap();
//! assert_eq!(parsed, script!["a", "=", ["b", "=", "1"]]);
//! ```
//!
//! ## Ownership
//!
//! A container exclusively owns its children. Splicing content from one
//! document into another requires an explicit `clone()`.

use serde::{Serialize, Serializer};
use std::fmt;

/// A location in the parsed input.
///
/// `line` and `column` are 1-based; `column` counts bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The first byte of an input.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Returns the position of the byte following `byte`.
    #[must_use]
    pub(crate) fn advance(self, byte: u8) -> Self {
        if byte == b'\n' {
            Position {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Position {
                offset: self.offset + 1,
                column: self.column + 1,
                ..self
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (byte {})",
            self.line, self.column, self.offset
        )
    }
}

/// A scalar: an atomic run of non-separator bytes.
///
/// Bytes are kept verbatim; no case folding or numeric interpretation happens.
#[derive(Clone, Default)]
pub struct Token {
    bytes: Vec<u8>,
    origin: Option<Position>,
}

impl Token {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Token {
            bytes: bytes.into(),
            origin: None,
        }
    }

    pub(crate) fn located(bytes: Vec<u8>, origin: Position) -> Self {
        Token {
            bytes,
            origin: Some(origin),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the token as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Returns where this token started in the source, if it was parsed.
    #[must_use]
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Token {}

impl PartialEq<[u8]> for Token {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::new(s.as_bytes())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::new(s.into_bytes())
    }
}

impl From<&[u8]> for Token {
    fn from(bytes: &[u8]) -> Self {
        Token::new(bytes)
    }
}

impl From<Vec<u8>> for Token {
    fn from(bytes: Vec<u8>) -> Self {
        Token::new(bytes)
    }
}

/// An ordered, nestable sequence of elements.
///
/// Equality and drop walk the tree with an explicit stack, so arbitrarily
/// deep nesting is safe for them. `Clone`, `Debug` and `Serialize` recurse
/// once per nesting level.
#[derive(Clone, Default)]
pub struct Container {
    children: Vec<Element>,
    origin: Option<Position>,
}

/// The top-level container of one parsed file.
pub type Document = Container;

impl Container {
    #[must_use]
    pub fn new() -> Self {
        Container::default()
    }

    #[must_use]
    pub fn from_elements(children: Vec<Element>) -> Self {
        Container {
            children,
            origin: None,
        }
    }

    pub(crate) fn located(children: Vec<Element>, origin: Option<Position>) -> Self {
        Container { children, origin }
    }

    /// Returns where this block's `{` was in the source, if it was parsed.
    ///
    /// A document root has no origin.
    #[must_use]
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Direct access to the flat child list.
    ///
    /// Callers are responsible for keeping the block well formed if they
    /// intend to group it afterwards.
    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        &mut self.children
    }

    #[must_use]
    pub fn into_children(mut self) -> Vec<Element> {
        std::mem::take(&mut self.children)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.children.iter()
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.children.push(element.into());
    }

    /// Appends `name operator value` to the end of this block.
    pub fn push_triple(
        &mut self,
        name: impl Into<Token>,
        operator: crate::Operator,
        value: impl Into<Element>,
    ) {
        self.children.reserve(3);
        self.children.push(Element::Token(name.into()));
        self.children
            .push(Element::Token(Token::new(operator.as_bytes())));
        self.children.push(value.into());
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self.children(), other.children())];
        while let Some((left, right)) = pending.pop() {
            if left.len() != right.len() {
                return false;
            }
            for pair in left.iter().zip(right) {
                match pair {
                    (Element::Token(a), Element::Token(b)) if a == b => {}
                    (Element::Container(a), Element::Container(b)) => {
                        pending.push((a.children(), b.children()));
                    }
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(element) = pending.pop() {
            if let Element::Container(mut block) = element {
                pending.append(&mut block.children);
            }
        }
    }
}

impl Eq for Container {}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.children).finish()
    }
}

impl Extend<Element> for Container {
    fn extend<I: IntoIterator<Item = Element>>(&mut self, iter: I) {
        self.children.extend(iter);
    }
}

impl FromIterator<Element> for Container {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Container::from_elements(iter.into_iter().collect())
    }
}

impl IntoIterator for Container {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_children().into_iter()
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// A node of a script tree.
///
/// # Examples
///
/// ```rust
/// use clausewitz_patch::{Container, Element};
///
/// let scalar = Element::from("yes");
/// let block = Element::from(Container::new());
///
/// assert_eq!(scalar.as_bytes(), Some(&b"yes"[..]));
/// assert!(block.is_container());
/// assert!(block.as_token().is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Element {
    Token(Token),
    Container(Container),
}

impl Element {
    #[must_use]
    pub fn is_token(&self) -> bool {
        matches!(self, Element::Token(_))
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Element::Container(_))
    }

    #[must_use]
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Element::Token(token) => Some(token),
            Element::Container(_) => None,
        }
    }

    /// Returns the bytes of a scalar element.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_token().map(Token::as_bytes)
    }

    #[must_use]
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Element::Container(container) => Some(container),
            Element::Token(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Element::Container(container) => Some(container),
            Element::Token(_) => None,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Option<Position> {
        match self {
            Element::Token(token) => token.origin(),
            Element::Container(container) => container.origin(),
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Token(token) => fmt::Debug::fmt(token, f),
            Element::Container(container) => fmt::Debug::fmt(container, f),
        }
    }
}

impl From<Token> for Element {
    fn from(token: Token) -> Self {
        Element::Token(token)
    }
}

impl From<Container> for Element {
    fn from(container: Container) -> Self {
        Element::Container(container)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Token(s.into())
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::Token(s.into())
    }
}

impl From<&[u8]> for Element {
    fn from(bytes: &[u8]) -> Self {
        Element::Token(bytes.into())
    }
}

impl From<Vec<u8>> for Element {
    fn from(bytes: Vec<u8>) -> Self {
        Element::Token(bytes.into())
    }
}

impl From<Vec<Element>> for Element {
    fn from(children: Vec<Element>) -> Self {
        Element::Container(Container::from_elements(children))
    }
}

// Debug dumps: valid UTF-8 tokens become strings, anything else raw bytes.
impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_bytes(&self.bytes),
        }
    }
}

impl Serialize for Container {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.children)
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Element::Token(token) => token.serialize(serializer),
            Element::Container(container) => container.serialize(serializer),
        }
    }
}
