//! # clausewitz_patch
//!
//! A byte-oriented engine for brace-delimited, `#`-commented game scripts.
//!
//! ## What are these scripts?
//!
//! Moddable grand-strategy games describe their content (buildings, jobs,
//! technologies, events) in a loose configuration language made of
//! `name operator value` assignments, where a value is either a bare token or
//! a `{ ... }` block. This crate parses such files into an editable tree, lets
//! you inspect and patch that tree, and writes machine-generated overrides
//! back out in a form the game's own parser accepts.
//!
//! ## Key Features
//!
//! - **Byte Exact**: tokens are kept verbatim, whatever their encoding
//! - **Positioned Errors**: every structural failure reports line and column
//! - **Edit In Place**: first-match lookups, path inserts and value rewrites
//! - **Raw Segments**: split a file into top-level definitions without parsing
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! clausewitz_patch = "0.1"
//! ```
//!
//! ### Parse, Edit, Serialize
//!
//! ```rust
//! use clausewitz_patch::{insert, parse, script, to_bytes};
//!
//! let mut job = parse(b"job_miner = {\n  category = worker # tier\n}\n").unwrap();
//! insert(&mut job, &["job_miner", "possible"], script!["has_owner", "=", "yes"].into_children())
//!     .unwrap();
//!
//! assert_eq!(
//!     to_bytes(&job),
//!     b"job_miner = {\n    category = worker\n    possible = {\n        has_owner = yes\n    }\n}\n"
//! );
//! ```
//!
//! ### Reading Fields
//!
//! ```rust
//! use clausewitz_patch::{get, group, parse};
//!
//! let doc = parse(b"foo={bar=1 baz>=2}").unwrap();
//! let top = group(&doc).unwrap();
//! let foo = get(&top, b"foo").and_then(|v| v.as_container()).unwrap();
//!
//! assert_eq!(foo.field("baz").unwrap().and_then(|v| v.as_bytes()), Some(&b"2"[..]));
//! ```
//!
//! ### Splitting Without Parsing
//!
//! ```rust
//! use clausewitz_patch::split_segments;
//!
//! let segments = split_segments(b"a = { x = 1 }\nb = { y = 2 }");
//! let names: Vec<_> = segments.iter().filter_map(|s| s.name()).collect();
//! assert_eq!(names, [&b"a"[..], b"b"]);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `warn` when include directives are
//! dropped, `debug` for parse failures and discarded trailing bytes. It never
//! installs a subscriber.
//!
//! ## Performance Characteristics
//!
//! - **Parsing**: O(n), single pass, no backtracking
//! - **Grouping**: O(n) per block, borrowing rather than copying
//! - **Serialization**: O(n) into a single output buffer
//! - **Depth**: parsing, writing, equality and drop use explicit stacks, so
//!   nesting depth is bounded by memory rather than the call stack
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - No panics in the public API

pub mod edit;
pub mod error;
pub mod grammar;
pub mod group;
pub mod listing;
pub mod macros;
pub mod options;
pub mod parser;
pub mod segments;
pub mod value;
pub mod writer;

pub use edit::{get, insert};
pub use error::{Error, ErrorKind, Result};
pub use grammar::{is_operator, Operator};
pub use group::{group, group_with_options, Triple};
pub use listing::NameListing;
pub use options::{GroupOptions, IncludePolicy, WriteOptions};
pub use parser::{parse, Parser};
pub use segments::{split_segments, Segment, Segments};
pub use value::{Container, Document, Element, Position, Token};
pub use writer::{to_bytes, to_bytes_with_options, to_writer, to_writer_with_options, Writer};

use std::io;

/// Reads all of `reader` and parses it.
///
/// # Examples
///
/// ```rust
/// use clausewitz_patch::from_reader;
///
/// let doc = from_reader(&b"a = { b = c }"[..]).unwrap();
/// assert_eq!(doc.len(), 3);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise any parse error.
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Document> {
    let mut input = Vec::new();
    reader
        .read_to_end(&mut input)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse(&input)
}
