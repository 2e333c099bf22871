//! Triple grouping.
//!
//! Parsed blocks hold a flat list of elements. [`group`] reads such a list as
//! consecutive `name operator value` triples, checking on the way that the
//! list actually has that shape.
//!
//! ```rust
//! use clausewitz_patch::{group, parse, Operator};
//!
//! let doc = parse(b"size >= 2 icon = job_miner").unwrap();
//! let triples = group(&doc).unwrap();
//!
//! assert_eq!(triples.len(), 2);
//! assert_eq!(triples[0].name, "size");
//! assert_eq!(triples[0].operator, Operator::GreaterEqual);
//! assert_eq!(triples[1].value.as_bytes(), Some(&b"job_miner"[..]));
//! ```
//!
//! ## Include Directives
//!
//! Triples named after [`GroupOptions::include_marker`] pull in other scripts
//! by reference. The engine does not expand them; [`IncludePolicy`] decides
//! whether they are dropped, rejected or passed through.

use crate::grammar::Operator;
use crate::options::{GroupOptions, IncludePolicy};
use crate::value::{Container, Element, Token};
use crate::{Error, Result};
use tracing::warn;

/// A borrowed `name operator value` view into a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triple<'a> {
    pub name: &'a Token,
    pub operator: Operator,
    pub value: &'a Element,
}

impl<'a> Triple<'a> {
    /// Returns the value if it is a block.
    #[must_use]
    pub fn block(&self) -> Option<&'a Container> {
        self.value.as_container()
    }

    /// Copies this triple back into flat form.
    #[must_use]
    pub fn to_elements(&self) -> [Element; 3] {
        [
            Element::Token(self.name.clone()),
            Element::Token(Token::new(self.operator.as_bytes())),
            self.value.clone(),
        ]
    }
}

/// Groups a block into triples, applying the default include policy.
///
/// # Errors
///
/// See [`group_with_options`].
pub fn group(container: &Container) -> Result<Vec<Triple<'_>>> {
    group_with_options(container, &GroupOptions::default())
}

/// Groups a block into triples.
///
/// # Errors
///
/// - [`Error::Arity`] if the block length is not a multiple of three
/// - [`Error::MisplacedBlock`] if a block sits in a name slot
/// - [`Error::Operator`] if a middle element is not a relational operator
/// - [`Error::Policy`] for include directives under [`IncludePolicy::Fail`]
pub fn group_with_options<'a>(
    container: &'a Container,
    options: &GroupOptions,
) -> Result<Vec<Triple<'a>>> {
    let triples = split_triples(container)?;
    apply_include_policy(triples, options)
}

/// The structural check alone: no include policy.
pub(crate) fn split_triples(container: &Container) -> Result<Vec<Triple<'_>>> {
    let children = container.children();
    let leftover = children.len() % 3;
    if leftover != 0 {
        // Point at the incomplete trailing group; a document root has no origin.
        let at = children[children.len() - leftover]
            .origin()
            .or_else(|| container.origin());
        return Err(Error::arity(children.len(), at));
    }
    children
        .chunks_exact(3)
        .map(|chunk| triple_from_chunk(&chunk[0], &chunk[1], &chunk[2]))
        .collect()
}

fn triple_from_chunk<'a>(
    name: &'a Element,
    operator: &'a Element,
    value: &'a Element,
) -> Result<Triple<'a>> {
    let name = match name {
        Element::Token(token) => token,
        Element::Container(block) => return Err(Error::misplaced_block(block.origin())),
    };
    let operator = match operator {
        Element::Token(token) => Operator::from_bytes(token.as_bytes())
            .ok_or_else(|| Error::operator(token.as_bytes(), token.origin()))?,
        Element::Container(block) => return Err(Error::operator(b"{ ... }", block.origin())),
    };
    Ok(Triple {
        name,
        operator,
        value,
    })
}

/// Index of the value of the first triple named `name`, after a structural check.
pub(crate) fn value_index(container: &Container, name: &[u8]) -> Result<Option<usize>> {
    let triples = split_triples(container)?;
    Ok(triples
        .iter()
        .position(|triple| triple.name.as_bytes() == name)
        .map(|i| i * 3 + 2))
}

fn apply_include_policy<'a>(
    triples: Vec<Triple<'a>>,
    options: &GroupOptions,
) -> Result<Vec<Triple<'a>>> {
    let marker = options.include_marker.as_bytes();
    let is_include = |triple: &Triple<'_>| triple.name.as_bytes() == marker;

    match options.include_policy {
        IncludePolicy::Passthrough => Ok(triples),
        IncludePolicy::Drop => Ok(drop_includes(
            triples,
            options,
            "dropping unprocessed include directives",
        )),
        IncludePolicy::Fail => match triples.iter().find(|t| is_include(t)) {
            Some(triple) => Err(Error::policy(
                marker,
                "cannot be expanded by this engine",
                triple.name.origin(),
            )),
            None => Ok(triples),
        },
        IncludePolicy::Substitute => {
            // TODO: expand include directives inline once their argument
            // semantics are defined; until then this arm only drops them.
            Ok(drop_includes(
                triples,
                options,
                "include substitution is not implemented, dropping directives",
            ))
        }
    }
}

fn drop_includes<'a>(
    triples: Vec<Triple<'a>>,
    options: &GroupOptions,
    reason: &str,
) -> Vec<Triple<'a>> {
    let marker = options.include_marker.as_bytes();
    let total = triples.len();
    let kept: Vec<_> = triples
        .into_iter()
        .filter(|t| t.name.as_bytes() != marker)
        .collect();
    if kept.len() < total {
        warn!(
            directive = %options.include_marker,
            dropped = total - kept.len(),
            "{reason}"
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, script, ErrorKind};

    #[test]
    fn test_group_nested() {
        let doc = parse(b"foo={bar=1 baz>=2}").unwrap();
        let top = group(&doc).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "foo");
        assert_eq!(top[0].operator, Operator::Equal);

        let inner = group(top[0].block().unwrap()).unwrap();
        let shape: Vec<_> = inner
            .iter()
            .map(|t| (t.name.to_string(), t.operator, t.value.as_bytes().unwrap().to_vec()))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("bar".to_string(), Operator::Equal, b"1".to_vec()),
                ("baz".to_string(), Operator::GreaterEqual, b"2".to_vec()),
            ]
        );
    }

    #[test]
    fn test_empty_block_groups_to_nothing() {
        assert!(group(&Container::new()).unwrap().is_empty());
    }

    #[test]
    fn test_arity_error() {
        let doc = parse(b"a = { b c d e }").unwrap();
        let block = doc.children()[2].as_container().unwrap();
        let err = group(block).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
        assert!(matches!(err, Error::Arity { len: 4, .. }));
        // `e`, the start of the incomplete group.
        assert_eq!(err.position().map(|p| p.offset), Some(12));
    }

    #[test]
    fn test_top_level_arity_error_has_position() {
        let doc = parse(b"a = 1\nb = 2\nc\n").unwrap();
        let err = group(&doc).unwrap_err().with_path("common/pop_jobs/00_jobs.txt");
        assert_eq!(err.kind(), ErrorKind::Arity);
        let at = err.position().unwrap();
        assert_eq!((at.line, at.column, at.offset), (3, 1, 12));
        assert!(err.to_string().contains("line 3, column 1"));
        assert!(!err.to_string().contains("generated content"));
    }

    #[test]
    fn test_arity_error_in_generated_block() {
        let doc = script!["a", "=", "1", "b"];
        let err = group(&doc).unwrap_err();
        assert_eq!(err.position(), None);
        assert!(err.to_string().contains("generated content"));
    }

    #[test]
    fn test_operator_error() {
        let doc = parse(b"a = 1 b c 2").unwrap();
        let err = group(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operator);
        assert!(err.to_string().contains("`c`"));
        assert_eq!(err.position().map(|p| p.column), Some(9));
    }

    #[test]
    fn test_block_in_operator_slot() {
        let doc = script!["a", ["b"], "c"];
        assert_eq!(group(&doc).unwrap_err().kind(), ErrorKind::Operator);
    }

    #[test]
    fn test_block_in_name_slot() {
        let doc = script![["b"], "=", "c"];
        assert!(matches!(group(&doc).unwrap_err(), Error::MisplacedBlock { .. }));
    }

    #[test]
    fn test_include_dropped_by_default() {
        let doc = parse(b"a = 1 inline_script = { script = x } b = 2").unwrap();
        let names: Vec<_> = group(&doc).unwrap().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_include_passthrough() {
        let doc = parse(b"a = 1 inline_script = x").unwrap();
        let triples = group_with_options(&doc, &GroupOptions::passthrough()).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].name, "inline_script");
    }

    #[test]
    fn test_include_fail() {
        let doc = parse(b"a = 1\ninline_script = x").unwrap();
        let options = GroupOptions::new().with_include_policy(IncludePolicy::Fail);
        let err = group_with_options(&doc, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Policy);
        assert_eq!(err.position().map(|p| p.line), Some(2));
    }

    #[test]
    fn test_include_fail_without_directives() {
        let doc = parse(b"a = 1").unwrap();
        let options = GroupOptions::new().with_include_policy(IncludePolicy::Fail);
        assert_eq!(group_with_options(&doc, &options).unwrap().len(), 1);
    }

    #[test]
    fn test_include_substitute_does_not_expand() {
        let doc = parse(b"inline_script = x a = 1").unwrap();
        let options = GroupOptions::new().with_include_policy(IncludePolicy::Substitute);
        let triples = group_with_options(&doc, &options).unwrap();
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].name, "a");
    }

    #[test]
    fn test_custom_marker() {
        let doc = parse(b"import = x a = 1").unwrap();
        let options = GroupOptions::new().with_include_marker("import");
        assert_eq!(group_with_options(&doc, &options).unwrap().len(), 1);
    }

    #[test]
    fn test_to_elements() {
        let doc = parse(b"a != b").unwrap();
        let triples = group(&doc).unwrap();
        assert_eq!(Container::from_elements(triples[0].to_elements().to_vec()), doc);
    }
}
