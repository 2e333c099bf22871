//! Field access and structural edits.
//!
//! Lookups follow first-match semantics: when a name repeats inside a block,
//! only its first triple is visible. Edits happen in place on an owned tree.
//!
//! ```rust
//! use clausewitz_patch::{insert, parse, script, to_bytes};
//!
//! let mut job = parse(b"possible = { planet = { has_owner = yes } }").unwrap();
//! insert(&mut job, &["possible", "planet"], script!["is_enabled", "=", "no"].into_children()).unwrap();
//!
//! assert_eq!(
//!     to_bytes(&job),
//!     b"possible = {\n    planet = {\n        has_owner = yes\n        is_enabled = no\n    }\n}\n"
//! );
//! ```

use crate::group::{split_triples, value_index, Triple};
use crate::value::{Container, Element};
use crate::{Error, Operator, Result};

/// Returns the value of the first triple named `name`.
///
/// Later triples with the same name are ignored.
#[must_use]
pub fn get<'a>(triples: &[Triple<'a>], name: &[u8]) -> Option<&'a Element> {
    triples
        .iter()
        .find(|triple| triple.name.as_bytes() == name)
        .map(|triple| triple.value)
}

/// Appends `contents` to the block addressed by `path`, creating it if needed.
///
/// Each path component names a triple to descend into. A missing component is
/// created as `name = {}` at the end of its parent. An empty path appends
/// directly to `container`.
///
/// # Errors
///
/// Every existing block on the path must group cleanly; grouping errors
/// propagate unchanged. A component whose existing value is a scalar yields
/// [`Error::Policy`]. Nothing is created unless the whole insert succeeds.
pub fn insert<P: AsRef<[u8]>>(
    container: &mut Container,
    path: &[P],
    contents: Vec<Element>,
) -> Result<()> {
    let Some((head, rest)) = path.split_first() else {
        container.extend(contents);
        return Ok(());
    };
    let name = head.as_ref();

    let index = match value_index(container, name)? {
        Some(index) => index,
        None => {
            container.push_triple(name, Operator::Equal, Container::new());
            container.len() - 1
        }
    };

    match &mut container.children_mut()[index] {
        Element::Container(child) => insert(child, rest, contents),
        Element::Token(token) => Err(Error::policy(
            name,
            "holds a scalar value and cannot receive nested content",
            token.origin(),
        )),
    }
}

impl Container {
    /// Returns the value of the first triple named `name`.
    ///
    /// `Ok(None)` means the block is well formed but has no such field.
    ///
    /// # Errors
    ///
    /// Propagates grouping errors. No include policy is applied.
    pub fn field(&self, name: impl AsRef<[u8]>) -> Result<Option<&Element>> {
        let triples = split_triples(self)?;
        Ok(get(&triples, name.as_ref()))
    }

    /// Like [`Container::field`], but a missing field is an [`Error::MissingField`].
    ///
    /// # Errors
    ///
    /// Grouping errors, or a lookup failure when the field is absent.
    pub fn require(&self, name: impl AsRef<[u8]>) -> Result<&Element> {
        let name = name.as_ref();
        self.field(name)?.ok_or_else(|| Error::missing_field(name))
    }

    /// Mutable access to the value of the first triple named `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clausewitz_patch::{parse, Element};
    ///
    /// let mut doc = parse(b"weight = 5").unwrap();
    /// if let Some(value) = doc.field_mut("weight").unwrap() {
    ///     *value = Element::from("0");
    /// }
    /// assert_eq!(doc.field("weight").unwrap().and_then(Element::as_bytes), Some(&b"0"[..]));
    /// ```
    ///
    /// # Errors
    ///
    /// Propagates grouping errors.
    pub fn field_mut(&mut self, name: impl AsRef<[u8]>) -> Result<Option<&mut Element>> {
        match value_index(self, name.as_ref())? {
            Some(index) => Ok(Some(&mut self.children_mut()[index])),
            None => Ok(None),
        }
    }

    /// Replaces the value of the first triple named `name`, returning the old value.
    ///
    /// # Errors
    ///
    /// Propagates grouping errors.
    pub fn replace(
        &mut self,
        name: impl AsRef<[u8]>,
        value: impl Into<Element>,
    ) -> Result<Option<Element>> {
        Ok(self
            .field_mut(name)?
            .map(|slot| std::mem::replace(slot, value.into())))
    }

    /// Appends `contents` under `path`. See [`insert`].
    ///
    /// # Errors
    ///
    /// See [`insert`].
    pub fn insert_at<P: AsRef<[u8]>>(&mut self, path: &[P], contents: Vec<Element>) -> Result<()> {
        insert(self, path, contents)
    }

    /// Returns the element `n` places after the first token equal to `name`.
    ///
    /// Works on the flat list without grouping, so it also reaches into blocks
    /// that do not split into triples. `field_after(name, 2)` is the value of
    /// a well-formed `name = value`.
    #[must_use]
    pub fn field_after(&self, name: impl AsRef<[u8]>, n: usize) -> Option<&Element> {
        let index = self.token_index(name.as_ref())?;
        self.children().get(index + n)
    }

    pub fn field_after_mut(&mut self, name: impl AsRef<[u8]>, n: usize) -> Option<&mut Element> {
        let index = self.token_index(name.as_ref())?;
        self.children_mut().get_mut(index + n)
    }

    fn token_index(&self, name: &[u8]) -> Option<usize> {
        self.children()
            .iter()
            .position(|element| matches!(element, Element::Token(t) if t.as_bytes() == name))
    }
}
