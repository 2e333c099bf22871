//! Ordered name listings.
//!
//! Patch runs often emit a plain list of the definitions they touched, one
//! name per line, for use by localisation or mod-manager tooling. This module
//! provides [`NameListing`], a wrapper around [`IndexSet`] that collects names
//! without duplicates and renders them in a stable order.
//!
//! ## Why IndexSet?
//!
//! - **Deduplication**: a name added twice is listed once
//! - **Insertion order**: [`NameListing::iter`] reports names as they were found
//! - **Deterministic output**: [`NameListing::to_sorted_bytes`] sorts bytewise
//!
//! ## Examples
//!
//! ```rust
//! use clausewitz_patch::{group, parse, NameListing};
//!
//! let doc = parse(b"job_miner = { } job_farmer = { } job_miner = { }").unwrap();
//! let mut listing = NameListing::new();
//! listing.extend_from_triples(&group(&doc).unwrap());
//!
//! assert_eq!(listing.len(), 2);
//! assert_eq!(listing.to_sorted_bytes(), b"job_farmer\njob_miner\n");
//! ```

use crate::group::Triple;
use indexmap::IndexSet;

/// A deduplicated, insertion-ordered set of definition names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameListing(IndexSet<Vec<u8>>);

impl NameListing {
    /// Creates an empty listing.
    #[must_use]
    pub fn new() -> Self {
        NameListing(IndexSet::new())
    }

    /// Adds a name, returning `false` if it was already listed.
    pub fn insert(&mut self, name: impl AsRef<[u8]>) -> bool {
        let name = name.as_ref();
        if self.0.contains(name) {
            return false;
        }
        self.0.insert(name.to_vec())
    }

    /// Adds the name of every triple, in order.
    pub fn extend_from_triples(&mut self, triples: &[Triple<'_>]) {
        for triple in triples {
            self.insert(triple.name.as_bytes());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.0.contains(name.as_ref())
    }

    /// Iterates names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// Renders the listing sorted bytewise, one name per line.
    #[must_use]
    pub fn to_sorted_bytes(&self) -> Vec<u8> {
        let mut names: Vec<&[u8]> = self.iter().collect();
        names.sort_unstable();
        names.iter().fold(Vec::new(), |mut out, name| {
            out.extend_from_slice(name);
            out.push(b'\n');
            out
        })
    }
}

impl<N: AsRef<[u8]>> Extend<N> for NameListing {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<N: AsRef<[u8]>> FromIterator<N> for NameListing {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut listing = NameListing::new();
        listing.extend(iter);
        listing
    }
}
