//! Configuration options for grouping and writing.
//!
//! This module provides two option structs:
//!
//! - [`GroupOptions`]: how the [grouper](crate::group) treats include directives
//! - [`WriteOptions`]: output layout for the [writer](crate::writer)
//!
//! Both implement `Serialize`/`Deserialize` with every field defaulted, so a
//! patch tool can keep them in its own configuration file.
//!
//! ## Examples
//!
//! ```rust
//! use clausewitz_patch::{GroupOptions, IncludePolicy, WriteOptions};
//!
//! let group = GroupOptions::new().with_include_policy(IncludePolicy::Fail);
//! assert_eq!(group.include_marker, "inline_script");
//!
//! let write = WriteOptions::new().with_indent(2);
//! assert_eq!(write.indent, 2);
//! ```

use serde::{Deserialize, Serialize};

/// What the grouper does with triples named after the include marker.
///
/// Include directives pull another script in by name. The engine cannot expand
/// them, so the caller chooses how loud the omission should be.
///
/// # Examples
///
/// ```rust
/// use clausewitz_patch::IncludePolicy;
///
/// let policy: IncludePolicy = serde_json::from_str("\"passthrough\"").unwrap();
/// assert_eq!(policy, IncludePolicy::Passthrough);
/// assert_eq!(IncludePolicy::default(), IncludePolicy::Drop);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludePolicy {
    /// Remove the directives and log a warning.
    #[default]
    Drop,
    /// Raise a policy violation on the first directive.
    Fail,
    /// Keep the directives as ordinary triples.
    Passthrough,
    /// Reserved for inline expansion, which is not implemented. Logs and drops.
    Substitute,
}

/// Options for [`group_with_options`](crate::group_with_options).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupOptions {
    pub include_policy: IncludePolicy,
    /// Field name that marks an include directive.
    pub include_marker: String,
}

impl Default for GroupOptions {
    fn default() -> Self {
        GroupOptions {
            include_policy: IncludePolicy::default(),
            include_marker: "inline_script".to_string(),
        }
    }
}

impl GroupOptions {
    /// Creates default options (drop `inline_script` directives).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that apply no include policy at all.
    #[must_use]
    pub fn passthrough() -> Self {
        GroupOptions {
            include_policy: IncludePolicy::Passthrough,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_include_policy(mut self, policy: IncludePolicy) -> Self {
        self.include_policy = policy;
        self
    }

    /// Sets the field name treated as an include directive.
    #[must_use]
    pub fn with_include_marker(mut self, marker: impl Into<String>) -> Self {
        self.include_marker = marker.into();
        self
    }
}

/// Options for [`to_bytes_with_options`](crate::to_bytes_with_options).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions { indent: 4 }
    }
}

impl WriteOptions {
    /// Creates default options (4-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let group = GroupOptions::default();
        assert_eq!(group.include_policy, IncludePolicy::Drop);
        assert_eq!(group.include_marker, "inline_script");
        assert_eq!(WriteOptions::default().indent, 4);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let group: GroupOptions = serde_json::from_str(r#"{"include_policy":"fail"}"#).unwrap();
        assert_eq!(group.include_policy, IncludePolicy::Fail);
        assert_eq!(group.include_marker, "inline_script");

        let write: WriteOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(write, WriteOptions::default());
    }

    #[test]
    fn test_builders() {
        let group = GroupOptions::passthrough().with_include_marker("import");
        assert_eq!(group.include_policy, IncludePolicy::Passthrough);
        assert_eq!(group.include_marker, "import");
    }
}
