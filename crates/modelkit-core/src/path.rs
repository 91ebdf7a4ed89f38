//! # Field Paths — Locating Violations in Nested Structures
//!
//! A [`FieldPath`] names the exact position of a field or nested element,
//! using dotted segments for record fields and bracketed segments for list
//! indices and map keys:
//!
//! ```text
//! Person.name          a top-level field of record type Person
//! Person.tags[2]       the third element of a list field
//! A.foo[0][1]          element 1 of element 0 of a list-of-lists field
//! Config.env[HOME]     the value under key "HOME" of a map field
//! ```
//!
//! Paths are built incrementally as validation recurses into composite
//! fields — one segment per nesting level. They are plain value objects;
//! errors carry them, nothing parses them back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The dotted/bracketed location of a field or nested element.
///
/// Constructed at the root with [`FieldPath::root`] (record type plus field
/// name) or [`FieldPath::bare`] (field name only), then extended one segment
/// at a time while recursing into composites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath(String);

impl FieldPath {
    /// Path to a top-level field of a named record type: `Person.name`.
    pub fn root(record: &str, field: &str) -> Self {
        Self(format!("{record}.{field}"))
    }

    /// Path consisting of a single bare segment, for contexts where no
    /// owning record type is known.
    pub fn bare(segment: &str) -> Self {
        Self(segment.to_string())
    }

    /// Extend the path with a nested record field: `self.name`.
    pub fn child(&self, field: &str) -> Self {
        Self(format!("{}.{field}", self.0))
    }

    /// Extend the path with a list index: `self[3]`.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Extend the path with a map key: `self[key]`.
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{key}]", self.0))
    }

    /// The rendered path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
