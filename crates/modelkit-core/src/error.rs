//! # Error Taxonomy — Structured Failure Vocabulary
//!
//! Defines [`ModelError`], the single error type shared by the whole
//! validation engine. All errors use `thiserror` for derive-based `Display`
//! and `Error` implementations.
//!
//! ## Design
//!
//! - Every violation carries the [`FieldPath`] where it occurred, so errors
//!   from deeply nested composites remain actionable (`A.foo[0][1]`).
//! - Failures are synchronous and fail-fast: the first violating element
//!   aborts the whole operation, no partial-success state is aggregated.
//! - `Configuration` is the schema author's error, raised at definition
//!   time; the remaining kinds are data errors, raised at validation time.

use thiserror::Error;

use crate::path::FieldPath;

/// Top-level error type for the modelkit engine.
#[derive(Error, Debug)]
pub enum ModelError {
    /// A field contract was built with invalid options (inverted range
    /// bounds, an unparseable regex pattern, an empty or duplicated enum
    /// variant set, an empty name). Raised at schema-definition time.
    #[error("invalid field configuration: {reason}")]
    Configuration {
        /// What was wrong with the contract definition.
        reason: String,
    },

    /// A required field was absent at validation time.
    #[error("{path} is required")]
    RequiredField {
        /// The field that was missing.
        path: FieldPath,
    },

    /// A value failed its type or predicate check after casting.
    #[error("{path} value is not of type {expected}, given {given}")]
    FieldType {
        /// The field holding the offending value.
        path: FieldPath,
        /// Description of the expected type or predicate.
        expected: String,
        /// Display form of the offending value.
        given: String,
    },

    /// A validator rejected the value.
    ///
    /// `path` is `None` while the error is in flight inside a validator;
    /// the owning field attaches its path (and prepends path context to the
    /// message) only if none was set by an inner composite.
    #[error("{message}")]
    Validation {
        /// The field the validator rejected, once attached.
        path: Option<FieldPath>,
        /// Human-readable description of the rejection.
        message: String,
    },

    /// A write was attempted against a non-editable field that already
    /// holds a value.
    #[error("{path} is not editable")]
    NotEditable {
        /// The field that refused the write.
        path: FieldPath,
    },

    /// JSON text could not be parsed or serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Shorthand for a [`ModelError::Configuration`] with the given reason.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// A validation failure that has not yet been attached to a field.
    ///
    /// This is the constructor custom validators use to reject a value with
    /// a message; the engine fills in the path when the error surfaces.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            path: None,
            message: message.into(),
        }
    }

    /// The field path this error names, if any.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::RequiredField { path }
            | Self::FieldType { path, .. }
            | Self::NotEditable { path } => Some(path),
            Self::Validation { path, .. } => path.as_ref(),
            Self::Configuration { .. } | Self::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_display() {
        let err = ModelError::RequiredField {
            path: FieldPath::root("Person", "name"),
        };
        assert_eq!(err.to_string(), "Person.name is required");
    }

    #[test]
    fn test_field_type_display() {
        let err = ModelError::FieldType {
            path: FieldPath::root("Person", "age"),
            expected: "number".to_string(),
            given: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Person.age value is not of type number, given abc"
        );
    }

    #[test]
    fn test_validation_starts_without_path() {
        let err = ModelError::validation("value does not match regex");
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "value does not match regex");
    }

    #[test]
    fn test_not_editable_display() {
        let err = ModelError::NotEditable {
            path: FieldPath::root("A", "foo"),
        };
        assert_eq!(err.to_string(), "A.foo is not editable");
    }

    #[test]
    fn test_path_accessor() {
        let err = ModelError::FieldType {
            path: FieldPath::root("A", "foo").index(0).index(1),
            expected: "number".to_string(),
            given: "x".to_string(),
        };
        assert_eq!(err.path().map(|p| p.as_str()), Some("A.foo[0][1]"));
    }

    #[test]
    fn test_configuration_has_no_path() {
        let err = ModelError::configuration("min bound 5 exceeds max bound 2");
        assert!(err.path().is_none());
        assert!(err.to_string().contains("min bound 5"));
    }
}
