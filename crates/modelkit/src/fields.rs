//! # Composite Field Constructors
//!
//! Specializations of [`Field`] built by wrapping or parameterizing the
//! base contract: constants, enumerations, bounded ranges, pattern-matched
//! strings, lists, maps, nested records, and UTC datetimes. Each one
//! configures the uniform cast → validate → encode/decode pipeline; none
//! of them adds new machinery.
//!
//! Datetime fields follow a UTC-only policy: the in-memory value is an
//! RFC 3339 string with `Z` suffix at seconds precision, and the wire
//! representation is Unix epoch seconds. Inputs with explicit offsets like
//! `+05:30` are rejected — even `+00:00`, which is semantically equivalent
//! to `Z` — so that a given instant has exactly one stored form.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use modelkit_core::ModelError;
use serde_json::Value as Json;

use crate::field::{EnumVariants, Field, FieldKind, TypeCheck};
use crate::schema::Schema;
use crate::value::{Value, ValueKind};

impl Field {
    /// A constant field: default fixed to the supplied literal, writes
    /// forbidden once it holds a value. Every instance carries the value
    /// without the caller supplying it.
    pub fn constant(value: impl Into<Value>) -> Self {
        Field::any().default(value).not_editable()
    }

    /// An enumeration field over a closed set of named variants, each with
    /// an underlying integer value.
    ///
    /// The in-memory value is the variant name; it encodes to the name,
    /// or to the underlying value after [`Field::encode_by_value`].
    /// Unknown names or values fail with `FieldType` on both the write
    /// and the decode path.
    ///
    /// # Errors
    ///
    /// `Configuration` when the variant set is empty or contains a
    /// duplicate name or duplicate underlying value.
    pub fn enumeration(
        enum_name: impl Into<String>,
        variants: &[(&str, i64)],
    ) -> Result<Self, ModelError> {
        let enum_name = enum_name.into();
        if variants.is_empty() {
            return Err(ModelError::configuration(format!(
                "enum {enum_name} has no variants"
            )));
        }
        for (i, (name, value)) in variants.iter().enumerate() {
            for (other_name, other_value) in &variants[..i] {
                if name == other_name {
                    return Err(ModelError::configuration(format!(
                        "enum {enum_name} declares variant {name} twice"
                    )));
                }
                if value == other_value {
                    return Err(ModelError::configuration(format!(
                        "enum {enum_name} variants {other_name} and {name} share value {value}"
                    )));
                }
            }
        }
        Ok(Field::with_check(
            FieldKind::Enum(EnumVariants {
                enum_name,
                variants: variants
                    .iter()
                    .map(|(n, v)| (n.to_string(), *v))
                    .collect(),
                encode_by_value: false,
            }),
            None,
        ))
    }

    /// Switch an enumeration field to encode the underlying value instead
    /// of the variant name. No effect on other field shapes.
    pub fn encode_by_value(mut self) -> Self {
        if let FieldKind::Enum(variants) = &mut self.kind {
            variants.encode_by_value = true;
        }
        self
    }

    /// A numeric field constrained to `min <= value <= max`, either bound
    /// optional (open-ended). Values of the wrong type fail `FieldType`
    /// before the bounds run.
    ///
    /// # Errors
    ///
    /// `Configuration` when both bounds are given and `min > max`.
    pub fn range(min: Option<i64>, max: Option<i64>) -> Result<Self, ModelError> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(ModelError::configuration(format!(
                    "range min bound {lo} exceeds max bound {hi}"
                )));
            }
        }
        Ok(Field::number().validate_with(move |v| {
            let Some(x) = v.as_f64() else {
                return Ok(false);
            };
            Ok(min.map_or(true, |lo| lo as f64 <= x) && max.map_or(true, |hi| x <= hi as f64))
        }))
    }

    /// A string field constrained to fully match a regex pattern.
    ///
    /// The pattern is anchored on both ends; a prefix match is not enough.
    ///
    /// # Errors
    ///
    /// `Configuration` when the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self, ModelError> {
        let compiled = regex::Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            ModelError::configuration(format!("invalid regex pattern {pattern:?}: {e}"))
        })?;
        Ok(Field::string().validate_with(move |v| {
            let Some(s) = v.as_str() else {
                return Ok(false);
            };
            if compiled.is_match(s) {
                Ok(true)
            } else {
                Err(ModelError::validation("value does not match regex"))
            }
        }))
    }

    /// An ordered sequence whose every element satisfies the inner
    /// contract. Element violations carry paths like `A.foo[2]`; lists
    /// nest arbitrarily deep, one path segment per level.
    pub fn list_of(inner: Field) -> Self {
        Field::with_check(
            FieldKind::List(Box::new(inner)),
            Some(TypeCheck::Kind(ValueKind::Array)),
        )
    }

    /// A string-keyed mapping whose every value satisfies the inner
    /// contract. Value violations carry paths like `Config.env[HOME]`.
    pub fn map_of(inner: Field) -> Self {
        Field::with_check(
            FieldKind::Map(Box::new(inner)),
            Some(TypeCheck::Kind(ValueKind::Object)),
        )
    }

    /// A nested record validated by its own schema. Encoding delegates to
    /// the instance's map encoding; decoding delegates to the schema's
    /// decode-from-map constructor, so violations inside the nested record
    /// surface as that record's own errors.
    pub fn model(schema: &Arc<Schema>) -> Self {
        Field::with_check(
            FieldKind::Model(Arc::clone(schema)),
            Some(TypeCheck::Record(Arc::clone(schema))),
        )
    }

    /// A UTC datetime field.
    ///
    /// In memory: an RFC 3339 string with `Z` suffix at seconds precision
    /// (`2024-05-01T12:00:00Z`). On the wire: Unix epoch seconds. Strings
    /// with sub-second components or non-`Z` offsets fail `FieldType`.
    pub fn datetime() -> Self {
        Field::predicate("RFC 3339 UTC timestamp", |v| {
            v.as_str().is_some_and(|s| parse_utc(s).is_some())
        })
        .encode_with(|v| {
            let parsed = v.as_str().and_then(parse_utc);
            match parsed {
                Some(dt) => Ok(Json::Number(dt.timestamp().into())),
                None => Err(ModelError::validation(
                    "datetime value is not an RFC 3339 UTC timestamp",
                )),
            }
        })
        .decode_with(|json| match json {
            Json::Number(n) => match n.as_i64().and_then(epoch_to_utc) {
                Some(s) => Ok(Value::String(s)),
                None => Err(ModelError::validation(format!(
                    "epoch value {n} is out of datetime range"
                ))),
            },
            other => Ok(Value::from_json(other)),
        })
    }
}

/// Parse an RFC 3339 timestamp, accepting only the `Z` suffix at seconds
/// precision. Returns `None` for offsets, sub-second components, or
/// malformed input.
fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    if !s.ends_with('Z') || s.contains('.') {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render Unix epoch seconds as the canonical stored form.
fn epoch_to_utc(secs: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}
