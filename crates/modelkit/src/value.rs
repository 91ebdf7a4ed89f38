//! # Dynamic Values — The Engine's Runtime Value Tree
//!
//! Field contracts operate over [`Value`], a closed tagged union covering
//! the JSON-compatible shapes plus one extra variant, `Record`, which holds
//! a validated [`Instance`] of another schema (the in-memory form of a
//! nested record field).
//!
//! ## Design
//!
//! - "Unset" is the *absence* of a value in an instance's field map, never a
//!   sentinel variant. `Value::Null` is a real value a caller supplied.
//! - Integers and floats are distinct variants; JSON numbers convert to
//!   `Integer` when exactly representable as `i64`, else `Float`.
//! - Conversion to the generic JSON representation delegates `Record`
//!   variants to the instance's own map encoding, so composites nest
//!   arbitrarily deep without special cases here.

use std::collections::BTreeMap;
use std::fmt;

use modelkit_core::ModelError;
use serde_json::Value as Json;

use crate::model::Instance;

/// A dynamic value held by a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A double-precision float.
    Float(f64),
    /// A text string.
    String(String),
    /// An ordered sequence.
    Array(Vec<Value>),
    /// A string-keyed mapping.
    Object(BTreeMap<String, Value>),
    /// A validated instance of another record schema.
    Record(Instance),
}

/// The tag of a [`Value`] variant, used in type-check error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Tag of [`Value::Null`].
    Null,
    /// Tag of [`Value::Bool`].
    Bool,
    /// Tag of [`Value::Integer`].
    Integer,
    /// Tag of [`Value::Float`].
    Float,
    /// Tag of [`Value::String`].
    String,
    /// Tag of [`Value::Array`].
    Array,
    /// Tag of [`Value::Object`].
    Object,
    /// Tag of [`Value::Record`].
    Record,
}

impl ValueKind {
    /// Lowercase name used in `FieldType` error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// The variant tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Record(_) => ValueKind::Record,
        }
    }

    /// Convert a parsed JSON value into a dynamic value.
    ///
    /// Numbers convert to `Integer` when exactly representable as `i64`,
    /// else `Float`. `Record` values never come out of this function; only
    /// a schema's decode path produces them.
    pub fn from_json(json: Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    // u64 beyond i64::MAX or a float; f64 covers both here.
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::String(s),
            Json::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            Json::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert this value into its generic JSON representation.
    ///
    /// `Record` delegates to the instance's own [`Instance::to_map`]
    /// encoding, which recursively applies each nested field's codec.
    ///
    /// # Errors
    ///
    /// A non-finite float has no JSON form and fails with `Validation`
    /// rather than degrading to null; nested records propagate any
    /// encoding failure from their custom codec hooks.
    pub fn into_json(self) -> Result<Json, ModelError> {
        Ok(match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(b),
            Value::Integer(i) => Json::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Json::Number)
                .ok_or_else(|| {
                    ModelError::validation(format!(
                        "non-finite float {f} has no JSON form"
                    ))
                })?,
            Value::String(s) => Json::String(s),
            Value::Array(items) => Json::Array(
                items
                    .into_iter()
                    .map(Value::into_json)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::new();
                for (k, v) in map {
                    out.insert(k, v.into_json()?);
                }
                Json::Object(out)
            }
            Value::Record(instance) => Json::Object(instance.to_map()?),
        })
    }

    /// The string slice, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an `Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The numeric value as a float, if this is an `Integer` or `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The element slice, if this is an `Array`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The inner mapping, if this is an `Object`.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The nested instance, if this is a `Record`.
    pub fn as_record(&self) -> Option<&Instance> {
        match self {
            Self::Record(instance) => Some(instance),
            _ => None,
        }
    }

    /// Whether this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Plain rendering for error messages and the instance debug form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Record(instance) => write!(f, "{instance:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Record(instance)
    }
}
