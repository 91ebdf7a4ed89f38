//! # Field Contracts — The Per-Field Validation and Codec Engine
//!
//! A [`Field`] describes one field of a record: its type check, default,
//! required/editable constraints, validator, caster, and custom codec
//! hooks. Composite shapes (lists, maps, enums, nested records) are the
//! same contract with a specialized [`FieldKind`]; the pipeline is uniform
//! for all of them.
//!
//! ## The Write Pipeline
//!
//! Every value written through a field, whether by direct assignment or by
//! decoding from a map, goes through the same fixed sequence:
//!
//! ```text
//! cast ──▶ required-check ──▶ type-check ──▶ validator
//! ```
//!
//! Casting happens first so the remaining checks see the value that will
//! actually be stored. A field with a default is never effectively
//! required: the default satisfies the requirement at construction.
//!
//! ## Design Decision
//!
//! Each composite is a variant of the closed [`FieldKind`] union
//! dispatched with `match`, not a trait object. With five shapes and four
//! operations, a trait hierarchy would scatter the pipeline invariant
//! across impls; the closed enum keeps cast/validate/encode/decode in one
//! place each, and the compiler forces every new shape to handle all four.

use std::fmt;
use std::sync::Arc;

use modelkit_core::{FieldPath, ModelError};
use serde_json::Value as Json;

use crate::schema::Schema;
use crate::value::{Value, ValueKind};

// ─── Callable Hooks ──────────────────────────────────────────────────

/// A validator: `Ok(true)` accepts, `Ok(false)` rejects with a generic
/// message, `Err(Validation)` rejects with a custom message.
pub type ValidatorFn = dyn Fn(&Value) -> Result<bool, ModelError> + Send + Sync;

/// A caster, applied to every raw value before any check runs.
pub type CastFn = dyn Fn(Value) -> Value + Send + Sync;

/// A custom encoder from stored value to generic representation.
pub type EncodeFn = dyn Fn(&Value) -> Result<Json, ModelError> + Send + Sync;

/// A custom decoder from generic representation to stored value.
pub type DecodeFn = dyn Fn(Json) -> Result<Value, ModelError> + Send + Sync;

/// A zero-argument default generator, invoked fresh per resolution.
pub type DefaultFn = dyn Fn() -> Value + Send + Sync;

/// A type predicate for fields whose expected shape is not a plain kind.
pub type PredicateFn = dyn Fn(&Value) -> bool + Send + Sync;

// ─── Type Checks ─────────────────────────────────────────────────────

/// The expected type of a field's value, dispatched explicitly.
#[derive(Clone)]
pub enum TypeCheck {
    /// The value must have exactly this variant tag.
    Kind(ValueKind),
    /// The value must be an `Integer` or a `Float`.
    Number,
    /// The value must satisfy an arbitrary predicate; `description` is
    /// what error messages name as the expected type.
    Predicate {
        /// Human-readable description of what the predicate accepts.
        description: String,
        /// The predicate itself.
        check: Arc<PredicateFn>,
    },
    /// The value must be a record instance of this schema.
    Record(Arc<Schema>),
}

impl TypeCheck {
    /// Whether `value` satisfies this check.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Kind(kind) => value.kind() == *kind,
            Self::Number => matches!(value, Value::Integer(_) | Value::Float(_)),
            Self::Predicate { check, .. } => check(value),
            Self::Record(schema) => value.as_record().is_some_and(|instance| {
                let actual = instance.schema();
                // Identity first; a rebuilt schema of the same record type
                // still matches when its name and field names agree.
                Arc::ptr_eq(actual, schema)
                    || (actual.name() == schema.name()
                        && actual.len() == schema.len()
                        && actual
                            .fields()
                            .zip(schema.fields())
                            .all(|(a, b)| a.name() == b.name()))
            }),
        }
    }

    /// The expected-type description used in `FieldType` errors.
    pub fn description(&self) -> String {
        match self {
            Self::Kind(kind) => kind.name().to_string(),
            Self::Number => "number".to_string(),
            Self::Predicate { description, .. } => description.clone(),
            Self::Record(schema) => schema.name().to_string(),
        }
    }
}

impl fmt::Debug for TypeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeCheck({})", self.description())
    }
}

// ─── Defaults ────────────────────────────────────────────────────────

/// The default of a field: absent, a static value, or a generator.
#[derive(Clone, Default)]
pub enum FieldDefault {
    /// No default; an unsupplied field stays unset.
    #[default]
    None,
    /// A static value, cloned per construction.
    Value(Value),
    /// A generator, invoked fresh per construction — generator defaults
    /// (counters, timestamps) produce a new value every time.
    Generator(Arc<DefaultFn>),
}

// ─── Composite Shapes ────────────────────────────────────────────────

/// The closed set of named variants backing an enum field.
#[derive(Debug, Clone)]
pub struct EnumVariants {
    pub(crate) enum_name: String,
    pub(crate) variants: Vec<(String, i64)>,
    pub(crate) encode_by_value: bool,
}

impl EnumVariants {
    /// The underlying value of a variant, looked up by name.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.variants
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// The variant name, looked up by underlying value.
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.variants
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, _)| n.as_str())
    }

    fn expected(&self) -> String {
        format!("a variant of {}", self.enum_name)
    }
}

/// The structural shape of a field.
#[derive(Clone)]
pub enum FieldKind {
    /// A plain value with no inner contract.
    Scalar,
    /// An ordered sequence; the inner contract applies to every element.
    List(Box<Field>),
    /// A string-keyed mapping; the inner contract applies to every value.
    Map(Box<Field>),
    /// Membership in a closed variant set.
    Enum(EnumVariants),
    /// A nested record validated by its own schema.
    Model(Arc<Schema>),
}

// ─── The Field Contract ──────────────────────────────────────────────

/// The reusable description of one record field.
///
/// Built with the constructors in this module and in the composite
/// constructors ([`Field::list_of`], [`Field::range`], …), then refined
/// with chained methods:
///
/// ```
/// use modelkit::Field;
///
/// let name = Field::string().required().show_in_debug();
/// let retries = Field::integer().default(3);
/// ```
///
/// A field is immutable once its owning schema is built; the schema binds
/// [`Field::name`] exactly once at that point.
#[derive(Clone)]
pub struct Field {
    pub(crate) kind: FieldKind,
    pub(crate) type_check: Option<TypeCheck>,
    pub(crate) default: FieldDefault,
    pub(crate) required: bool,
    pub(crate) editable: bool,
    pub(crate) allow_null: bool,
    pub(crate) validator: Option<Arc<ValidatorFn>>,
    pub(crate) caster: Option<Arc<CastFn>>,
    pub(crate) to_repr: Option<Arc<EncodeFn>>,
    pub(crate) from_repr: Option<Arc<DecodeFn>>,
    pub(crate) debug_visible: bool,
    pub(crate) name: String,
}

impl Field {
    pub(crate) fn with_check(kind: FieldKind, type_check: Option<TypeCheck>) -> Self {
        Self {
            kind,
            type_check,
            default: FieldDefault::None,
            required: false,
            editable: true,
            allow_null: false,
            validator: None,
            caster: None,
            to_repr: None,
            from_repr: None,
            debug_visible: false,
            name: String::new(),
        }
    }

    /// A field accepting any value.
    pub fn any() -> Self {
        Self::with_check(FieldKind::Scalar, None)
    }

    /// A field accepting booleans.
    pub fn boolean() -> Self {
        Self::with_check(FieldKind::Scalar, Some(TypeCheck::Kind(ValueKind::Bool)))
    }

    /// A field accepting integers.
    pub fn integer() -> Self {
        Self::with_check(FieldKind::Scalar, Some(TypeCheck::Kind(ValueKind::Integer)))
    }

    /// A field accepting integers or floats.
    pub fn number() -> Self {
        Self::with_check(FieldKind::Scalar, Some(TypeCheck::Number))
    }

    /// A field accepting strings.
    pub fn string() -> Self {
        Self::with_check(FieldKind::Scalar, Some(TypeCheck::Kind(ValueKind::String)))
    }

    /// A field whose type check is an arbitrary predicate; `description`
    /// is what `FieldType` errors name as the expected type.
    pub fn predicate(
        description: impl Into<String>,
        check: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::with_check(
            FieldKind::Scalar,
            Some(TypeCheck::Predicate {
                description: description.into(),
                check: Arc::new(check),
            }),
        )
    }

    // ─── Chained refinements ─────────────────────────────────────────

    /// Mark the field required. Only effective while the field has no
    /// default; a default always satisfies the requirement.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Forbid writes after the field first holds a value.
    pub fn not_editable(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Accept `Value::Null`, bypassing the type check and validator.
    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Set a static default value.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = FieldDefault::Value(value.into());
        self
    }

    /// Set a generator default, invoked fresh on every resolution.
    pub fn default_fn(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = FieldDefault::Generator(Arc::new(f));
        self
    }

    /// Attach a validator. `Ok(false)` rejects with a generic message;
    /// `Err(ModelError::validation(..))` rejects with a custom one.
    pub fn validate_with(
        mut self,
        f: impl Fn(&Value) -> Result<bool, ModelError> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(f));
        self
    }

    /// Attach a caster, applied to raw values before any check.
    pub fn cast_with(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.caster = Some(Arc::new(f));
        self
    }

    /// Attach a custom encoder, replacing the built-in representation.
    pub fn encode_with(
        mut self,
        f: impl Fn(&Value) -> Result<Json, ModelError> + Send + Sync + 'static,
    ) -> Self {
        self.to_repr = Some(Arc::new(f));
        self
    }

    /// Attach a custom decoder, replacing the built-in representation.
    pub fn decode_with(
        mut self,
        f: impl Fn(Json) -> Result<Value, ModelError> + Send + Sync + 'static,
    ) -> Self {
        self.from_repr = Some(Arc::new(f));
        self
    }

    /// Include the field in the instance's debug form.
    pub fn show_in_debug(mut self) -> Self {
        self.debug_visible = true;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────

    /// The field's name within its owning schema. Empty until the schema
    /// is built.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an unsupplied value is a violation. A field with a default
    /// is never effectively required.
    pub fn is_required(&self) -> bool {
        self.required && matches!(self.default, FieldDefault::None)
    }

    /// Whether the field accepts writes after it first holds a value.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Whether the field appears in the instance's debug form.
    pub fn is_debug_visible(&self) -> bool {
        self.debug_visible
    }

    /// The structural shape of the field.
    pub fn field_kind(&self) -> &FieldKind {
        &self.kind
    }

    // ─── The pipeline ────────────────────────────────────────────────

    /// Resolve the field's default: a clone of the static value, or a
    /// fresh invocation of the generator. `None` when the field has no
    /// default.
    pub fn resolve_default(&self) -> Option<Value> {
        match &self.default {
            FieldDefault::None => None,
            FieldDefault::Value(v) => Some(v.clone()),
            FieldDefault::Generator(f) => Some(f()),
        }
    }

    /// Apply the caster (if any) and recurse into list/map elements.
    ///
    /// Casting never type-checks; a value of the wrong shape passes
    /// through unchanged and fails the type check in [`Field::validate`],
    /// which owns the error reporting.
    pub fn cast(&self, value: Value, path: &FieldPath) -> Result<Value, ModelError> {
        let value = match &self.caster {
            Some(f) => f(value),
            None => value,
        };
        match &self.kind {
            FieldKind::List(inner) => match value {
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (i, item) in items.into_iter().enumerate() {
                        out.push(inner.cast(item, &path.index(i))?);
                    }
                    Ok(Value::Array(out))
                }
                other => Ok(other),
            },
            FieldKind::Map(inner) => match value {
                Value::Object(map) => {
                    let mut out = std::collections::BTreeMap::new();
                    for (k, v) in map {
                        let casted = inner.cast(v, &path.key(&k))?;
                        out.insert(k, casted);
                    }
                    Ok(Value::Object(out))
                }
                other => Ok(other),
            },
            FieldKind::Scalar | FieldKind::Enum(_) | FieldKind::Model(_) => Ok(value),
        }
    }

    /// Validate a cast value (or its absence) against the contract.
    ///
    /// Check order is fixed: required-check, type-check, composite
    /// recursion, validator. The first violating element aborts the whole
    /// field — no partial-success state is kept.
    ///
    /// # Errors
    ///
    /// - [`ModelError::RequiredField`] when the value is absent and the
    ///   field is effectively required.
    /// - [`ModelError::FieldType`] when the value fails the type check or
    ///   enum membership.
    /// - [`ModelError::Validation`] when the validator rejects the value;
    ///   path context is attached only if an inner composite did not
    ///   already set one.
    pub fn validate(&self, value: Option<&Value>, path: &FieldPath) -> Result<(), ModelError> {
        let value = match value {
            None => {
                if self.is_required() {
                    return Err(ModelError::RequiredField { path: path.clone() });
                }
                return Ok(());
            }
            Some(v) => v,
        };

        if self.allow_null && value.is_null() {
            return Ok(());
        }

        if let Some(check) = &self.type_check {
            if !check.matches(value) {
                return Err(ModelError::FieldType {
                    path: path.clone(),
                    expected: check.description(),
                    given: value.to_string(),
                });
            }
        }

        match &self.kind {
            FieldKind::List(inner) => {
                if let Value::Array(items) = value {
                    for (i, item) in items.iter().enumerate() {
                        inner.validate(Some(item), &path.index(i))?;
                    }
                }
            }
            FieldKind::Map(inner) => {
                if let Value::Object(map) = value {
                    for (k, v) in map {
                        inner.validate(Some(v), &path.key(k))?;
                    }
                }
            }
            FieldKind::Enum(variants) => {
                let known = value
                    .as_str()
                    .is_some_and(|name| variants.value_of(name).is_some());
                if !known {
                    return Err(ModelError::FieldType {
                        path: path.clone(),
                        expected: variants.expected(),
                        given: value.to_string(),
                    });
                }
            }
            FieldKind::Scalar | FieldKind::Model(_) => {}
        }

        if let Some(validator) = &self.validator {
            match validator(value) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(ModelError::Validation {
                        path: Some(path.clone()),
                        message: format!("{path} did not pass the validation"),
                    });
                }
                Err(ModelError::Validation {
                    path: None,
                    message,
                }) => {
                    return Err(ModelError::Validation {
                        path: Some(path.clone()),
                        message: format!("{path} did not pass the validation: {message}"),
                    });
                }
                // An inner composite already named the violating element.
                Err(other) => return Err(other),
            }
        }

        Ok(())
    }

    /// Encode a stored value into its generic JSON representation.
    ///
    /// A custom encoder wins over everything. Otherwise lists and maps
    /// recurse the inner codec, enums map the variant to its name (or
    /// underlying value), nested records delegate to their own map
    /// encoding, and plain values pass through unchanged.
    pub fn encode(&self, value: &Value) -> Result<Json, ModelError> {
        if let Some(encoder) = &self.to_repr {
            return encoder(value);
        }
        match &self.kind {
            FieldKind::List(inner) => match value {
                Value::Array(items) => Ok(Json::Array(
                    items
                        .iter()
                        .map(|item| inner.encode(item))
                        .collect::<Result<_, _>>()?,
                )),
                other => other.clone().into_json(),
            },
            FieldKind::Map(inner) => match value {
                Value::Object(map) => {
                    let mut out = serde_json::Map::new();
                    for (k, v) in map {
                        out.insert(k.clone(), inner.encode(v)?);
                    }
                    Ok(Json::Object(out))
                }
                other => other.clone().into_json(),
            },
            FieldKind::Enum(variants) => match value.as_str() {
                Some(name) => match variants.value_of(name) {
                    Some(underlying) if variants.encode_by_value => {
                        Ok(Json::Number(underlying.into()))
                    }
                    Some(_) => Ok(Json::String(name.to_string())),
                    None => Err(ModelError::FieldType {
                        path: FieldPath::bare(&self.name),
                        expected: variants.expected(),
                        given: value.to_string(),
                    }),
                },
                None => Err(ModelError::FieldType {
                    path: FieldPath::bare(&self.name),
                    expected: variants.expected(),
                    given: value.to_string(),
                }),
            },
            FieldKind::Scalar | FieldKind::Model(_) => value.clone().into_json(),
        }
    }

    /// Decode a generic JSON representation into a stored value.
    ///
    /// Symmetric to [`Field::encode`]. Nested records delegate to their
    /// schema's decode-from-map constructor, so required/type violations
    /// inside the nested record surface as that record's own errors. A
    /// representation of the wrong shape converts through unchanged and is
    /// rejected later by the type check in the construction path.
    pub fn decode(&self, repr: Json) -> Result<Value, ModelError> {
        if let Some(decoder) = &self.from_repr {
            return decoder(repr);
        }
        match &self.kind {
            FieldKind::List(inner) => match repr {
                Json::Array(items) => Ok(Value::Array(
                    items
                        .into_iter()
                        .map(|item| inner.decode(item))
                        .collect::<Result<_, _>>()?,
                )),
                other => Ok(Value::from_json(other)),
            },
            FieldKind::Map(inner) => match repr {
                Json::Object(map) => {
                    let mut out = std::collections::BTreeMap::new();
                    for (k, v) in map {
                        let decoded = inner.decode(v)?;
                        out.insert(k, decoded);
                    }
                    Ok(Value::Object(out))
                }
                other => Ok(Value::from_json(other)),
            },
            FieldKind::Enum(variants) => {
                let resolved = match &repr {
                    Json::String(name) => {
                        variants.value_of(name).map(|_| name.clone())
                    }
                    Json::Number(n) => n
                        .as_i64()
                        .and_then(|v| variants.name_of(v))
                        .map(str::to_string),
                    _ => None,
                };
                match resolved {
                    Some(name) => Ok(Value::String(name)),
                    None => Err(ModelError::FieldType {
                        path: FieldPath::bare(&self.name),
                        expected: variants.expected(),
                        given: Value::from_json(repr).to_string(),
                    }),
                }
            }
            FieldKind::Model(schema) => match repr {
                Json::Object(map) => Ok(Value::Record(schema.from_map(&map, true)?)),
                other => Ok(Value::from_json(other)),
            },
            FieldKind::Scalar => Ok(Value::from_json(repr)),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            FieldKind::Scalar => "Scalar".to_string(),
            FieldKind::List(inner) => format!("List({inner:?})"),
            FieldKind::Map(inner) => format!("Map({inner:?})"),
            FieldKind::Enum(variants) => format!("Enum({})", variants.enum_name),
            FieldKind::Model(schema) => format!("Model({})", schema.name()),
        };
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("type_check", &self.type_check)
            .field("required", &self.required)
            .field("editable", &self.editable)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> FieldPath {
        FieldPath::root("A", "foo")
    }

    #[test]
    fn test_unset_optional_passes() {
        let field = Field::string();
        field.validate(None, &path()).expect("optional unset is fine");
    }

    #[test]
    fn test_unset_required_fails() {
        let field = Field::string().required();
        let err = field.validate(None, &path()).unwrap_err();
        assert!(matches!(err, ModelError::RequiredField { .. }));
        assert_eq!(err.to_string(), "A.foo is required");
    }

    #[test]
    fn test_default_neutralizes_required() {
        let field = Field::string().required().default("fallback");
        assert!(!field.is_required());
        field.validate(None, &path()).expect("default satisfies requirement");
    }

    #[test]
    fn test_type_check_rejects_wrong_kind() {
        let field = Field::string();
        let err = field
            .validate(Some(&Value::Integer(1)), &path())
            .unwrap_err();
        match err {
            ModelError::FieldType { expected, given, .. } => {
                assert_eq!(expected, "string");
                assert_eq!(given, "1");
            }
            other => panic!("Expected FieldType, got: {other}"),
        }
    }

    #[test]
    fn test_number_accepts_both_numeric_kinds() {
        let field = Field::number();
        field
            .validate(Some(&Value::Integer(3)), &path())
            .expect("integer is a number");
        field
            .validate(Some(&Value::Float(3.5)), &path())
            .expect("float is a number");
    }

    #[test]
    fn test_allow_null_bypasses_checks() {
        let strict = Field::string();
        assert!(strict.validate(Some(&Value::Null), &path()).is_err());

        let lenient = Field::string().allow_null();
        lenient
            .validate(Some(&Value::Null), &path())
            .expect("null is allowed");
    }

    #[test]
    fn test_validator_false_yields_generic_message() {
        let field = Field::string()
            .validate_with(|v| Ok(v.as_str().is_some_and(|s| s.starts_with('#'))));
        let err = field
            .validate(Some(&Value::from("hello")), &path())
            .unwrap_err();
        assert_eq!(err.to_string(), "A.foo did not pass the validation");
        field
            .validate(Some(&Value::from("#hello")), &path())
            .expect("prefixed value passes");
    }

    #[test]
    fn test_validator_error_gets_path_prepended_once() {
        let field =
            Field::string().validate_with(|_| Err(ModelError::validation("too plain")));
        let err = field
            .validate(Some(&Value::from("x")), &path())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "A.foo did not pass the validation: too plain"
        );
        assert_eq!(err.path().map(|p| p.as_str()), Some("A.foo"));
    }

    #[test]
    fn test_inner_path_not_overwritten() {
        // A validator that already reports a located violation keeps it.
        let located = ModelError::Validation {
            path: Some(FieldPath::root("A", "foo").index(3)),
            message: "A.foo[3] did not pass the validation".to_string(),
        };
        let msg = located.to_string();
        let field = Field::any().validate_with(move |_| {
            Err(ModelError::Validation {
                path: Some(FieldPath::root("A", "foo").index(3)),
                message: msg.clone(),
            })
        });
        let err = field.validate(Some(&Value::from(1)), &path()).unwrap_err();
        assert_eq!(err.path().map(|p| p.as_str()), Some("A.foo[3]"));
    }

    #[test]
    fn test_caster_runs_before_type_check() {
        let field = Field::integer().cast_with(|v| match v {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or(Value::String(s)),
            other => other,
        });
        let casted = field
            .cast(Value::from("42"), &path())
            .expect("cast should succeed");
        assert_eq!(casted, Value::Integer(42));
        field.validate(Some(&casted), &path()).expect("cast value passes");
    }

    #[test]
    fn test_generator_default_fresh_per_call() {
        use std::sync::atomic::{AtomicI64, Ordering};
        let counter = Arc::new(AtomicI64::new(0));
        let field = Field::integer().default_fn(move || {
            Value::Integer(counter.fetch_add(1, Ordering::SeqCst))
        });
        assert_eq!(field.resolve_default(), Some(Value::Integer(0)));
        assert_eq!(field.resolve_default(), Some(Value::Integer(1)));
        assert_eq!(field.resolve_default(), Some(Value::Integer(2)));
    }

    #[test]
    fn test_predicate_type_check() {
        let field = Field::predicate("non-empty string", |v| {
            v.as_str().is_some_and(|s| !s.is_empty())
        });
        field
            .validate(Some(&Value::from("x")), &path())
            .expect("non-empty passes");
        let err = field.validate(Some(&Value::from("")), &path()).unwrap_err();
        match err {
            ModelError::FieldType { expected, .. } => {
                assert_eq!(expected, "non-empty string");
            }
            other => panic!("Expected FieldType, got: {other}"),
        }
    }

    #[test]
    fn test_custom_codec_hooks() {
        // Store uppercase in memory, lowercase on the wire.
        let field = Field::string()
            .encode_with(|v| {
                Ok(Json::String(
                    v.as_str().unwrap_or_default().to_lowercase(),
                ))
            })
            .decode_with(|json| match json {
                Json::String(s) => Ok(Value::String(s.to_uppercase())),
                other => Ok(Value::from_json(other)),
            });
        let encoded = field.encode(&Value::from("LOUD")).expect("encodes");
        assert_eq!(encoded, Json::String("loud".to_string()));
        let decoded = field.decode(Json::String("quiet".to_string())).expect("decodes");
        assert_eq!(decoded, Value::from("QUIET"));
    }

    #[test]
    fn test_scalar_encode_passes_through() {
        let field = Field::integer();
        assert_eq!(
            field.encode(&Value::Integer(5)).expect("encodes"),
            Json::Number(5.into())
        );
        assert_eq!(
            field.decode(Json::Number(5.into())).expect("decodes"),
            Value::Integer(5)
        );
    }
}
