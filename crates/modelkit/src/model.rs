//! # Record Instances — Validated Values Under a Schema
//!
//! An [`Instance`] holds the current field values of one record, always
//! written through the single validated mutation path: cast, then
//! validate, then store. Construction, direct assignment, and decoding
//! from a map all share that path, so the contract is enforced uniformly
//! no matter where a value comes from.
//!
//! ## Unknown Names
//!
//! A name with no declared contract is a plain untyped attribute: `set`
//! stores it without checks, `to_map` emits it verbatim, and decoding
//! keeps or drops it per the `discard_unknown` flag. This is the opt-out
//! for pass-through data riding along with a validated record.
//!
//! ## Concurrency
//!
//! Finalized schemas are shared read-only via `Arc`. A single instance's
//! value map is not synchronized internally; callers that mutate one
//! instance from several threads must lock it themselves.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use modelkit_core::{FieldPath, ModelError};
use serde_json::Value as Json;

use crate::schema::Schema;
use crate::value::Value;

/// The generic associative representation of a record: string keys,
/// JSON-shaped values.
pub type Representation = serde_json::Map<String, Json>;

/// One record: a shared schema plus the current field values.
#[derive(Clone)]
pub struct Instance {
    schema: Arc<Schema>,
    values: BTreeMap<String, Value>,
    extras: BTreeMap<String, Value>,
}

impl Schema {
    /// Construct an instance from field values.
    ///
    /// Fields not supplied resolve their default (generator defaults are
    /// invoked fresh here, once per construction); a field with neither a
    /// value nor a default stays unset, which is a violation only when it
    /// is required. Every supplied-or-defaulted value goes through the
    /// validated write path in registry order. Keys with no declared
    /// contract become plain untyped attributes.
    ///
    /// # Errors
    ///
    /// `RequiredField`, `FieldType`, or `Validation`, per the first
    /// violating field.
    pub fn construct<I, K, V>(self: &Arc<Self>, values: I) -> Result<Instance, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut supplied: BTreeMap<String, Value> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut instance = Instance {
            schema: Arc::clone(self),
            values: BTreeMap::new(),
            extras: BTreeMap::new(),
        };

        for field in self.fields() {
            let value = supplied
                .remove(field.name())
                .or_else(|| field.resolve_default());
            match value {
                Some(v) => instance.set(field.name(), v)?,
                None => {
                    if field.is_required() {
                        return Err(ModelError::RequiredField {
                            path: FieldPath::root(self.name(), field.name()),
                        });
                    }
                }
            }
        }

        instance.extras = supplied;
        Ok(instance)
    }

    /// Construct an instance with no supplied values: defaults only.
    pub fn construct_default(self: &Arc<Self>) -> Result<Instance, ModelError> {
        self.construct(std::iter::empty::<(String, Value)>())
    }

    /// Decode an instance from its generic associative representation.
    ///
    /// Known non-null keys run through each field's codec, then the whole
    /// set feeds into [`Schema::construct`], so required-field and type
    /// enforcement apply exactly as in direct construction. Unknown keys
    /// are dropped when `discard_unknown` is true, else kept as plain
    /// untyped attributes. Null values are treated as absent.
    pub fn from_map(
        self: &Arc<Self>,
        map: &Representation,
        discard_unknown: bool,
    ) -> Result<Instance, ModelError> {
        let mut values: Vec<(String, Value)> = Vec::with_capacity(map.len());
        for field in self.fields() {
            if let Some(repr) = map.get(field.name()) {
                if !repr.is_null() {
                    values.push((field.name().to_string(), field.decode(repr.clone())?));
                }
            }
        }
        if !discard_unknown {
            for (key, repr) in map {
                if !self.has_field(key) {
                    values.push((key.clone(), Value::from_json(repr.clone())));
                }
            }
        }
        self.construct(values)
    }

    /// Decode an instance from a JSON text blob.
    ///
    /// # Errors
    ///
    /// `Json` when the text does not parse; `FieldType` when it parses to
    /// something other than an object; otherwise as [`Schema::from_map`].
    pub fn from_text(
        self: &Arc<Self>,
        text: &str,
        discard_unknown: bool,
    ) -> Result<Instance, ModelError> {
        let parsed: Json = serde_json::from_str(text)?;
        match parsed {
            Json::Object(map) => self.from_map(&map, discard_unknown),
            other => Err(ModelError::FieldType {
                path: FieldPath::bare(self.name()),
                expected: "object".to_string(),
                given: Value::from_json(other).to_string(),
            }),
        }
    }
}

impl Instance {
    /// The schema this instance is validated against.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The stored value of a field or untyped attribute, or `None` when
    /// unset.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).or_else(|| self.extras.get(name))
    }

    /// Write a value through the validated mutation path.
    ///
    /// Unknown names bypass the contract and land in the untyped
    /// attributes.
    ///
    /// # Errors
    ///
    /// - `NotEditable` when the field forbids writes and already holds a
    ///   value — including a previously assigned default.
    /// - `FieldType` / `Validation` from the cast-validate pipeline.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let Some(field) = self.schema.field(name) else {
            self.extras.insert(name.to_string(), value.into());
            return Ok(());
        };
        let field = Arc::clone(field);
        let path = FieldPath::root(self.schema.name(), name);
        if !field.is_editable() && self.values.contains_key(name) {
            return Err(ModelError::NotEditable { path });
        }
        let casted = field.cast(value.into(), &path)?;
        field.validate(Some(&casted), &path)?;
        self.values.insert(name.to_string(), casted);
        Ok(())
    }

    /// Remove a stored value, returning the field to unset.
    ///
    /// Subsequent reads yield `None`; a required field deleted here fails
    /// only on the next full validation pass (another construction), not
    /// retroactively. For a non-editable field, unsetting reopens it: the
    /// editability freeze applies to overwriting a held value, and the
    /// next write to the now-empty field is a first write again.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.values
            .remove(name)
            .or_else(|| self.extras.remove(name))
    }

    /// Encode the instance into its generic associative representation.
    ///
    /// Unset fields are omitted entirely — no null placeholders; untyped
    /// attributes are included verbatim. The resulting map keys its
    /// entries alphabetically (JSON object order carries no meaning
    /// here).
    pub fn to_map(&self) -> Result<Representation, ModelError> {
        let mut map = Representation::new();
        for field in self.schema.fields() {
            if let Some(value) = self.values.get(field.name()) {
                map.insert(field.name().to_string(), field.encode(value)?);
            }
        }
        for (key, value) in &self.extras {
            map.insert(key.clone(), value.clone().into_json()?);
        }
        Ok(map)
    }

    /// Overwrite the supplied fields from a generic representation.
    ///
    /// Each known non-null key is decoded and written through the
    /// validated mutation path, so `editable = false` and type contracts
    /// still apply. Fields absent from the map are untouched; null values
    /// are ignored. Unknown keys are dropped or kept per
    /// `discard_unknown`.
    pub fn update_from_map(
        &mut self,
        map: &Representation,
        discard_unknown: bool,
    ) -> Result<(), ModelError> {
        for (key, repr) in map {
            match self.schema.field(key).map(Arc::clone) {
                Some(field) => {
                    if repr.is_null() {
                        continue;
                    }
                    let decoded = field.decode(repr.clone())?;
                    self.set(key, decoded)?;
                }
                None => {
                    if !discard_unknown {
                        self.extras
                            .insert(key.clone(), Value::from_json(repr.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialize the encoded representation as compact JSON text.
    pub fn to_text(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(&Json::Object(self.to_map()?))?)
    }

    /// Serialize the encoded representation as pretty-printed JSON text.
    pub fn to_text_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(&Json::Object(self.to_map()?))?)
    }
}

/// Two instances are equal when they share a record type and hold equal
/// values, typed and untyped alike.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name()
            && self.values == other.values
            && self.extras == other.extras
    }
}

/// The debug form lists only fields marked `show_in_debug`, in registry
/// order: `Person(name=Ann, age=30)`. Unset fields print as `none`.
impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.schema.name())?;
        let mut first = true;
        for field in self.schema.fields() {
            if !field.is_debug_visible() {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            match self.values.get(field.name()) {
                Some(value) => write!(f, "{}={value}", field.name())?,
                None => write!(f, "{}=none", field.name())?,
            }
        }
        f.write_str(")")
    }
}
