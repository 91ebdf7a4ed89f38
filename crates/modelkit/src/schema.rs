//! # Schemas — Per-Record Field Registries with Inheritance
//!
//! A [`Schema`] is the finalized, ordered collection of field contracts
//! for one record type. It is built exactly once by a [`SchemaBuilder`],
//! binding each field's name in the process, and is then immutable —
//! wrap it in `Arc` and share it across any number of threads; lookups
//! are pure reads.
//!
//! ## Inheritance Merge
//!
//! `extends` folds a parent's fields into the accumulator before the
//! type's own declarations. Parents fold in the order given (call
//! `extends` ancestor-first: a later parent's field overrides an earlier
//! parent's field of the same name), and fields declared directly on the
//! type always win. A redeclared name replaces the contract but keeps its
//! original registry position. Duplicate declaration is never an error —
//! override wins, everywhere.

use std::collections::HashMap;
use std::sync::Arc;

use modelkit_core::ModelError;

use crate::field::Field;

/// The finalized field registry of one record type.
///
/// Obtained from [`Schema::builder`]; see the module docs for the merge
/// rules. Construction of record instances lives in [`crate::model`].
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: Vec<Arc<Field>>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    /// Start defining a record type with the given name.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The record type's name, used as the root segment of error paths.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in registry order.
    pub fn fields(&self) -> impl Iterator<Item = &Arc<Field>> {
        self.fields.iter()
    }

    /// Look up a field contract by name.
    pub fn field(&self, name: &str) -> Option<&Arc<Field>> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Whether a field of this name is declared.
    pub fn has_field(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Accumulates field declarations and parent merges, then finalizes into
/// an immutable [`Schema`].
pub struct SchemaBuilder {
    name: String,
    fields: Vec<(String, Field)>,
}

impl SchemaBuilder {
    /// Fold a parent schema's fields into the accumulator.
    ///
    /// Call ancestor-first; fields declared afterwards (by later parents
    /// or by this type itself) override same-named entries in place.
    pub fn extends(mut self, parent: &Schema) -> Self {
        for field in parent.fields() {
            self.put(field.name.clone(), (**field).clone());
        }
        self
    }

    /// Declare a field. A name declared twice keeps the last contract and
    /// its original position.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.put(name.into(), field);
        self
    }

    fn put(&mut self, name: String, field: Field) {
        match self.fields.iter().position(|(n, _)| *n == name) {
            Some(i) => self.fields[i].1 = field,
            None => self.fields.push((name, field)),
        }
    }

    /// Finalize the registry: bind each field's name and freeze the
    /// collection.
    ///
    /// # Errors
    ///
    /// `Configuration` when the record name or a field name is empty.
    pub fn build(self) -> Result<Arc<Schema>, ModelError> {
        if self.name.is_empty() {
            return Err(ModelError::configuration("record type name is empty"));
        }
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut by_name = HashMap::with_capacity(self.fields.len());
        for (index, (name, mut field)) in self.fields.into_iter().enumerate() {
            if name.is_empty() {
                return Err(ModelError::configuration(format!(
                    "record type {} declares a field with an empty name",
                    self.name
                )));
            }
            field.name = name.clone();
            fields.push(Arc::new(field));
            by_name.insert(name, index);
        }
        Ok(Arc::new(Schema {
            name: self.name,
            fields,
            by_name,
        }))
    }
}
