//! # modelkit — Declarative Record Schemas and Validation
//!
//! Describe a data record as a set of named, typed fields — each with an
//! optional default, required/editable constraints, a validator, a caster,
//! and custom codec hooks — then let the engine enforce the contract on
//! every write and round-trip instances through a generic string-keyed map
//! or a JSON text blob. Composite shapes (lists, maps, enums, ranges,
//! regex-constrained strings, nested records) apply the same contract
//! recursively, composing error paths like `A.foo[0][1]` one segment per
//! nesting level.
//!
//! ```
//! use modelkit::{Field, Schema, Value};
//!
//! # fn main() -> Result<(), modelkit::ModelError> {
//! let person = Schema::builder("Person")
//!     .field("name", Field::string().required().show_in_debug())
//!     .field("age", Field::range(Some(0), Some(150))?)
//!     .field("tags", Field::list_of(Field::string()))
//!     .build()?;
//!
//! let ann = person.construct([
//!     ("name", Value::from("Ann")),
//!     ("age", Value::from(30)),
//! ])?;
//! assert_eq!(ann.to_text()?, r#"{"age":30,"name":"Ann"}"#);
//!
//! let restored = person.from_text(&ann.to_text()?, true)?;
//! assert_eq!(ann, restored);
//! # Ok(())
//! # }
//! ```
//!
//! ## Layering
//!
//! - [`value`] — the dynamic [`Value`] tree fields operate over.
//! - [`field`] — the [`Field`] contract and its write pipeline
//!   (cast → required-check → type-check → validator).
//! - [`fields`] — composite constructors (const, enum, range, regex,
//!   list, map, nested record, datetime).
//! - [`schema`] — the per-record-type [`Schema`] registry with
//!   inheritance merging.
//! - [`model`] — the [`Instance`] mutation and codec protocol.
//!
//! ## Crate Policy
//!
//! - Pure and synchronous: every operation is a plain computed function,
//!   no I/O, no suspension points.
//! - Finalized schemas are `Send + Sync`; share them via `Arc`. A single
//!   instance's mutable state is the caller's to lock.
//! - No `unsafe` code; no `panic!()` or `.unwrap()` outside tests.

pub mod field;
pub mod fields;
pub mod model;
pub mod schema;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use field::{EnumVariants, Field, FieldDefault, FieldKind, TypeCheck};
pub use model::{Instance, Representation};
pub use modelkit_core::{FieldPath, ModelError};
pub use schema::{Schema, SchemaBuilder};
pub use value::{Value, ValueKind};
