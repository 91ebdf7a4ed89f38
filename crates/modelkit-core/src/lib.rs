//! # modelkit-core — Foundational Types for the Modelkit Engine
//!
//! This crate is the leaf of the workspace DAG. It defines the failure
//! vocabulary shared by every layer of the validation engine ([`ModelError`])
//! and the [`FieldPath`] type used to name the exact location of a violation
//! inside arbitrarily nested structures (`Person.tags[0]`, `A.foo[0][1]`).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `modelkit-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`.

pub mod error;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use error::ModelError;
pub use path::FieldPath;
