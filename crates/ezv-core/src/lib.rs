//! # ezv-core: Recursive Schema Validation Engine
//!
//! Validates arbitrary JSON values against declarative schemas and returns a
//! flat, ordered list of field errors, each carrying a dotted path, the
//! offending value, and a message.
//!
//! ## Model
//!
//! - A [`Schema`] is a [`Pipeline`] of [`Validator`]s or a [`FieldMap`] from
//!   field names to pipelines.
//! - A validator returns an [`Outcome`]: pass, break (stop quietly), an error
//!   message, or a nested schema to apply to the same input.
//! - The [`Engine`] classifies each value into a [`Shape`] and walks records,
//!   sequences and scalars accordingly, building [`FieldPath`]s as it goes.
//!
//! ## Crate Policy
//!
//! - Pure library: no I/O, no global state, no subscriber installation.
//! - Invalid data is `Ok(FieldErrors)`; a misconfigured schema is
//!   `Err(SchemaError)`. The two never mix.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod engine;
pub mod error;
pub mod observer;
pub mod path;
pub mod schema;
pub mod shape;

pub use engine::{validate, validate_at, Engine, EngineOptions};
pub use error::{FieldError, FieldErrors, SchemaError, ValidationResult};
pub use observer::{Observer, TracingObserver};
pub use path::{FieldPath, Segment};
pub use schema::{FieldMap, Outcome, Pipeline, Schema, Validator};
pub use shape::Shape;
