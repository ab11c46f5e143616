//! # ezv-rules: Stock Validators and Rule Documents
//!
//! Consumers of the `ezv-core` engine contract:
//!
//! - [`rules`]: ready-made validators (presence, type, bounds, pattern,
//!   membership, nested shape, per-element schema, cross-field equality).
//! - [`document`]: YAML/JSON rule documents that compile into schemas built
//!   from those validators.
//!
//! ## Crate Policy
//!
//! - Depends only on `ezv-core` internally.
//! - Validators never panic on unexpected input; a value of the wrong type
//!   is reported or passed according to the rule's documented convention.

pub mod document;
pub mod error;
pub mod rules;

pub use document::{load_document, load_value, Format, RuleSpec, SchemaDoc};
pub use error::DocumentError;
