//! # Error Types
//!
//! Two kinds of failure leave the engine and they never share a channel:
//!
//! - [`FieldError`]: the data is invalid. Collected into [`FieldErrors`] and
//!   returned as the `Ok` value of a validation call. One failing field never
//!   stops its siblings from being checked.
//! - [`SchemaError`]: the schema itself is misconfigured. Returned as `Err`
//!   and aborts the call.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path from the validation root, e.g. `friends.1.name`.
    pub field: String,
    /// The offending value. `None` when the field was absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Message produced by the failing validator.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Ordered collection of field failures. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Dotted paths of all errors, in order.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// The schema handed to the engine is misconfigured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A pipeline has no validators.
    #[error("pipeline for field '{field}' has no validators")]
    EmptyPipeline {
        /// Path of the field whose pipeline is empty; empty for the root.
        field: String,
    },

    /// A field name cannot be represented in a dotted path.
    #[error("invalid field name '{field}': {reason}")]
    InvalidFieldName {
        /// The offending name.
        field: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// Nested schemas kept being returned past the configured depth.
    #[error("nesting depth limit {limit} exceeded at '{path}'")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
        /// Path at which the limit was hit.
        path: String,
    },
}

/// Result of a validation call.
pub type ValidationResult = Result<FieldErrors, SchemaError>;
