//! # Validation Engine
//!
//! Walks a value against a [`Schema`] and collects every [`FieldError`].
//!
//! ## Traversal
//!
//! Each step classifies the value into a [`Shape`] and dispatches on
//! `(schema, shape)`:
//!
//! | schema     | shape                  | action                                      |
//! |------------|------------------------|---------------------------------------------|
//! | `Pipeline` | any sequence           | run the pipeline on each element at `path.i` |
//! | `Pipeline` | `Scalar` / `Record`    | run the pipeline on the value at `path`     |
//! | `Fields`   | `Record` / `Scalar`    | run each field's pipeline at `path.field`   |
//! | `Fields`   | any sequence           | walk each element at `path.i`               |
//!
//! A scalar walked against a field map has no fields, so every non-virtual
//! field sees an absent input. A pipeline that returns
//! [`Outcome::Nested`] makes the engine walk the same input against the
//! returned schema below the same path.
//!
//! ## Depth limit
//!
//! Descending into the data (an array element, or a present record field
//! that is not virtual) is always allowed and resets the nesting count, so
//! arbitrarily deep input stays valid. Only nested walks that stay on the
//! same value, or on an absent one, are counted. More than
//! [`EngineOptions::max_depth`] of those in a row means the schema keeps
//! handing back schemas without making progress.
//!
//! The engine never mutates its inputs and keeps no state between calls.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldError, FieldErrors, SchemaError, ValidationResult};
use crate::observer::Observer;
use crate::path::FieldPath;
use crate::schema::{FieldMap, Outcome, Pipeline, Schema};
use crate::shape::Shape;

/// Default limit on nested walks that do not descend into the data.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default prefix marking virtual fields.
pub const DEFAULT_VIRTUAL_PREFIX: &str = "__";

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximum number of consecutive nested walks on the same (or an
    /// absent) value before the call fails with
    /// [`SchemaError::DepthExceeded`].
    pub max_depth: usize,
    /// Field names starting with this prefix receive the whole enclosing
    /// record as input. An empty prefix disables virtual fields.
    pub virtual_prefix: String,
}

impl EngineOptions {
    /// Whether `name` marks a virtual field under these options.
    pub fn is_virtual(&self, name: &str) -> bool {
        !self.virtual_prefix.is_empty() && name.starts_with(&self.virtual_prefix)
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            virtual_prefix: DEFAULT_VIRTUAL_PREFIX.to_string(),
        }
    }
}

/// Validation engine.
///
/// Cheap to clone and safe to share across threads; a single engine may run
/// any number of concurrent or reentrant validations.
#[derive(Clone, Default)]
pub struct Engine {
    options: EngineOptions,
    observer: Option<Arc<dyn Observer>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            observer: None,
        }
    }

    /// Attach an observer that sees every traversal event.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Validate `value` against `schema` from the root.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the schema, or a schema returned by one of
    /// its validators, is misconfigured. Invalid data is never an `Err`.
    pub fn validate(&self, value: &Value, schema: &Schema) -> ValidationResult {
        self.validate_at(value, schema, &FieldPath::root())
    }

    /// Validate `value` against `schema`, reporting every error below
    /// `prefix`.
    pub fn validate_at(
        &self,
        value: &Value,
        schema: &Schema,
        prefix: &FieldPath,
    ) -> ValidationResult {
        let mut errors = FieldErrors::new();
        self.walk(value, schema, prefix, 0, &mut errors)?;
        tracing::debug!(prefix = %prefix, errors = errors.len(), "validation complete");
        Ok(errors)
    }

    /// `depth` counts nested walks in a row that stayed on the same value.
    fn walk(
        &self,
        value: &Value,
        schema: &Schema,
        path: &FieldPath,
        depth: usize,
        errors: &mut FieldErrors,
    ) -> Result<(), SchemaError> {
        if depth > self.options.max_depth {
            return Err(SchemaError::DepthExceeded {
                limit: self.options.max_depth,
                path: path.to_string(),
            });
        }
        schema.check_at(path)?;

        let shape = Shape::of(value);
        if let Some(observer) = &self.observer {
            observer.on_shape(path, shape);
        }

        match (schema, shape) {
            (Schema::Pipeline(pipeline), s) if s.is_sequence() => {
                for (i, item) in elements(value).iter().enumerate() {
                    self.apply(pipeline, Some(item), value, &path.index(i), 0, errors)?;
                }
            }
            (Schema::Pipeline(pipeline), _) => {
                self.apply(pipeline, Some(value), value, path, depth + 1, errors)?;
            }
            (Schema::Fields(map), Shape::Record | Shape::Scalar) => {
                self.walk_fields(map, value, path, depth, errors)?;
            }
            (Schema::Fields(_), _) => {
                for (i, item) in elements(value).iter().enumerate() {
                    self.walk(item, schema, &path.index(i), 0, errors)?;
                }
            }
        }
        Ok(())
    }

    fn walk_fields(
        &self,
        map: &FieldMap,
        record: &Value,
        path: &FieldPath,
        depth: usize,
        errors: &mut FieldErrors,
    ) -> Result<(), SchemaError> {
        let object = record.as_object();
        for (name, pipeline) in map.iter() {
            let (input, nested_depth) = if self.options.is_virtual(name) {
                (Some(record), depth + 1)
            } else {
                match object.and_then(|o| o.get(name)) {
                    Some(child) => (Some(child), 0),
                    None => (None, depth + 1),
                }
            };
            self.apply(pipeline, input, record, &path.key(name), nested_depth, errors)?;
        }
        Ok(())
    }

    /// A nested schema returned by `pipeline` is walked at `nested_depth`.
    fn apply(
        &self,
        pipeline: &Pipeline,
        input: Option<&Value>,
        parent: &Value,
        path: &FieldPath,
        nested_depth: usize,
        errors: &mut FieldErrors,
    ) -> Result<(), SchemaError> {
        let outcome = pipeline.evaluate(input, parent);
        if let Some(observer) = &self.observer {
            observer.on_outcome(path, &outcome);
        }

        match outcome {
            Outcome::Pass | Outcome::Break => Ok(()),
            Outcome::Error(message) => {
                let error = FieldError {
                    field: path.to_string(),
                    value: input.cloned(),
                    message,
                };
                if let Some(observer) = &self.observer {
                    observer.on_error(&error);
                }
                errors.push(error);
                Ok(())
            }
            Outcome::Nested(schema) => {
                let target = input.unwrap_or(&Value::Null);
                self.walk(target, &schema, path, nested_depth, errors)
            }
        }
    }
}

fn elements(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Validate `value` against `schema` with default options.
///
/// ```
/// use ezv_core::{validate, FieldMap, Outcome, Schema, Validator};
/// use serde_json::json;
///
/// let schema = Schema::fields(FieldMap::new().field(
///     "age",
///     Validator::new(|v, _| match v {
///         Some(v) if v.is_number() => Outcome::Pass,
///         _ => Outcome::error("age must be a number"),
///     }),
/// ));
///
/// let errors = validate(&json!({"age": "123"}), &schema).unwrap();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.errors()[0].field, "age");
/// ```
pub fn validate(value: &Value, schema: &Schema) -> ValidationResult {
    Engine::default().validate(value, schema)
}

/// Validate `value` against `schema` below `prefix`, with default options.
pub fn validate_at(value: &Value, schema: &Schema, prefix: &FieldPath) -> ValidationResult {
    Engine::default().validate_at(value, schema, prefix)
}
