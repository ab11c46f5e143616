//! # Schemas, Pipelines, and Validator Outcomes
//!
//! A [`Schema`] is either a [`Pipeline`] applied to a value (or to every
//! element of a sequence), or a [`FieldMap`] naming the fields of a record
//! and the pipeline that checks each one.
//!
//! Validators report what they found through [`Outcome`]. A validator that
//! wants the engine to descend into the value it was given returns
//! [`Outcome::Nested`] carrying the schema to apply; there is no structural
//! guessing about whether a returned value "looks like" a schema.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::SchemaError;
use crate::path::FieldPath;

/// Result of running one validator.
#[derive(Clone)]
pub enum Outcome {
    /// Nothing to report; continue with the next validator.
    Pass,
    /// Stop the pipeline without an error (optional-field pattern).
    Break,
    /// Stop the pipeline and record an error with this message.
    Error(String),
    /// Stop the pipeline and validate the same input against this schema.
    Nested(Schema),
}

impl Outcome {
    /// Convenience constructor for [`Outcome::Error`].
    pub fn error(message: impl Into<String>) -> Self {
        Outcome::Error(message.into())
    }

    /// Returns true if the pipeline stops at this outcome.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Pass)
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Break => "break",
            Outcome::Error(_) => "error",
            Outcome::Nested(_) => "nested",
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => f.write_str("Pass"),
            Outcome::Break => f.write_str("Break"),
            Outcome::Error(m) => f.debug_tuple("Error").field(m).finish(),
            Outcome::Nested(s) => f.debug_tuple("Nested").field(s).finish(),
        }
    }
}

impl From<Option<String>> for Outcome {
    fn from(message: Option<String>) -> Self {
        match message {
            Some(m) => Outcome::Error(m),
            None => Outcome::Pass,
        }
    }
}

impl From<Schema> for Outcome {
    fn from(schema: Schema) -> Self {
        Outcome::Nested(schema)
    }
}

type ValidatorFn = dyn Fn(Option<&Value>, &Value) -> Outcome + Send + Sync;

/// A single check.
///
/// The first argument is the value under test, `None` when a record field
/// is absent. The second argument is the record or sequence that encloses
/// the value at the current level.
#[derive(Clone)]
pub struct Validator {
    name: Option<Arc<str>>,
    check: Arc<ValidatorFn>,
}

impl Validator {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> Outcome + Send + Sync + 'static,
    {
        Self {
            name: None,
            check: Arc::new(check),
        }
    }

    /// Create a validator carrying a name for logs and `Debug` output.
    pub fn named<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> Outcome + Send + Sync + 'static,
    {
        Self {
            name: Some(Arc::from(name.into())),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Run the check.
    pub fn run(&self, input: Option<&Value>, parent: &Value) -> Outcome {
        (self.check)(input, parent)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Validator({name})"),
            None => f.write_str("Validator(<anonymous>)"),
        }
    }
}

/// Ordered validators evaluated until one returns a terminal [`Outcome`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    validators: Vec<Validator>,
}

impl Pipeline {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self { validators }
    }

    /// Append a validator to the end of the pipeline.
    pub fn then(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run validators in order and return the first terminal outcome, or
    /// [`Outcome::Pass`] when every validator passed.
    pub fn evaluate(&self, input: Option<&Value>, parent: &Value) -> Outcome {
        for validator in &self.validators {
            let outcome = validator.run(input, parent);
            if outcome.is_terminal() {
                return outcome;
            }
        }
        Outcome::Pass
    }
}

impl From<Validator> for Pipeline {
    fn from(validator: Validator) -> Self {
        Self {
            validators: vec![validator],
        }
    }
}

impl From<Vec<Validator>> for Pipeline {
    fn from(validators: Vec<Validator>) -> Self {
        Self { validators }
    }
}

impl FromIterator<Validator> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Validator>>(iter: I) -> Self {
        Self {
            validators: iter.into_iter().collect(),
        }
    }
}

/// Field name to pipeline, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: IndexMap<String, Pipeline>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Declaring the same name twice replaces the earlier
    /// pipeline but keeps its original position.
    pub fn field(mut self, name: impl Into<String>, pipeline: impl Into<Pipeline>) -> Self {
        self.fields.insert(name.into(), pipeline.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Pipeline> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pipeline)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, P: Into<Pipeline>> FromIterator<(K, P)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        }
    }
}

/// Declarative description of what a value must look like.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Apply the pipeline to the value, or to each element of a sequence.
    Pipeline(Pipeline),
    /// Validate the named fields of a record.
    Fields(FieldMap),
}

impl Schema {
    /// A schema made of a single validator function.
    pub fn validator<F>(check: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> Outcome + Send + Sync + 'static,
    {
        Schema::Pipeline(Pipeline::from(Validator::new(check)))
    }

    pub fn pipeline(pipeline: impl Into<Pipeline>) -> Self {
        Schema::Pipeline(pipeline.into())
    }

    pub fn fields(fields: FieldMap) -> Self {
        Schema::Fields(fields)
    }

    /// Check the declared structure for configuration mistakes.
    ///
    /// Covers empty pipelines and field names that would corrupt error
    /// paths. Schemas returned by validators at runtime are checked by the
    /// engine when they are reached.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.check_at(&FieldPath::root())
    }

    /// Same as [`check`](Self::check), reporting paths below `path`.
    pub(crate) fn check_at(&self, path: &FieldPath) -> Result<(), SchemaError> {
        match self {
            Schema::Pipeline(p) if p.is_empty() => Err(SchemaError::EmptyPipeline {
                field: path.to_string(),
            }),
            Schema::Pipeline(_) => Ok(()),
            Schema::Fields(map) => {
                for (name, pipeline) in map.iter() {
                    check_field_name(name)?;
                    if pipeline.is_empty() {
                        return Err(SchemaError::EmptyPipeline {
                            field: path.key(name).to_string(),
                        });
                    }
                }
                Ok(())
            }
        }
    }
}

impl From<Pipeline> for Schema {
    fn from(pipeline: Pipeline) -> Self {
        Schema::Pipeline(pipeline)
    }
}

impl From<Validator> for Schema {
    fn from(validator: Validator) -> Self {
        Schema::Pipeline(Pipeline::from(validator))
    }
}

impl From<FieldMap> for Schema {
    fn from(fields: FieldMap) -> Self {
        Schema::Fields(fields)
    }
}

pub(crate) fn check_field_name(name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::InvalidFieldName {
            field: name.to_string(),
            reason: "field name is empty".into(),
        });
    }
    if name.contains('.') {
        return Err(SchemaError::InvalidFieldName {
            field: name.to_string(),
            reason: "field name contains the path separator '.'".into(),
        });
    }
    Ok(())
}
