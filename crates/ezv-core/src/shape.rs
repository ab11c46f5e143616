//! # Shape Classification
//!
//! Every validation step starts by classifying the value once into a
//! [`Shape`]. The engine then dispatches with a single `match` on the schema
//! kind and the shape.
//!
//! Sequences are classified by looking at every element. An empty sequence
//! is a [`Shape::ScalarSequence`]; a sequence mixing scalars with records, or
//! containing nested sequences, is a [`Shape::MixedSequence`].

use std::fmt;

use serde_json::Value;

/// Structural class of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Null, boolean, number or string.
    Scalar,
    /// A JSON object.
    Record,
    /// An array that is empty or holds only scalars.
    ScalarSequence,
    /// A non-empty array holding only records.
    RecordSequence,
    /// Any other array.
    MixedSequence,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Shape::Record,
            Value::Array(items) => classify_sequence(items),
            _ => Shape::Scalar,
        }
    }

    pub fn is_sequence(self) -> bool {
        matches!(
            self,
            Shape::ScalarSequence | Shape::RecordSequence | Shape::MixedSequence
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Scalar => "scalar",
            Shape::Record => "record",
            Shape::ScalarSequence => "scalar-sequence",
            Shape::RecordSequence => "record-sequence",
            Shape::MixedSequence => "mixed-sequence",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn classify_sequence(items: &[Value]) -> Shape {
    if items.iter().all(is_scalar) {
        Shape::ScalarSequence
    } else if items.iter().all(Value::is_object) {
        Shape::RecordSequence
    } else {
        Shape::MixedSequence
    }
}
