//! # Stock Validators
//!
//! Ready-made [`Validator`]s for the common checks. Each function returns a
//! fresh validator that can be placed in any pipeline.
//!
//! ## Conventions
//!
//! - Presence rules (`optional`, `nullable`, `required`) decide what happens
//!   to absent input. Put them first in a pipeline.
//! - Type rules (`string`, `number`, ...) and `one_of` report absent input
//!   as an error.
//! - Bound rules (`min`, `max`, `min_length`, `max_length`, `pattern`) pass
//!   input of the wrong type or absent input; the type rule owns that
//!   message.

use ezv_core::{Outcome, Schema, Validator};
use regex::Regex;
use serde_json::Value;

/// Stop the pipeline quietly when the field is absent.
pub fn optional() -> Validator {
    Validator::named("optional", |v, _| match v {
        None => Outcome::Break,
        Some(_) => Outcome::Pass,
    })
}

/// Stop the pipeline quietly when the field is absent or null.
pub fn nullable() -> Validator {
    Validator::named("nullable", |v, _| match v {
        None | Some(Value::Null) => Outcome::Break,
        Some(_) => Outcome::Pass,
    })
}

/// Fail when the field is absent or null.
pub fn required() -> Validator {
    Validator::named("required", |v, _| match v {
        None | Some(Value::Null) => Outcome::error("is required"),
        Some(_) => Outcome::Pass,
    })
}

fn type_rule(name: &'static str, message: &'static str, accept: fn(&Value) -> bool) -> Validator {
    Validator::named(name, move |v, _| match v {
        Some(v) if accept(v) => Outcome::Pass,
        _ => Outcome::error(message),
    })
}

pub fn string() -> Validator {
    type_rule("string", "must be a string", Value::is_string)
}

pub fn number() -> Validator {
    type_rule("number", "must be a number", Value::is_number)
}

/// Integral numbers, including floats with no fractional part.
pub fn integer() -> Validator {
    type_rule("integer", "must be an integer", |v| {
        v.is_i64() || v.is_u64() || v.as_f64().is_some_and(|f| f.fract() == 0.0)
    })
}

pub fn boolean() -> Validator {
    type_rule("boolean", "must be a boolean", Value::is_boolean)
}

pub fn object() -> Validator {
    type_rule("object", "must be an object", Value::is_object)
}

pub fn array() -> Validator {
    type_rule("array", "must be an array", Value::is_array)
}

/// Numbers must be at least `bound`.
pub fn min(bound: f64) -> Validator {
    Validator::named("min", move |v, _| match v.and_then(Value::as_f64) {
        Some(n) if n < bound => Outcome::error(format!("must be at least {bound}")),
        _ => Outcome::Pass,
    })
}

/// Numbers must be at most `bound`.
pub fn max(bound: f64) -> Validator {
    Validator::named("max", move |v, _| match v.and_then(Value::as_f64) {
        Some(n) if n > bound => Outcome::error(format!("must be at most {bound}")),
        _ => Outcome::Pass,
    })
}

/// Characters of a string, or elements of an array.
fn length(value: &Value) -> Option<(usize, &'static str)> {
    match value {
        Value::String(s) => Some((s.chars().count(), "characters")),
        Value::Array(items) => Some((items.len(), "items")),
        _ => None,
    }
}

pub fn min_length(bound: usize) -> Validator {
    Validator::named("min_length", move |v, _| match v.and_then(length) {
        Some((len, unit)) if len < bound => {
            Outcome::error(format!("must have at least {bound} {unit}"))
        }
        _ => Outcome::Pass,
    })
}

pub fn max_length(bound: usize) -> Validator {
    Validator::named("max_length", move |v, _| match v.and_then(length) {
        Some((len, unit)) if len > bound => {
            Outcome::error(format!("must have at most {bound} {unit}"))
        }
        _ => Outcome::Pass,
    })
}

/// Strings must match the regular expression `pattern`.
///
/// # Errors
///
/// Returns the regex compilation error if `pattern` is not a valid
/// expression.
pub fn pattern(pattern: &str) -> Result<Validator, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(Validator::named("pattern", move |v, _| match v {
        Some(Value::String(s)) if !regex.is_match(s) => {
            Outcome::error(format!("must match pattern {}", regex.as_str()))
        }
        _ => Outcome::Pass,
    }))
}

/// The value must equal one of `allowed`.
pub fn one_of(allowed: Vec<Value>) -> Validator {
    let listing = allowed
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let message = format!("must be one of [{listing}]");
    Validator::named("one_of", move |v, _| match v {
        Some(v) if allowed.contains(v) => Outcome::Pass,
        _ => Outcome::error(message.clone()),
    })
}

/// Require an object and validate it against `schema`.
pub fn shape(schema: impl Into<Schema>) -> Validator {
    let schema = schema.into();
    Validator::named("shape", move |v, _| match v {
        Some(Value::Object(_)) => Outcome::Nested(schema.clone()),
        _ => Outcome::error("must be an object"),
    })
}

/// Require an array and validate its elements against `schema`.
///
/// A field map validates each element as a record; a pipeline validates
/// each element directly.
pub fn each(schema: impl Into<Schema>) -> Validator {
    let schema = schema.into();
    Validator::named("each", move |v, _| match v {
        Some(Value::Array(_)) => Outcome::Nested(schema.clone()),
        _ => Outcome::error("must be an array"),
    })
}

/// Cross-field rule for virtual fields: fields `a` and `b` of the enclosing
/// record must be equal.
pub fn equals_field(a: impl Into<String>, b: impl Into<String>) -> Validator {
    let (a, b) = (a.into(), b.into());
    let message = format!("{a} and {b} must match");
    Validator::named("equals_field", move |v, _| {
        let record = v.and_then(Value::as_object);
        let left = record.and_then(|r| r.get(&a));
        let right = record.and_then(|r| r.get(&b));
        if left == right {
            Outcome::Pass
        } else {
            Outcome::error(message.clone())
        }
    })
}

/// Custom predicate over present values. Absent input passes.
pub fn check<F>(message: impl Into<String>, predicate: F) -> Validator
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    Validator::new(move |v, _| match v {
        Some(v) if !predicate(v) => Outcome::error(message.clone()),
        _ => Outcome::Pass,
    })
}

/// Replace the message of any error `validator` reports.
pub fn with_message(validator: Validator, message: impl Into<String>) -> Validator {
    let message = message.into();
    with_message_fn(validator, move |_| message.clone())
}

/// Like [`with_message`], building the message from the rejected input.
pub fn with_message_fn<F>(validator: Validator, message: F) -> Validator
where
    F: Fn(Option<&Value>) -> String + Send + Sync + 'static,
{
    let name = validator.name().unwrap_or("with_message").to_string();
    Validator::named(name, move |v, parent| match validator.run(v, parent) {
        Outcome::Error(_) => Outcome::Error(message(v)),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(v: &Validator, input: Option<Value>) -> Outcome {
        v.run(input.as_ref(), &Value::Null)
    }

    fn message(outcome: Outcome) -> Option<String> {
        match outcome {
            Outcome::Error(m) => Some(m),
            _ => None,
        }
    }

    #[test]
    fn presence_rules() {
        assert!(matches!(run(&optional(), None), Outcome::Break));
        assert!(matches!(run(&optional(), Some(json!(null))), Outcome::Pass));
        assert!(matches!(run(&nullable(), Some(json!(null))), Outcome::Break));
        assert_eq!(message(run(&required(), None)).as_deref(), Some("is required"));
        assert_eq!(message(run(&required(), Some(json!(null)))).as_deref(), Some("is required"));
        assert!(matches!(run(&required(), Some(json!(0))), Outcome::Pass));
    }

    #[test]
    fn type_rules() {
        assert!(matches!(run(&string(), Some(json!("a"))), Outcome::Pass));
        assert_eq!(message(run(&string(), Some(json!(1)))).as_deref(), Some("must be a string"));
        assert_eq!(message(run(&string(), None)).as_deref(), Some("must be a string"));
        assert!(matches!(run(&number(), Some(json!(1.5))), Outcome::Pass));
        assert!(matches!(run(&integer(), Some(json!(3))), Outcome::Pass));
        assert!(matches!(run(&integer(), Some(json!(3.0))), Outcome::Pass));
        assert!(message(run(&integer(), Some(json!(3.5)))).is_some());
        assert!(matches!(run(&boolean(), Some(json!(false))), Outcome::Pass));
        assert!(matches!(run(&object(), Some(json!({}))), Outcome::Pass));
        assert!(matches!(run(&array(), Some(json!([]))), Outcome::Pass));
        assert!(message(run(&array(), Some(json!({})))).is_some());
    }

    #[test]
    fn numeric_bounds() {
        assert_eq!(message(run(&min(10.0), Some(json!(1)))).as_deref(), Some("must be at least 10"));
        assert!(matches!(run(&min(10.0), Some(json!(10))), Outcome::Pass));
        assert_eq!(message(run(&max(100.0), Some(json!(123)))).as_deref(), Some("must be at most 100"));
        assert!(matches!(run(&max(100.0), Some(json!("123"))), Outcome::Pass));
        assert!(matches!(run(&max(100.0), None), Outcome::Pass));
    }

    #[test]
    fn length_bounds() {
        assert_eq!(
            message(run(&min_length(2), Some(json!("a")))).as_deref(),
            Some("must have at least 2 characters")
        );
        assert!(matches!(run(&min_length(2), Some(json!("éé"))), Outcome::Pass));
        assert_eq!(
            message(run(&max_length(1), Some(json!([1, 2])))).as_deref(),
            Some("must have at most 1 items")
        );
        assert!(matches!(run(&max_length(1), Some(json!(12345))), Outcome::Pass));
    }

    #[test]
    fn pattern_rule() {
        let v = pattern("^[a-z]+$").unwrap();
        assert!(matches!(run(&v, Some(json!("abc"))), Outcome::Pass));
        assert_eq!(
            message(run(&v, Some(json!("ABC")))).as_deref(),
            Some("must match pattern ^[a-z]+$")
        );
        assert!(matches!(run(&v, Some(json!(1))), Outcome::Pass));
        assert!(pattern("(").is_err());
    }

    #[test]
    fn one_of_rule() {
        let v = one_of(vec![json!("red"), json!("green")]);
        assert!(matches!(run(&v, Some(json!("red"))), Outcome::Pass));
        assert_eq!(
            message(run(&v, Some(json!("blue")))).as_deref(),
            Some(r#"must be one of ["red", "green"]"#)
        );
        assert!(message(run(&v, None)).is_some());
    }

    #[test]
    fn shape_and_each_return_nested() {
        let inner = Schema::from(string());
        assert!(matches!(run(&shape(inner.clone()), Some(json!({}))), Outcome::Nested(_)));
        assert_eq!(
            message(run(&shape(inner.clone()), Some(json!([])))).as_deref(),
            Some("must be an object")
        );
        assert!(matches!(run(&each(inner.clone()), Some(json!([]))), Outcome::Nested(_)));
        assert_eq!(
            message(run(&each(inner), None)).as_deref(),
            Some("must be an array")
        );
    }

    #[test]
    fn equals_field_compares_record_fields() {
        let v = equals_field("password", "confirm");
        assert!(matches!(
            run(&v, Some(json!({"password": "a", "confirm": "a"}))),
            Outcome::Pass
        ));
        assert_eq!(
            message(run(&v, Some(json!({"password": "a", "confirm": "b"})))).as_deref(),
            Some("password and confirm must match")
        );
    }

    #[test]
    fn check_and_with_message() {
        let even = check("must be even", |v| v.as_i64().is_some_and(|n| n % 2 == 0));
        assert!(matches!(run(&even, Some(json!(2))), Outcome::Pass));
        assert!(matches!(run(&even, None), Outcome::Pass));
        assert_eq!(message(run(&even, Some(json!(3)))).as_deref(), Some("must be even"));

        let named = with_message(string(), "name must be a string");
        assert_eq!(named.name(), Some("string"));
        assert_eq!(
            message(run(&named, Some(json!(1)))).as_deref(),
            Some("name must be a string")
        );
        assert!(matches!(run(&named, Some(json!("x"))), Outcome::Pass));
    }

    #[test]
    fn message_built_from_input() {
        let age = with_message_fn(max(100.0), |v| match v {
            Some(v) => format!("{v} is too old"),
            None => "age is missing".to_string(),
        });
        assert_eq!(age.name(), Some("max"));
        assert_eq!(message(run(&age, Some(json!(123)))).as_deref(), Some("123 is too old"));
        assert!(matches!(run(&age, Some(json!(30))), Outcome::Pass));

        let present = with_message_fn(required(), |v| format!("got {v:?}"));
        assert_eq!(message(run(&present, None)).as_deref(), Some("got None"));
    }
}
