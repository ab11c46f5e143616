//! # Rule Documents
//!
//! A rule document describes a [`Schema`] in YAML or JSON using the stock
//! validators from [`crate::rules`]:
//!
//! ```yaml
//! fields:
//!   name: [required, string, { min_length: 2 }]
//!   age: [optional, integer, { min: 0 }, { max: 150 }]
//!   address:
//!     - required
//!     - shape:
//!         fields:
//!           street: [string]
//!   tags: [optional, { each: { rules: [string] } }]
//!   __password_match: [{ equals_field: [password, confirm] }]
//! ```
//!
//! Unit rules are bare strings; rules with parameters are single-key maps.
//! Field order in the document is the order errors are reported in.
//!
//! Documents are compiled into fresh validators on every call to
//! [`SchemaDoc::compile`].

use std::path::Path;

use ezv_core::{FieldMap, Pipeline, Schema, Validator};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocumentError;
use crate::rules;

/// Declarative schema. A document carries exactly one of `fields` or
/// `rules`; any other key is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum SchemaDoc {
    /// A field map: `{ fields: { name: [rule, ...] } }`.
    Fields { fields: IndexMap<String, Vec<RuleSpec>> },
    /// A pipeline: `{ rules: [rule, ...] }`.
    Rules { rules: Vec<RuleSpec> },
}

/// One rule in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSpec {
    Required,
    Optional,
    Nullable,
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Min(f64),
    Max(f64),
    MinLength(usize),
    MaxLength(usize),
    Pattern(String),
    OneOf(Vec<Value>),
    Shape(Box<SchemaDoc>),
    Each(Box<SchemaDoc>),
    /// `equals_field: [a, b]`, for virtual fields.
    EqualsField(String, String),
    /// `message: [rule, "text"]` overrides the rule's error message.
    Message(Box<RuleSpec>, String),
}

impl SchemaDoc {
    /// Build the schema this document describes.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Pattern`] if a `pattern` rule holds an
    /// invalid regular expression.
    pub fn compile(&self) -> Result<Schema, DocumentError> {
        match self {
            SchemaDoc::Fields { fields } => {
                let mut map = FieldMap::new();
                for (name, specs) in fields {
                    map = map.field(name.clone(), compile_pipeline(specs)?);
                }
                Ok(Schema::fields(map))
            }
            SchemaDoc::Rules { rules } => Ok(Schema::pipeline(compile_pipeline(rules)?)),
        }
    }
}

fn compile_pipeline(specs: &[RuleSpec]) -> Result<Pipeline, DocumentError> {
    specs.iter().map(RuleSpec::compile).collect()
}

impl RuleSpec {
    /// Build the validator for this rule.
    pub fn compile(&self) -> Result<Validator, DocumentError> {
        let validator = match self {
            RuleSpec::Required => rules::required(),
            RuleSpec::Optional => rules::optional(),
            RuleSpec::Nullable => rules::nullable(),
            RuleSpec::String => rules::string(),
            RuleSpec::Number => rules::number(),
            RuleSpec::Integer => rules::integer(),
            RuleSpec::Boolean => rules::boolean(),
            RuleSpec::Object => rules::object(),
            RuleSpec::Array => rules::array(),
            RuleSpec::Min(bound) => rules::min(*bound),
            RuleSpec::Max(bound) => rules::max(*bound),
            RuleSpec::MinLength(bound) => rules::min_length(*bound),
            RuleSpec::MaxLength(bound) => rules::max_length(*bound),
            RuleSpec::Pattern(pattern) => {
                rules::pattern(pattern).map_err(|source| DocumentError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?
            }
            RuleSpec::OneOf(allowed) => rules::one_of(allowed.clone()),
            RuleSpec::Shape(doc) => rules::shape(doc.compile()?),
            RuleSpec::Each(doc) => rules::each(doc.compile()?),
            RuleSpec::EqualsField(a, b) => rules::equals_field(a.clone(), b.clone()),
            RuleSpec::Message(inner, message) => {
                rules::with_message(inner.compile()?, message.clone())
            }
        };
        Ok(validator)
    }
}

/// Document formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.yaml` and `.yml` are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "yaml" | "yml" => Format::Yaml,
            _ => Format::Json,
        }
    }
}

/// Parse `content` into a JSON value.
pub fn parse_value(content: &str, format: Format) -> Result<Value, String> {
    match format {
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}")),
        Format::Json => serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}")),
    }
}

/// Read a data file (YAML or JSON) into a JSON value.
pub fn load_value(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Load {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    parse_value(&content, Format::from_path(path)).map_err(|reason| DocumentError::Load {
        path: path.display().to_string(),
        reason,
    })
}

/// Read a rule document (YAML or JSON).
pub fn load_document(path: &Path) -> Result<SchemaDoc, DocumentError> {
    let value = load_value(path)?;
    serde_json::from_value(value).map_err(|e| DocumentError::Load {
        path: path.display().to_string(),
        reason: format!("not a rule document: {e}"),
    })
}
