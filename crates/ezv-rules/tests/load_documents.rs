//! Integration test: load rule documents and data files from disk and
//! validate end to end.

use std::fs;
use std::path::PathBuf;

use ezv_core::{validate, FieldMap, Schema};
use ezv_rules::rules::{each, optional, required, shape, string, with_message};
use ezv_rules::{load_document, load_value, DocumentError};
use serde_json::json;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn yaml_rules_against_json_data() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "person.yaml",
        r#"
fields:
  name: [required, string]
  friends:
    - optional
    - each:
        fields:
          name: [required, string]
"#,
    );
    let data = write(
        &dir,
        "people.json",
        r#"[
            {"name": "wheat", "friends": [{"name": "brian"}]},
            {"name": 7, "friends": [{"namez": "tasty"}, {"name": "x"}]}
        ]"#,
    );

    let schema = load_document(&rules).unwrap().compile().unwrap();
    let value = load_value(&data).unwrap();
    let errors = validate(&value, &schema).unwrap();

    assert_eq!(errors.fields(), ["1.name", "1.friends.0.name"]);
    assert_eq!(errors.errors()[0].value, Some(json!(7)));
    assert_eq!(errors.errors()[1].message, "is required");
    assert_eq!(errors.errors()[1].value, None);
}

#[test]
fn json_rules_document() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", r#"{"rules": ["string", {"max_length": 3}]}"#);
    let schema = load_document(&rules).unwrap().compile().unwrap();
    let errors = validate(&json!(["abc", "abcd", 1]), &schema).unwrap();
    assert_eq!(errors.fields(), ["1", "2"]);
}

#[test]
fn missing_file_is_load_error() {
    let dir = TempDir::new().unwrap();
    let err = load_document(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, DocumentError::Load { .. }), "{err}");
}

#[test]
fn malformed_document_is_load_error() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "bad.yaml", "fields: [not, a, map]\n");
    let err = load_document(&rules).unwrap_err();
    assert!(err.to_string().contains("not a rule document"), "{err}");
}

#[test]
fn programmatic_schema_matches_document() {
    let friend = Schema::fields(FieldMap::new().field("name", vec![required(), string()]));
    let person = Schema::fields(
        FieldMap::new()
            .field(
                "name",
                vec![required(), with_message(string(), "name must be a string")],
            )
            .field("address", vec![optional(), shape(FieldMap::new().field("street", string()))])
            .field("friends", vec![optional(), each(friend)]),
    );
    let input = json!({
        "name": 1,
        "address": {"street": false},
        "friends": [{"name": "a"}, {}]
    });
    let errors = validate(&input, &person).unwrap();
    assert_eq!(errors.fields(), ["name", "address.street", "friends.1.name"]);
    assert_eq!(errors.errors()[0].message, "name must be a string");
}
