mod common;

use std::collections::BTreeMap;

use common::{init_tracing, parse};
use json_merge::{generate, merge, merge_many, valid, ErrorKind, Map, Record, Role, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

// ── Records ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    email: String,
    age: u32,
}

#[test]
fn record_patch_carries_its_defaults() {
    init_tracing();
    let user = Record(User {
        name: "John".into(),
        email: "john@example.com".into(),
        age: 30,
    });
    // Serializes as {"name":"Jane","age":0}: age is explicitly set, email is skipped.
    let patch = Record(User {
        name: "Jane".into(),
        email: String::new(),
        age: 0,
    });

    let merged = merge(&user, &patch).unwrap().into_doc().into_inner();
    assert_eq!(
        merged,
        User {
            name: "Jane".into(),
            email: "john@example.com".into(),
            age: 0,
        }
    );
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Config {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[test]
fn record_skipped_options_are_preserved() {
    let target = Record(Config {
        name: "app".into(),
        port: Some(8080),
        debug: Some(true),
        description: Some("test config".into()),
    });
    let patch = Record(Config {
        name: "updated-app".into(),
        port: Some(9090),
        debug: None,
        description: None,
    });

    let merged = merge(&target, &patch).unwrap();
    assert_eq!(merged.name, "updated-app");
    assert_eq!(merged.port, Some(9090));
    assert_eq!(merged.debug, Some(true));
    assert_eq!(merged.description.as_deref(), Some("test config"));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    title: String,
    body: Option<String>,
}

#[test]
fn record_serialized_none_deletes() {
    let target = Record(Note {
        title: "a".into(),
        body: Some("text".into()),
    });
    let patch = Record(Note {
        title: "b".into(),
        body: None,
    });

    let merged = merge(&target, &patch).unwrap();
    assert_eq!(
        *merged.doc(),
        Record(Note {
            title: "b".into(),
            body: None,
        })
    );
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Item {
    id: u32,
    #[serde(rename = "item_name")]
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip)]
    internal: String,
    price: f64,
}

#[test]
fn record_serde_attributes_apply() {
    let target = Record(Item {
        id: 1,
        name: "Widget".into(),
        description: "A useful widget".into(),
        internal: "secret".into(),
        price: 19.99,
    });
    let patch = Record(Item {
        id: 0,
        name: "Super Widget".into(),
        description: String::new(),
        internal: "ignored".into(),
        price: 29.99,
    });

    let merged = merge(&target, &patch).unwrap().into_doc().into_inner();
    assert_eq!(merged.id, 0);
    assert_eq!(merged.name, "Super Widget");
    assert_eq!(merged.description, "A useful widget");
    assert_eq!(merged.internal, "");
    assert_eq!(merged.price, 29.99);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Address {
    street: String,
    city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    name: String,
    #[serde(flatten)]
    address: Address,
    age: u32,
}

#[test]
fn record_flattened_fields_merge_at_top_level() {
    let target = Record(Person {
        name: "John".into(),
        address: Address {
            street: "123 Main St".into(),
            city: "NYC".into(),
        },
        age: 30,
    });
    let patch = json!({"name": "Jane", "city": "LA"});

    let merged = merge(&target, &patch).unwrap();
    assert_eq!(merged.name, "Jane");
    assert_eq!(merged.address.street, "123 Main St");
    assert_eq!(merged.address.city, "LA");
    assert_eq!(merged.age, 30);
}

#[test]
fn record_result_shape_mismatch() {
    let user = Record(User {
        name: "John".into(),
        email: String::new(),
        age: 30,
    });
    let err = merge(&user, "[1, 2]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert_eq!(err.role(), Some(Role::Result));
}

#[test]
fn record_deleting_required_field_fails() {
    let user = Record(User {
        name: "John".into(),
        email: String::new(),
        age: 30,
    });
    let err = merge(&user, r#"{"age": null}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Grid {
    cells: BTreeMap<(u8, u8), String>,
}

#[test]
fn record_that_cannot_serialize_is_encode_error() {
    let mut cells = BTreeMap::new();
    cells.insert((0, 0), "x".to_string());
    let grid = Record(Grid { cells });

    let err = merge(&grid, "{}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encode);
    assert_eq!(err.role(), Some(Role::Target));
    assert!(!valid(&grid));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Sparse {
    name: Option<String>,
    age: Option<u32>,
    city: Option<String>,
}

#[test]
fn record_generate_into_optional_fields() {
    let source = Record(Sparse {
        name: Some("John".into()),
        age: Some(30),
        city: Some("NYC".into()),
    });
    let target = Record(Sparse {
        name: Some("Jane".into()),
        age: Some(30),
        city: Some("NYC".into()),
    });

    let patch = generate(&source, &target).unwrap();
    assert_eq!(
        patch.into_inner(),
        Sparse {
            name: Some("Jane".into()),
            age: None,
            city: None,
        }
    );
}

#[test]
fn record_generate_needs_optional_fields() {
    let source = Record(User {
        name: "John".into(),
        email: String::new(),
        age: 30,
    });
    let target = Record(User {
        name: "Jane".into(),
        email: String::new(),
        age: 30,
    });
    // The patch {"name":"Jane"} has no "age", which User requires.
    let err = generate(&source, &target).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert_eq!(err.role(), Some(Role::Result));
}

// ── Native containers ─────────────────────────────────────────────────────

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn map_merge() {
    let target = object(json!({"name": "John", "age": 30}));
    let patch = object(json!({"name": "Jane", "email": "jane@example.com"}));

    let merged = merge(&target, &patch).unwrap();
    assert_eq!(
        *merged,
        object(json!({"name": "Jane", "age": 30, "email": "jane@example.com"}))
    );
}

#[test]
fn map_cannot_hold_array_result() {
    let target = object(json!({"a": 1}));
    let err = merge(&target, &json!(["c"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert_eq!(err.to_string(), "result document: expected object, found array");
}

#[test]
fn map_generate_basic_and_nested() {
    let original = object(json!({"name": "John", "age": 30, "city": "New York"}));
    let updated = object(json!({"name": "Jane", "age": 30, "email": "jane@example.com"}));

    let patch = generate(&original, &updated).unwrap();
    assert_eq!(
        patch,
        object(json!({"name": "Jane", "email": "jane@example.com", "city": null}))
    );
    assert_eq!(*merge(&original, &patch).unwrap(), updated);

    let original = object(json!({"user": {"name": "John", "age": 30}, "metadata": {"version": 1}}));
    let updated = object(json!({"user": {"name": "Jane", "email": "jane@example.com"}, "metadata": {"version": 1}}));
    let patch = generate(&original, &updated).unwrap();
    assert_eq!(
        patch,
        object(json!({"user": {"name": "Jane", "email": "jane@example.com", "age": null}}))
    );
    assert_eq!(*merge(&original, &patch).unwrap(), updated);
}

#[test]
fn value_generate_non_object_roots() {
    assert_eq!(generate(&json!([1]), &json!([2])).unwrap(), json!([2]));
    assert_eq!(generate(&json!({"a": 1}), &json!(null)).unwrap(), json!(null));
}

// ── Serialized bytes ──────────────────────────────────────────────────────

#[test]
fn bytes_merge() {
    let target = br#"{"name":"John","age":30}"#.to_vec();
    let patch = br#"{"name":"Jane","email":"jane@example.com"}"#.as_slice();

    let merged = merge(&target, patch).unwrap();
    let merged: Value = serde_json::from_slice(merged.doc()).unwrap();
    assert_eq!(merged, json!({"name": "Jane", "age": 30, "email": "jane@example.com"}));
}

#[test]
fn bytes_invalid_json_is_decode_error() {
    let invalid = br#"{"name": invalid}"#.to_vec();
    let patch = br#"{"name": "Jane"}"#.to_vec();

    let err = merge(&invalid, &patch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.role(), Some(Role::Target));

    let err = merge(&patch, &invalid).unwrap_err();
    assert_eq!(err.role(), Some(Role::Patch));
}

#[test]
fn bytes_generate() {
    let source = br#"{"a":1,"b":2}"#.to_vec();
    let target = br#"{"a":1,"c":3}"#.to_vec();
    let patch = generate(&source, &target).unwrap();
    assert_eq!(parse(std::str::from_utf8(&patch).unwrap()), json!({"b": null, "c": 3}));
}

// ── Serialized text ───────────────────────────────────────────────────────

#[test]
fn text_merge() {
    let merged = merge(
        &String::from(r#"{"name":"John","age":30}"#),
        r#"{"name":"Jane","email":"jane@example.com"}"#,
    )
    .unwrap();
    assert_eq!(
        parse(merged.doc()),
        json!({"name": "Jane", "age": 30, "email": "jane@example.com"})
    );
}

#[test]
fn text_invalid_target_is_a_string() {
    let merged = merge(&String::from(r#"{"name": invalid}"#), r#"{"name": "Jane"}"#).unwrap();
    assert_eq!(merged.doc(), r#"{"name":"Jane"}"#);
}

#[test]
fn text_invalid_patch_replaces_as_string() {
    let merged = merge(&String::from(r#"{"name": "John"}"#), r#"{"name": invalid}"#).unwrap();
    assert_eq!(merged.doc(), r#""{\"name\": invalid}""#);
}

#[test]
fn text_generate() {
    let patch = generate(
        &String::from(r#"{"name":"John","age":30,"city":"NYC"}"#),
        &String::from(r#"{"name":"Jane","age":30}"#),
    )
    .unwrap();
    assert_eq!(parse(&patch), json!({"name": "Jane", "city": null}));
}

// ── Raw scalars ───────────────────────────────────────────────────────────

#[test]
fn scalar_merge() {
    assert_eq!(*merge(&1i64, &2i64).unwrap(), 2);
    assert!(!*merge(&true, "false").unwrap());
    assert_eq!(*merge(&1.5f64, "2.25").unwrap(), 2.25);
    assert_eq!(*merge(&Some(5i64), "null").unwrap(), None);
    assert_eq!(*merge(&5usize, "7").unwrap(), 7);
    assert_eq!(*merge(&-5isize, &-6isize).unwrap(), -6);
}

#[test]
fn scalar_cannot_hold_object_result() {
    let err = merge(&5i64, r#"{"a":1}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert_eq!(err.to_string(), "result document: expected i64, found object");
}

#[test]
fn non_finite_target_is_encode_error() {
    let err = merge(&f64::NAN, &1.0f64).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encode);
    assert_eq!(err.role(), Some(Role::Target));
}

// ── Many patches ──────────────────────────────────────────────────────────

#[test]
fn merge_many_applies_in_order() {
    let target = json!({"a": 1, "b": {"c": 2}});
    let patches = [
        json!({"a": 2}),
        json!({"b": {"c": null, "d": 4}}),
        json!({"a": null, "e": [5]}),
    ];

    let merged = merge_many(&target, &patches).unwrap();
    assert_eq!(*merged, json!({"b": {"d": 4}, "e": [5]}));
    assert_eq!(target, json!({"a": 1, "b": {"c": 2}}));
}

#[test]
fn merge_many_fails_on_any_bad_patch() {
    let target = br#"{"a":1}"#.to_vec();
    let patches = [br#"{"a":2}"#.to_vec(), b"{oops".to_vec()];
    let err = merge_many(&target, &patches).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.role(), Some(Role::Patch));
}

// ── Validity ──────────────────────────────────────────────────────────────

#[test]
fn any_json_value_is_a_valid_patch() {
    assert!(valid(&object(json!({"name": "Jane"}))));
    assert!(valid(r#"{"name": "Jane"}"#));
    assert!(valid(br#"{"name": "Jane"}"#.as_slice()));
    assert!(valid(&json!(null)));
    assert!(valid(&()));
    assert!(valid("string value"));
    assert!(valid(&123i32));
    assert!(valid(&true));
}

#[test]
fn only_unconvertible_documents_are_invalid() {
    assert!(!valid(br#"{"name": invalid}"#.as_slice()));
    assert!(!valid(&f64::INFINITY));
}
