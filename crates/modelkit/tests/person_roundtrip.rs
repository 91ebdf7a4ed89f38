//! End-to-end behavior of the schema engine: construction, the validated
//! write path, map/text round trips, composite nesting, and inheritance,
//! exercised through the public API only.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use modelkit::{Field, ModelError, Schema, Value};
use serde_json::{json, Value as Json};

fn person() -> Arc<Schema> {
    Schema::builder("Person")
        .field("name", Field::string().required().show_in_debug())
        .field("age", Field::range(Some(0), Some(150)).expect("valid range"))
        .field("tags", Field::list_of(Field::string()))
        .build()
        .expect("valid schema")
}

fn as_map(json: Json) -> serde_json::Map<String, Json> {
    match json {
        Json::Object(map) => map,
        other => panic!("Expected object, got: {other}"),
    }
}

#[test]
fn test_person_construct_and_encode() {
    let schema = person();
    let ann = schema
        .construct([
            ("name", Value::from("Ann")),
            ("age", Value::from(30)),
            ("tags", Value::Array(vec![Value::from("x"), Value::from("y")])),
        ])
        .expect("valid person");

    let map = ann.to_map().expect("encodes");
    assert_eq!(
        Json::Object(map),
        json!({"name": "Ann", "age": 30, "tags": ["x", "y"]})
    );
}

#[test]
fn test_person_map_round_trip_preserves_values() {
    let schema = person();
    let ann = schema
        .construct([
            ("name", Value::from("Ann")),
            ("age", Value::from(30)),
            ("tags", Value::Array(vec![Value::from("x"), Value::from("y")])),
        ])
        .expect("valid person");

    let restored = schema
        .from_map(&ann.to_map().expect("encodes"), true)
        .expect("decodes");
    assert_eq!(ann, restored);
}

#[test]
fn test_person_text_round_trip() {
    let schema = person();
    let ann = schema
        .construct([("name", Value::from("Ann")), ("age", Value::from(30))])
        .expect("valid person");
    let text = ann.to_text().expect("serializes");
    let restored = schema.from_text(&text, true).expect("parses");
    assert_eq!(ann, restored);
    assert_eq!(restored.get("age"), Some(&Value::Integer(30)));
}

#[test]
fn test_missing_required_field_names_it() {
    let schema = person();
    let err = schema.from_map(&as_map(json!({"age": 30})), true).unwrap_err();
    match err {
        ModelError::RequiredField { path } => assert_eq!(path.as_str(), "Person.name"),
        other => panic!("Expected RequiredField, got: {other}"),
    }
}

#[test]
fn test_type_check_takes_precedence_over_validator() {
    let schema = person();
    // A supplied value of the wrong type is FieldType, not RequiredField
    // and not Validation — the range validator never runs.
    let err = schema
        .construct([("name", Value::from("Ann")), ("age", Value::from("thirty"))])
        .unwrap_err();
    match err {
        ModelError::FieldType { path, expected, .. } => {
            assert_eq!(path.as_str(), "Person.age");
            assert_eq!(expected, "number");
        }
        other => panic!("Expected FieldType, got: {other}"),
    }
}

#[test]
fn test_range_boundaries() {
    let schema = Schema::builder("A")
        .field("foo", Field::range(Some(18), Some(80)).expect("valid range"))
        .build()
        .expect("valid schema");

    for ok in [18, 80] {
        schema
            .construct([("foo", Value::from(ok))])
            .unwrap_or_else(|e| panic!("{ok} should be in range: {e}"));
    }
    for bad in [17, 81] {
        let err = schema.construct([("foo", Value::from(bad))]).unwrap_err();
        assert!(
            matches!(err, ModelError::Validation { .. }),
            "Expected Validation for {bad}, got: {err}"
        );
    }
}

#[test]
fn test_nested_list_error_path() {
    let schema = Schema::builder("A")
        .field(
            "foo",
            Field::list_of(Field::list_of(
                Field::range(Some(0), Some(9)).expect("valid range"),
            )),
        )
        .build()
        .expect("valid schema");

    let err = schema
        .construct([(
            "foo",
            Value::Array(vec![Value::Array(vec![Value::from(5), Value::from(15)])]),
        )])
        .unwrap_err();
    assert_eq!(err.path().map(|p| p.as_str()), Some("A.foo[0][1]"));
    assert!(matches!(err, ModelError::Validation { .. }));
}

#[test]
fn test_not_editable_rejects_any_second_write() {
    let schema = Schema::builder("A")
        .field("foo", Field::integer().not_editable())
        .build()
        .expect("valid schema");
    let mut a = schema
        .construct([("foo", Value::from(1))])
        .expect("first write lands");

    // Same value or different value, a second write always fails.
    for value in [1, 2] {
        assert!(matches!(
            a.set("foo", value),
            Err(ModelError::NotEditable { .. })
        ));
    }
}

#[test]
fn test_enum_round_trip_and_unknown() {
    let schema = Schema::builder("Palette")
        .field(
            "color",
            Field::enumeration("Color", &[("RED", 1), ("GREEN", 2), ("BLUE", 3)])
                .expect("valid enum"),
        )
        .build()
        .expect("valid schema");

    let p = schema
        .construct([("color", Value::from("RED"))])
        .expect("valid variant");
    let map = p.to_map().expect("encodes");
    assert_eq!(map["color"], json!("RED"));

    let restored = schema.from_map(&map, true).expect("decodes");
    assert_eq!(restored.get("color"), Some(&Value::from("RED")));

    let err = schema
        .from_map(&as_map(json!({"color": "PURPLE"})), true)
        .unwrap_err();
    assert!(matches!(err, ModelError::FieldType { .. }));
}

#[test]
fn test_counter_default_strictly_increases() {
    let counter = Arc::new(AtomicI64::new(0));
    let schema = Schema::builder("Event")
        .field(
            "seq",
            Field::integer()
                .default_fn(move || Value::Integer(counter.fetch_add(1, Ordering::SeqCst))),
        )
        .build()
        .expect("valid schema");

    let mut previous = -1;
    for _ in 0..5 {
        let event = schema.construct_default().expect("valid");
        let seq = event.get("seq").and_then(Value::as_i64).expect("defaulted");
        assert!(seq > previous, "Expected strictly increasing, got {seq} after {previous}");
        previous = seq;
    }
}

#[test]
fn test_inheritance_end_to_end() {
    let base = Schema::builder("Asset")
        .field("id", Field::string().required())
        .field("kind", Field::constant("asset"))
        .build()
        .expect("valid schema");

    let derived = Schema::builder("Document")
        .extends(&base)
        .field("kind", Field::constant("document"))
        .field("pages", Field::range(Some(1), None).expect("valid range"))
        .build()
        .expect("valid schema");

    let doc = derived
        .construct([("id", Value::from("d-1")), ("pages", Value::from(12))])
        .expect("valid document");
    let map = doc.to_map().expect("encodes");
    assert_eq!(
        Json::Object(map),
        json!({"id": "d-1", "kind": "document", "pages": 12})
    );

    // The base schema is unaffected by the derived override.
    let asset = base
        .construct([("id", Value::from("a-1"))])
        .expect("valid asset");
    assert_eq!(asset.get("kind"), Some(&Value::from("asset")));
}

#[test]
fn test_map_of_nested_records() {
    let point = Schema::builder("Point")
        .field("x", Field::integer().required())
        .field("y", Field::integer().required())
        .build()
        .expect("valid schema");
    let board = Schema::builder("Board")
        .field("markers", Field::map_of(Field::model(&point)))
        .build()
        .expect("valid schema");

    let map = as_map(json!({
        "markers": {"start": {"x": 0, "y": 0}, "end": {"x": 3, "y": 4}}
    }));
    let b = board.from_map(&map, true).expect("decodes");
    let encoded = b.to_map().expect("encodes");
    assert_eq!(
        Json::Object(encoded),
        json!({"markers": {"end": {"x": 3, "y": 4}, "start": {"x": 0, "y": 0}}})
    );

    let err = board
        .from_map(&as_map(json!({"markers": {"start": {"x": 0}}})), true)
        .unwrap_err();
    match err {
        ModelError::RequiredField { path } => assert_eq!(path.as_str(), "Point.y"),
        other => panic!("Expected RequiredField, got: {other}"),
    }
}

#[test]
fn test_datetime_field_wire_format() {
    let schema = Schema::builder("Log")
        .field("at", Field::datetime().required())
        .build()
        .expect("valid schema");

    let entry = schema
        .construct([("at", Value::from("2024-05-01T12:00:00Z"))])
        .expect("valid timestamp");
    let map = entry.to_map().expect("encodes");
    assert_eq!(map["at"], json!(1_714_564_800));

    let restored = schema.from_map(&map, true).expect("decodes");
    assert_eq!(restored.get("at"), Some(&Value::from("2024-05-01T12:00:00Z")));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn person_input() -> impl Strategy<Value = (String, i64, Vec<String>)> {
        (
            "[a-zA-Z ]{1,20}",
            0i64..=150,
            prop::collection::vec("[a-z]{1,8}", 0..5),
        )
    }

    proptest! {
        /// For every valid input set, decode(encode(construct(v)))
        /// reproduces the same observable field values.
        #[test]
        fn map_round_trip_is_identity((name, age, tags) in person_input()) {
            let schema = person();
            let original = schema
                .construct([
                    ("name", Value::from(name)),
                    ("age", Value::from(age)),
                    ("tags", Value::Array(
                        tags.into_iter().map(Value::from).collect(),
                    )),
                ])
                .expect("input is within every contract");
            let map = original.to_map().expect("encodes");
            let restored = schema.from_map(&map, true).expect("decodes");
            prop_assert_eq!(original, restored);
        }

        /// Text round trip agrees with the map round trip.
        #[test]
        fn text_round_trip_is_identity((name, age, tags) in person_input()) {
            let schema = person();
            let original = schema
                .construct([
                    ("name", Value::from(name)),
                    ("age", Value::from(age)),
                    ("tags", Value::Array(
                        tags.into_iter().map(Value::from).collect(),
                    )),
                ])
                .expect("input is within every contract");
            let text = original.to_text().expect("serializes");
            let restored = schema.from_text(&text, true).expect("parses");
            prop_assert_eq!(original, restored);
        }
    }
}
