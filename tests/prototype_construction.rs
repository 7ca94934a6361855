//! Prototype factory tests.
//!
//! Exercises the one-call path: declare an interface as data, wrap it in a
//! `Prototype`, and construct ready-initialized objects with an optional
//! post-construction hook.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use propspec::prototype::Prototype;
use propspec::schema::SchemaError;
use propspec::store::{GetSet, SetError, StoreError};
use propspec::value::Value;

fn person_prototype() -> Prototype {
    Prototype::from_decl(&json!({
        "name": {"type": "string", "required": true},
        "age": {"type": "integer", "required": true},
        "species": {"type": "string", "default": "Human"}
    }))
    .expect("person declaration is well-formed")
}

// =============================================================================
// Registration
// =============================================================================

/// A spec record carrying a key outside the recognized set fails
/// registration, not construction.
#[test]
fn test_unrecognized_spec_key_fails_registration() {
    let err = Prototype::from_decl(&json!({"foo": {"bar": "baz"}})).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnrecognizedSpecKey {
            prop: "foo".into(),
            key: "bar".into()
        }
    );
}

/// A tag outside the recognized set fails registration.
#[test]
fn test_unknown_type_tag_fails_registration() {
    let err = Prototype::from_decl(&json!({"foo": {"type": "nonexistent-tag"}})).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnknownTypeTag {
            prop: "foo".into(),
            tag: "nonexistent-tag".into()
        }
    );
}

/// A non-boolean `required` flag fails registration.
#[test]
fn test_required_flag_must_be_boolean() {
    let err = Prototype::from_decl(&json!({
        "foo": {"type": "string", "required": "baz"}
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::RequiredNotBoolean { .. }));
}

// =============================================================================
// Construction
// =============================================================================

/// The documented scenario: construct, read back config values and the
/// resolved default.
#[test]
fn test_construct_reads_back() {
    let person = person_prototype()
        .construct_from_json(&json!({"name": "Scotty", "age": 26}))
        .unwrap();

    assert_eq!(person.get("name"), Some(&Value::from("Scotty")));
    assert_eq!(person.get("age"), Some(&Value::Int(26)));
    assert_eq!(person.get("species"), Some(&Value::from("Human")));
}

/// Construction fails when a config value has the wrong kind.
#[test]
fn test_construct_rejects_bad_config() {
    let err = person_prototype()
        .construct_from_json(&json!({"name": "Scotty", "age": "foo"}))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Set(SetError::TypeMismatch { .. })
    ));
}

/// Construction fails when a required property is missing.
#[test]
fn test_construct_rejects_missing_required() {
    let err = person_prototype()
        .construct_from_json(&json!({"name": "Scotty"}))
        .unwrap_err();
    assert_eq!(err, StoreError::RequiredFieldMissing("age".into()));
}

/// A non-object config is rejected before any write happens.
#[test]
fn test_construct_rejects_non_mapping_config() {
    let err = person_prototype()
        .construct_from_json(&json!(42))
        .unwrap_err();
    assert_eq!(err, StoreError::ConfigNotAMapping("int".into()));
}

/// Objects built by a prototype keep the full mixin surface.
#[test]
fn test_constructed_objects_support_set_and_snapshot() {
    let mut person = person_prototype()
        .construct_from_json(&json!({"name": "Scotty", "age": 26}))
        .unwrap();

    person.set("species", "Alligator").unwrap();
    let snapshot = person.plainify();
    assert_eq!(snapshot["species"], Value::from("Alligator"));
    assert_eq!(snapshot.len(), 3);
}

// =============================================================================
// Post-construction hook
// =============================================================================

/// The hook runs exactly once per construction, after initialization.
#[test]
fn test_hook_runs_once_per_construction() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let prototype = person_prototype().on_construct(move |object| {
        seen.fetch_add(1, Ordering::SeqCst);
        assert!(object.get("name").is_some());
        Ok(())
    });

    prototype
        .construct_from_json(&json!({"name": "Scotty", "age": 26}))
        .unwrap();
    prototype
        .construct_from_json(&json!({"name": "Uhura", "age": 29}))
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// Hook writes go through validation; an invalid hook write aborts
/// construction.
#[test]
fn test_hook_write_failure_aborts_construction() {
    let prototype = person_prototype()
        .on_construct(|object| object.set("species", 7).map_err(StoreError::from));

    let result = prototype.construct_from_json(&json!({"name": "Scotty", "age": 26}));
    assert!(matches!(
        result.unwrap_err(),
        StoreError::Set(SetError::TypeMismatch { .. })
    ));
}

/// A failed initialization never reaches the hook.
#[test]
fn test_failed_initialization_skips_hook() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let prototype = person_prototype().on_construct(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(prototype
        .construct_from_json(&json!({"name": "Scotty"}))
        .is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
