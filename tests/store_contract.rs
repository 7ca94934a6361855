//! Property store contract tests.
//!
//! Exercises the component path end-to-end: a consuming type embeds a
//! `PropertyStore`, shares one interface across all its instances, and
//! picks up the get/set contract through the `GetSet` trait.

use std::sync::{Arc, OnceLock};

use serde_json::json;

use propspec::schema::{Interface, PropertySpec, TypeTag};
use propspec::store::{GetSet, PropertyStore, SetError, StoreError};
use propspec::value::Value;

/// The consuming type: one shared interface, one store per instance.
#[derive(Debug)]
struct Person {
    props: PropertyStore,
}

impl Person {
    fn interface() -> Arc<Interface> {
        static INTERFACE: OnceLock<Arc<Interface>> = OnceLock::new();
        INTERFACE
            .get_or_init(|| {
                Arc::new(
                    Interface::builder()
                        .property("name", PropertySpec::required(TypeTag::String))
                        .property("age", PropertySpec::required(TypeTag::Integer))
                        .property(
                            "species",
                            PropertySpec::new(TypeTag::String).with_default("Human"),
                        )
                        .build()
                        .expect("person interface is well-formed"),
                )
            })
            .clone()
    }

    fn new(config: Vec<(String, Value)>) -> Result<Self, StoreError> {
        let mut person = Person {
            props: PropertyStore::new(Self::interface()),
        };
        person.initialize(config)?;
        Ok(person)
    }
}

impl GetSet for Person {
    fn property_store(&self) -> &PropertyStore {
        &self.props
    }

    fn property_store_mut(&mut self) -> &mut PropertyStore {
        &mut self.props
    }
}

fn config(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
    pairs
        .iter()
        .map(|(prop, value)| (prop.to_string(), value.clone()))
        .collect()
}

fn scotty() -> Vec<(String, Value)> {
    config(&[("name", Value::from("Scotty")), ("age", Value::from(26))])
}

// =============================================================================
// Construction
// =============================================================================

/// Config values land verbatim and the declared default fills the gap.
#[test]
fn test_construction_applies_config_and_default() {
    let person = Person::new(scotty()).unwrap();

    assert_eq!(person.get("name"), Some(&Value::from("Scotty")));
    assert_eq!(person.get("age"), Some(&Value::Int(26)));
    assert_eq!(person.get("species"), Some(&Value::from("Human")));
}

/// A config value of the wrong kind fails construction.
#[test]
fn test_construction_rejects_wrong_type() {
    let result = Person::new(config(&[
        ("name", Value::from("Scotty")),
        ("age", Value::from("foo")),
    ]));

    assert!(matches!(
        result.unwrap_err(),
        StoreError::Set(SetError::TypeMismatch { .. })
    ));
}

/// A required property with no config value and no default fails
/// construction.
#[test]
fn test_construction_rejects_missing_required() {
    let result = Person::new(config(&[("name", Value::from("Scotty"))]));
    assert_eq!(
        result.unwrap_err(),
        StoreError::RequiredFieldMissing("age".into())
    );
}

/// An empty config fails on the first missing required property.
#[test]
fn test_construction_rejects_empty_config() {
    assert!(Person::new(Vec::new()).is_err());
}

// =============================================================================
// Reads and writes
// =============================================================================

/// Repeated reads without an intervening write return the same value.
#[test]
fn test_get_is_idempotent() {
    let person = Person::new(scotty()).unwrap();
    assert_eq!(person.get("age"), person.get("age"));
}

/// Reads of unknown or unset properties return the absent sentinel.
#[test]
fn test_get_absent_is_none() {
    let person = Person::new(scotty()).unwrap();
    assert_eq!(person.get("height"), None);
}

/// A validated overwrite shows up in the snapshot next to untouched
/// properties.
#[test]
fn test_set_then_snapshot() {
    let mut person = Person::new(scotty()).unwrap();
    person.set("species", "Alligator").unwrap();

    let snapshot = person.plainify();
    assert_eq!(snapshot["species"], Value::from("Alligator"));
    assert_eq!(snapshot["name"], Value::from("Scotty"));
    assert_eq!(snapshot["age"], Value::Int(26));
}

/// A rejected write leaves the property map unchanged, verified via
/// snapshots taken before and after.
#[test]
fn test_rejected_set_leaves_map_unchanged() {
    let mut person = Person::new(scotty()).unwrap();
    let before = person.plainify();

    assert!(person.set("height", 180).is_err());
    assert!(person.set("name", 26).is_err());

    assert_eq!(person.plainify(), before);
}

// =============================================================================
// Shared interface, independent instances
// =============================================================================

/// Every instance shares the type's interface but owns its values.
#[test]
fn test_instances_are_independent() {
    let mut first = Person::new(scotty()).unwrap();
    let second = Person::new(config(&[
        ("name", Value::from("Uhura")),
        ("age", Value::from(29)),
    ]))
    .unwrap();

    first.set("species", "Alligator").unwrap();

    assert_eq!(first.get("species"), Some(&Value::from("Alligator")));
    assert_eq!(second.get("species"), Some(&Value::from("Human")));
}

/// Resolved defaults are copies; the interface's stored default survives
/// any instance's mutation.
#[test]
fn test_default_copying_preserves_the_stored_default() {
    let mut person = Person::new(scotty()).unwrap();
    person.set("species", "Alligator").unwrap();

    let stored = Person::interface()
        .spec("species")
        .unwrap()
        .default()
        .cloned();
    assert_eq!(stored, Some(Value::from("Human")));

    let fresh = Person::new(scotty()).unwrap();
    assert_eq!(fresh.get("species"), Some(&Value::from("Human")));
}

// =============================================================================
// Snapshot export
// =============================================================================

/// Snapshots serialize to flat JSON objects.
#[test]
fn test_snapshot_serializes_to_json() {
    let person = Person::new(scotty()).unwrap();
    let exported = serde_json::to_value(person.plainify()).unwrap();

    assert_eq!(
        exported,
        json!({"name": "Scotty", "age": 26, "species": "Human"})
    );
}
