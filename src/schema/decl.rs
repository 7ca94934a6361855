//! Declaration parsing.
//!
//! Interfaces may be declared as data: a JSON object mapping property
//! names to spec records. A spec record recognizes exactly the keys
//! `type`, `required`, `validate`, and `default`. Everything is checked
//! here, at registration time; a parsed interface never fails at use time.
//!
//! `validate` is the one key data cannot satisfy (predicates are code);
//! declarations carrying it are rejected, and validators are attached
//! through [`InterfaceBuilder::validator`](super::InterfaceBuilder::validator)
//! instead.

use serde_json::Value as Json;

use crate::value::{json_kind, Value};

use super::errors::{SchemaError, SchemaResult};
use super::types::{PropertySpec, TypeTag};

/// Parses a full declaration into ordered (name, spec) pairs.
pub(super) fn parse(decl: &Json) -> SchemaResult<Vec<(String, PropertySpec)>> {
    let entries = decl
        .as_object()
        .ok_or_else(|| SchemaError::NotAMapping(json_kind(decl).into()))?;

    let mut specs = Vec::with_capacity(entries.len());
    for (prop, record) in entries {
        specs.push((prop.clone(), parse_spec(prop, record)?));
    }
    Ok(specs)
}

/// Parses one property's spec record.
fn parse_spec(prop: &str, record: &Json) -> SchemaResult<PropertySpec> {
    let fields = record.as_object().ok_or_else(|| SchemaError::SpecNotAMapping {
        prop: prop.into(),
        kind: json_kind(record).into(),
    })?;

    let mut type_tag = None;
    let mut required = false;
    let mut default = None;

    for (key, value) in fields {
        match key.as_str() {
            "type" => {
                let name = value.as_str().ok_or_else(|| SchemaError::TypeNotAString {
                    prop: prop.into(),
                    kind: json_kind(value).into(),
                })?;
                let tag = TypeTag::parse(name).ok_or_else(|| SchemaError::UnknownTypeTag {
                    prop: prop.into(),
                    tag: name.into(),
                })?;
                type_tag = Some(tag);
            }
            "required" => {
                required = value.as_bool().ok_or_else(|| SchemaError::RequiredNotBoolean {
                    prop: prop.into(),
                    kind: json_kind(value).into(),
                })?;
            }
            "validate" => return Err(SchemaError::ValidatorNotCallable(prop.into())),
            "default" => default = Some(Value::from(value)),
            other => {
                return Err(SchemaError::UnrecognizedSpecKey {
                    prop: prop.into(),
                    key: other.into(),
                })
            }
        }
    }

    let type_tag = type_tag.ok_or_else(|| SchemaError::MissingTypeTag(prop.into()))?;

    let mut spec = PropertySpec::new(type_tag).with_required(required);
    if let Some(default) = default {
        spec = spec.with_default(default);
    }
    Ok(spec)
}
