//! Interface declaration errors.
//!
//! Every malformed declaration is rejected at registration time; nothing
//! is deferred to first use.

use thiserror::Error;

/// Result type for interface registration
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while registering an interface declaration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Declaration root was not a key-value mapping
    #[error("interface declaration must be a mapping of property specs, got {0}")]
    NotAMapping(String),

    /// A property's spec record was not a key-value mapping
    #[error("property '{prop}': spec must be a key-value mapping, got {kind}")]
    SpecNotAMapping { prop: String, kind: String },

    /// A spec record carried no `type` key
    #[error("property '{0}': spec is missing the 'type' key")]
    MissingTypeTag(String),

    /// The `type` key held something other than a tag name
    #[error("property '{prop}': 'type' must be a string, got {kind}")]
    TypeNotAString { prop: String, kind: String },

    /// The `type` key named a tag outside the recognized set
    #[error("property '{prop}': unknown type tag '{tag}'")]
    UnknownTypeTag { prop: String, tag: String },

    /// The `required` key held a non-boolean
    #[error("property '{prop}': 'required' must be a boolean, got {kind}")]
    RequiredNotBoolean { prop: String, kind: String },

    /// A data declaration carried a `validate` key; predicates are code
    #[error(
        "property '{0}': 'validate' must be a callable predicate and cannot be supplied as data"
    )]
    ValidatorNotCallable(String),

    /// A spec record carried a key outside {type, required, validate, default}
    #[error("property '{prop}': unrecognized spec key '{key}'")]
    UnrecognizedSpecKey { prop: String, key: String },

    /// A validator was attached to a property the interface does not declare
    #[error("property '{0}' is not declared in the interface")]
    UndeclaredProperty(String),
}

impl SchemaError {
    /// Returns the property the error concerns, if any.
    pub fn property(&self) -> Option<&str> {
        match self {
            SchemaError::NotAMapping(_) => None,
            SchemaError::SpecNotAMapping { prop, .. }
            | SchemaError::TypeNotAString { prop, .. }
            | SchemaError::UnknownTypeTag { prop, .. }
            | SchemaError::RequiredNotBoolean { prop, .. }
            | SchemaError::UnrecognizedSpecKey { prop, .. } => Some(prop),
            SchemaError::MissingTypeTag(prop)
            | SchemaError::ValidatorNotCallable(prop)
            | SchemaError::UndeclaredProperty(prop) => Some(prop),
        }
    }
}
