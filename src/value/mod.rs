//! Dynamic property values.
//!
//! Properties hold dynamically typed values constrained per-key by the
//! owning interface. [`Value`] is the closed set of kinds a property can
//! hold; [`Pattern`] wraps a compiled regular expression so regexp values
//! stay comparable.

mod convert;
mod pattern;

pub(crate) use convert::json_kind;
pub use pattern::Pattern;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// A dynamically typed property value.
///
/// Cloning is structural: cloning an `Array` or `Map` clones every element,
/// so two clones never share mutable state.
///
/// `Float` may hold NaN; as usual, a NaN value compares unequal to itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Raw binary buffer.
    Bytes(Vec<u8>),
    /// UTC timestamp.
    Date(DateTime<Utc>),
    /// Compiled regular expression.
    Regexp(Pattern),
    /// Heterogeneous list of values.
    Array(Vec<Value>),
    /// Plain key-value object.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::Regexp(_) => "regexp",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Builds a binary buffer value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Compiles `pattern` into a regexp value.
    pub fn regexp(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Value::Regexp(Pattern::new(pattern)?))
    }

    /// Returns true if this is the explicit null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_regexp(&self) -> Option<&Pattern> {
        match self {
            Value::Regexp(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}
