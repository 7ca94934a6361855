//! Interface type definitions.
//!
//! An interface maps property names to specs; a spec names a type tag and
//! optionally a required flag, a custom validator, and a default value.
//! The tag set is closed: sixteen recognized names, each bound to a fixed
//! runtime predicate over [`Value`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::Value;

use super::decl;
use super::errors::{SchemaError, SchemaResult};

/// Custom validation predicate attached to a property spec.
///
/// Runs after the tag predicate has accepted the value.
pub type Validator = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Recognized property type tags.
///
/// Declarations referencing any other name are rejected at registration
/// time. Four tags (`dom-element`, `error`, `function`, `undefined`)
/// describe host-environment kinds with no constructor in [`Value`]; they
/// register fine but match no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeTag {
    /// Heterogeneous list
    Array,
    /// Raw binary buffer
    BinaryBuffer,
    /// Boolean
    Boolean,
    /// UTC timestamp
    Date,
    /// Host document element (no value constructor)
    DomElement,
    /// Host error object (no value constructor)
    Error,
    /// Callable (no value constructor)
    Function,
    /// 64-bit signed integer
    Integer,
    /// The float NaN
    NotANumber,
    /// Explicit null
    Null,
    /// Integer or float
    Number,
    /// Any structured value
    Object,
    /// Key-value map
    PlainObject,
    /// Compiled regular expression
    Regexp,
    /// UTF-8 string
    String,
    /// Host undefined (no value constructor)
    Undefined,
}

impl TypeTag {
    /// Every recognized tag, in name order.
    pub const ALL: [TypeTag; 16] = [
        TypeTag::Array,
        TypeTag::BinaryBuffer,
        TypeTag::Boolean,
        TypeTag::Date,
        TypeTag::DomElement,
        TypeTag::Error,
        TypeTag::Function,
        TypeTag::Integer,
        TypeTag::NotANumber,
        TypeTag::Null,
        TypeTag::Number,
        TypeTag::Object,
        TypeTag::PlainObject,
        TypeTag::Regexp,
        TypeTag::String,
        TypeTag::Undefined,
    ];

    /// Resolves a tag name, returning `None` outside the recognized set.
    pub fn parse(name: &str) -> Option<TypeTag> {
        match name {
            "array" => Some(TypeTag::Array),
            "binary-buffer" => Some(TypeTag::BinaryBuffer),
            "boolean" => Some(TypeTag::Boolean),
            "date" => Some(TypeTag::Date),
            "dom-element" => Some(TypeTag::DomElement),
            "error" => Some(TypeTag::Error),
            "function" => Some(TypeTag::Function),
            "integer" => Some(TypeTag::Integer),
            "not-a-number" => Some(TypeTag::NotANumber),
            "null" => Some(TypeTag::Null),
            "number" => Some(TypeTag::Number),
            "object" => Some(TypeTag::Object),
            "plain-object" => Some(TypeTag::PlainObject),
            "regexp" => Some(TypeTag::Regexp),
            "string" => Some(TypeTag::String),
            "undefined" => Some(TypeTag::Undefined),
            _ => None,
        }
    }

    /// Returns the tag name for declarations and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Array => "array",
            TypeTag::BinaryBuffer => "binary-buffer",
            TypeTag::Boolean => "boolean",
            TypeTag::Date => "date",
            TypeTag::DomElement => "dom-element",
            TypeTag::Error => "error",
            TypeTag::Function => "function",
            TypeTag::Integer => "integer",
            TypeTag::NotANumber => "not-a-number",
            TypeTag::Null => "null",
            TypeTag::Number => "number",
            TypeTag::Object => "object",
            TypeTag::PlainObject => "plain-object",
            TypeTag::Regexp => "regexp",
            TypeTag::String => "string",
            TypeTag::Undefined => "undefined",
        }
    }

    /// The fixed predicate table: whether `value` satisfies this tag.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            TypeTag::Array => matches!(value, Value::Array(_)),
            TypeTag::BinaryBuffer => matches!(value, Value::Bytes(_)),
            TypeTag::Boolean => matches!(value, Value::Bool(_)),
            TypeTag::Date => matches!(value, Value::Date(_)),
            TypeTag::Integer => matches!(value, Value::Int(_)),
            TypeTag::NotANumber => matches!(value, Value::Float(f) if f.is_nan()),
            TypeTag::Null => matches!(value, Value::Null),
            TypeTag::Number => matches!(value, Value::Int(_) | Value::Float(_)),
            TypeTag::Object => matches!(
                value,
                Value::Map(_)
                    | Value::Array(_)
                    | Value::Bytes(_)
                    | Value::Date(_)
                    | Value::Regexp(_)
            ),
            TypeTag::PlainObject => matches!(value, Value::Map(_)),
            TypeTag::Regexp => matches!(value, Value::Regexp(_)),
            TypeTag::String => matches!(value, Value::String(_)),
            // Host-environment kinds the value model cannot produce.
            TypeTag::DomElement | TypeTag::Error | TypeTag::Function | TypeTag::Undefined => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One property's validation rule set.
#[derive(Clone)]
pub struct PropertySpec {
    type_tag: TypeTag,
    required: bool,
    validate: Option<Validator>,
    default: Option<Value>,
}

impl PropertySpec {
    /// Creates an optional spec with no validator and no default.
    pub fn new(type_tag: TypeTag) -> Self {
        Self {
            type_tag,
            required: false,
            validate: None,
            default: None,
        }
    }

    /// Creates a required spec for the given tag
    pub fn required(type_tag: TypeTag) -> Self {
        Self::new(type_tag).with_required(true)
    }

    /// Creates an optional spec for the given tag
    pub fn optional(type_tag: TypeTag) -> Self {
        Self::new(type_tag)
    }

    /// Sets the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the default value, applied when initialization leaves the
    /// property unset. Defaults are cloned per instance on application.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Attaches a custom validation predicate.
    pub fn with_validator(
        mut self,
        validate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Arc::new(validate));
        self
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_validator(&self) -> bool {
        self.validate.is_some()
    }

    /// Runs the custom validator; vacuously true when none is attached.
    pub fn validator_passes(&self, value: &Value) -> bool {
        self.validate.as_ref().map_or(true, |validate| validate(value))
    }

    /// Full acceptance check: tag predicate, then custom validator.
    pub fn accepts(&self, value: &Value) -> bool {
        self.type_tag.matches(value) && self.validator_passes(value)
    }

    pub(super) fn attach_validator(&mut self, validate: Validator) {
        self.validate = Some(validate);
    }
}

impl fmt::Debug for PropertySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySpec")
            .field("type_tag", &self.type_tag)
            .field("required", &self.required)
            .field("validate", &self.validate.as_ref().map(|_| "<predicate>"))
            .field("default", &self.default)
            .finish()
    }
}

/// An immutable, ordered property-name → spec table.
///
/// Built once per consuming type and shared read-only behind an `Arc` by
/// every instance. Replacing a type's schema means building a new
/// `Interface`; there is no merging.
#[derive(Debug, Clone, Default)]
pub struct Interface {
    specs: Vec<(String, PropertySpec)>,
}

impl Interface {
    /// Starts the typed construction path.
    pub fn builder() -> InterfaceBuilder {
        InterfaceBuilder::new()
    }

    /// Data construction path: parses and validates a JSON declaration.
    ///
    /// Spec records recognize exactly the keys `type`, `required`,
    /// `validate`, and `default`; any violation is a [`SchemaError`].
    pub fn from_decl(decl: &serde_json::Value) -> SchemaResult<Self> {
        Ok(Self {
            specs: decl::parse(decl)?,
        })
    }

    /// Looks up the spec for a property.
    pub fn spec(&self, prop: &str) -> Option<&PropertySpec> {
        self.specs
            .iter()
            .find(|(name, _)| name == prop)
            .map(|(_, spec)| spec)
    }

    /// Whether the interface declares a property
    pub fn contains(&self, prop: &str) -> bool {
        self.spec(prop).is_some()
    }

    /// Iterates declared properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertySpec)> {
        self.specs.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of declared properties
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Builder for the typed construction path.
///
/// Validators reference properties by name and are resolved at `build()`;
/// a dangling reference surfaces there as
/// [`SchemaError::UndeclaredProperty`].
#[derive(Default)]
pub struct InterfaceBuilder {
    specs: Vec<(String, PropertySpec)>,
    validators: Vec<(String, Validator)>,
}

impl InterfaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder from a JSON declaration so validators can be
    /// attached to data-declared properties.
    pub fn from_decl(decl: &serde_json::Value) -> SchemaResult<Self> {
        Ok(Self {
            specs: decl::parse(decl)?,
            validators: Vec::new(),
        })
    }

    /// Declares a property. Redeclaring a name replaces its spec wholesale
    /// while keeping its original position.
    pub fn property(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        let name = name.into();
        match self.specs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = spec,
            None => self.specs.push((name, spec)),
        }
        self
    }

    /// Attaches a validator to a declared property.
    pub fn validator(
        mut self,
        name: impl Into<String>,
        validate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validators.push((name.into(), Arc::new(validate)));
        self
    }

    /// Resolves validators and yields the immutable interface.
    pub fn build(self) -> SchemaResult<Interface> {
        let Self {
            mut specs,
            validators,
        } = self;

        for (name, validate) in validators {
            match specs.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1.attach_validator(validate),
                None => return Err(SchemaError::UndeclaredProperty(name)),
            }
        }

        Ok(Interface { specs })
    }
}
