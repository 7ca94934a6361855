//! Property store runtime.
//!
//! [`PropertyStore`] is the embeddable component: a shared interface plus
//! one instance's property map, with every write funneled through the
//! validated [`PropertyStore::set`] path. [`GetSet`] is the behavior
//! bundle consuming types pick up by exposing their store.
//!
//! Enforcement rules:
//!
//! - Validation happens on every write, regardless of call path
//! - A rejected write leaves the map untouched
//! - A failed initialization tears the map back down; no instance is ever
//!   half-populated and usable

mod errors;

pub use errors::{SetError, StoreError, StoreResult};

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::schema::Interface;
use crate::value::Value;

/// Typed, validated property storage for one instance.
///
/// The interface is shared read-only by every store of a consuming type;
/// the property map is exclusively owned by this store. The store starts
/// uninitialized and holds no map until [`PropertyStore::initialize`]
/// succeeds.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    interface: Arc<Interface>,
    props: Option<BTreeMap<String, Value>>,
}

impl PropertyStore {
    /// Creates an uninitialized store bound to a shared interface.
    pub fn new(interface: Arc<Interface>) -> Self {
        Self {
            interface,
            props: None,
        }
    }

    /// Returns the shared interface.
    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    /// Whether `initialize` has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.props.is_some()
    }

    /// Populates the store from an initial config.
    ///
    /// Config entries are applied through [`PropertyStore::set`] in the
    /// iterator's own order. Declared defaults then fill any still-unset
    /// properties in declaration order, each applied as a structural clone
    /// through the same `set` path. Finally every `required` property must
    /// hold a value.
    ///
    /// On any failure the store reverts to the uninitialized state and the
    /// error is returned; a later `initialize` may retry.
    pub fn initialize<I>(&mut self, config: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if self.props.is_some() {
            return Err(StoreError::AlreadyInitialized);
        }
        self.props = Some(BTreeMap::new());

        if let Err(err) = self.apply_initial(config) {
            self.props = None;
            return Err(err);
        }
        Ok(())
    }

    fn apply_initial<I>(&mut self, config: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (prop, value) in config {
            self.set(&prop, value)?;
        }

        // Defaults are cloned on application so instances never alias the
        // interface's stored value.
        let interface = Arc::clone(&self.interface);
        for (prop, spec) in interface.properties() {
            if self.contains(prop) {
                continue;
            }
            if let Some(default) = spec.default() {
                self.set(prop, default.clone())?;
            }
        }

        for (prop, spec) in interface.properties() {
            if spec.is_required() && !self.contains(prop) {
                return Err(StoreError::RequiredFieldMissing(prop.into()));
            }
        }

        Ok(())
    }

    /// Validates and stores one property value.
    ///
    /// The single choke point: initialization, default application, and
    /// all later mutation come through here. Checks run in order (property
    /// declared, then tag predicate, then custom validator) and the value
    /// is stored only if every check passes.
    pub fn set(&mut self, prop: &str, value: impl Into<Value>) -> Result<(), SetError> {
        let value = value.into();

        let props = self.props.as_mut().ok_or(SetError::NotInitialized)?;

        let spec = self
            .interface
            .spec(prop)
            .ok_or_else(|| SetError::UndeclaredProperty(prop.into()))?;

        if !spec.type_tag().matches(&value) {
            return Err(SetError::TypeMismatch {
                prop: prop.into(),
                expected: spec.type_tag().name().into(),
                actual: value.kind().into(),
            });
        }

        if !spec.validator_passes(&value) {
            return Err(SetError::ValidatorRejected(prop.into()));
        }

        props.insert(prop.into(), value);
        Ok(())
    }

    /// Reads a property value.
    ///
    /// `None` is the absent sentinel: undeclared property, never-set
    /// property, or uninitialized store. Reads never validate and never
    /// fail.
    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.props.as_ref().and_then(|props| props.get(prop))
    }

    /// Whether a property currently holds a value
    pub fn contains(&self, prop: &str) -> bool {
        self.get(prop).is_some()
    }

    /// Exports the current contents as an owned flat snapshot.
    ///
    /// The snapshot holds exactly the keys that have been set; mutating it
    /// never affects the store.
    pub fn plainify(&self) -> BTreeMap<String, Value> {
        self.props.clone().unwrap_or_default()
    }

    /// Number of properties currently set
    pub fn len(&self) -> usize {
        self.props.as_ref().map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Behavior bundle for types embedding a [`PropertyStore`].
///
/// Implementors expose their store through the two accessors and pick up
/// the full get/set contract as provided methods.
pub trait GetSet {
    fn property_store(&self) -> &PropertyStore;

    fn property_store_mut(&mut self) -> &mut PropertyStore;

    /// See [`PropertyStore::initialize`].
    fn initialize<I>(&mut self, config: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = (String, Value)>,
        Self: Sized,
    {
        self.property_store_mut().initialize(config)
    }

    /// See [`PropertyStore::set`].
    fn set(&mut self, prop: &str, value: impl Into<Value>) -> Result<(), SetError>
    where
        Self: Sized,
    {
        self.property_store_mut().set(prop, value)
    }

    /// See [`PropertyStore::get`].
    fn get(&self, prop: &str) -> Option<&Value> {
        self.property_store().get(prop)
    }

    /// See [`PropertyStore::plainify`].
    fn plainify(&self) -> BTreeMap<String, Value> {
        self.property_store().plainify()
    }
}
