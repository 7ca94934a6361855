//! Interface factory.
//!
//! [`Prototype`] bundles a compiled interface with an optional
//! post-construction hook and stamps out ready-initialized [`Object`]
//! instances: the one-call composition over the schema and store layers.
//! Every instance of one prototype shares the same interface table.

use std::fmt;
use std::sync::Arc;

use crate::schema::{Interface, SchemaResult};
use crate::store::{GetSet, PropertyStore, StoreError, StoreResult};
use crate::value::{json_kind, Value};

/// Post-construction callback, run exactly once per successful
/// construction. Writes it performs validate like any other; a failure
/// aborts the construction.
pub type ConstructHook = Arc<dyn Fn(&mut Object) -> StoreResult<()> + Send + Sync>;

/// A constructible type: shared interface plus optional hook.
#[derive(Clone)]
pub struct Prototype {
    interface: Arc<Interface>,
    on_construct: Option<ConstructHook>,
}

impl Prototype {
    /// Wraps a compiled interface.
    pub fn new(interface: Interface) -> Self {
        Self {
            interface: Arc::new(interface),
            on_construct: None,
        }
    }

    /// One-call data path: parse a declaration, wrap the interface.
    pub fn from_decl(decl: &serde_json::Value) -> SchemaResult<Self> {
        Ok(Self::new(Interface::from_decl(decl)?))
    }

    /// Installs the post-construction hook.
    pub fn on_construct(
        mut self,
        hook: impl Fn(&mut Object) -> StoreResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.on_construct = Some(Arc::new(hook));
        self
    }

    /// Returns the shared interface.
    pub fn interface(&self) -> &Arc<Interface> {
        &self.interface
    }

    /// Builds a new instance: initialize from `config`, then run the hook
    /// if one is installed. No partially constructed instance escapes; any
    /// failure returns the error instead of an object.
    pub fn construct<I>(&self, config: I) -> StoreResult<Object>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut object = Object {
            store: PropertyStore::new(Arc::clone(&self.interface)),
        };
        object.store.initialize(config)?;

        if let Some(hook) = &self.on_construct {
            hook(&mut object)?;
        }

        Ok(object)
    }

    /// Builds a new instance from a JSON object config.
    ///
    /// Entries are applied in the JSON map's iteration order.
    pub fn construct_from_json(&self, config: &serde_json::Value) -> StoreResult<Object> {
        let entries = config
            .as_object()
            .ok_or_else(|| StoreError::ConfigNotAMapping(json_kind(config).into()))?;

        self.construct(
            entries
                .iter()
                .map(|(prop, value)| (prop.clone(), Value::from(value))),
        )
    }
}

impl fmt::Debug for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("interface", &self.interface)
            .field("on_construct", &self.on_construct.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

/// An instance produced by a [`Prototype`].
#[derive(Debug, Clone)]
pub struct Object {
    store: PropertyStore,
}

impl GetSet for Object {
    fn property_store(&self) -> &PropertyStore {
        &self.store
    }

    fn property_store_mut(&mut self) -> &mut PropertyStore {
        &mut self.store
    }
}
