//! Interface subsystem.
//!
//! An interface is the declared contract a property store enforces on
//! every write. Design rules:
//!
//! - Malformed declarations are rejected at registration, never at use
//! - The tag set is closed; an unknown tag never reaches a running store
//! - Interfaces are immutable once built and shared read-only

mod decl;
mod errors;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use types::{Interface, InterfaceBuilder, PropertySpec, TypeTag, Validator};
