//! propspec - a strict, schema-enforced property store
//!
//! Typed, validated property storage for host types: declare an interface
//! once, share it, and every write is checked against it, on construction
//! and on every later mutation.

pub mod prototype;
pub mod schema;
pub mod store;
pub mod value;
