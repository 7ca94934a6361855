//! Property store errors.

use thiserror::Error;

/// Result type for store lifecycle operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A rejected write.
///
/// A failed `set` never changes the property map.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetError {
    /// The store has no property map yet; `initialize` must succeed first
    #[error("property store is not initialized")]
    NotInitialized,

    /// The interface does not declare the property
    #[error("unknown property '{0}'")]
    UndeclaredProperty(String),

    /// The value failed the tag predicate
    #[error("property '{prop}': expected {expected}, got {actual}")]
    TypeMismatch {
        prop: String,
        expected: String,
        actual: String,
    },

    /// The value failed the custom validator
    #[error("property '{0}': value rejected by validator")]
    ValidatorRejected(String),
}

/// Instance lifecycle failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// `initialize` was called on an already-initialized store
    #[error("property store is already initialized")]
    AlreadyInitialized,

    /// A required property is still absent after config and defaults
    #[error("required property '{0}' was never set")]
    RequiredFieldMissing(String),

    /// A JSON config was not a key-value mapping
    #[error("config must be a key-value mapping, got {0}")]
    ConfigNotAMapping(String),

    /// A write was rejected during initialization or afterwards
    #[error(transparent)]
    Set(#[from] SetError),
}
