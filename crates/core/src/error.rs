//! Error types for the entity store boundary
//!
//! Stores report failures through this type. We use `thiserror` for
//! automatic `Display` and `Error` trait implementations.

use crate::key::{Key, KeyError};
use crate::limits::LimitError;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by entity stores
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// No entity stored under the key
    #[error("Entity not found: {0}")]
    KeyNotFound(Key),

    /// Key failed validation
    #[error("Invalid key {key}: {source}")]
    InvalidKey {
        /// Offending key
        key: Key,
        /// Validation failure
        #[source]
        source: KeyError,
    },

    /// Operation needs a complete key
    #[error("Key {0} is incomplete")]
    IncompleteKey(Key),

    /// Entity violates a size limit
    #[error("Entity {key} rejected: {source}")]
    LimitExceeded {
        /// Key of the rejected entity
        key: Key,
        /// Violated limit
        #[source]
        source: LimitError,
    },

    /// Backend failure
    #[error("Storage error: {0}")]
    StorageError(String),
}
