//! Entity store abstraction
//!
//! The codec never talks to a backend directly. Anything that can persist a
//! property list under a key implements [`EntityStore`]; transports, retries
//! and transactions live behind it.

use crate::error::Result;
use crate::key::Key;
use crate::property::PropertyList;

/// Storage seam for entities
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait EntityStore: Send + Sync {
    /// Store `properties` under `key`
    ///
    /// Returns the stored key. For an incomplete key the store allocates an
    /// id and returns the completed key; a complete key is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    fn put(&self, key: &Key, properties: PropertyList) -> Result<Key>;

    /// Load the properties stored under `key`
    ///
    /// Returns `None` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is incomplete or the read fails.
    fn get(&self, key: &Key) -> Result<Option<PropertyList>>;

    /// Remove the entity stored under `key`
    ///
    /// Returns true if an entity was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is incomplete or the delete fails.
    fn delete(&self, key: &Key) -> Result<bool>;
}
