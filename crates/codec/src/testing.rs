//! In-memory entity store for tests
//!
//! Keeps entities in a `BTreeMap` behind a `parking_lot::RwLock` and
//! allocates integer ids sequentially from 1. It validates keys and limits
//! like a real backend would, and exposes the raw property lists so tests can
//! check exactly what a record was flattened into.
//!
//! Only indexed properties are visible to [`MemoryStore::count_where`],
//! matching what an index-backed query would see.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use strata_core::{EntityStore, Error, Key, Limits, PropertyList, PropertyValue, Result};

/// Thread-safe in-memory [`EntityStore`]
#[derive(Debug)]
pub struct MemoryStore {
    entities: RwLock<BTreeMap<Key, PropertyList>>,
    next_id: AtomicI64,
    limits: Limits,
}

impl MemoryStore {
    /// Empty store with default limits
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Empty store enforcing `limits` on writes
    pub fn with_limits(limits: Limits) -> Self {
        MemoryStore {
            entities: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            limits,
        }
    }

    /// Raw property list stored under `key`
    pub fn properties(&self, key: &Key) -> Option<PropertyList> {
        self.entities.read().get(key).cloned()
    }

    /// Names of the indexed properties stored under `key`, in stored order
    pub fn indexed_names(&self, key: &Key) -> Option<Vec<String>> {
        self.entities.read().get(key).map(|props| {
            props
                .iter()
                .filter(|p| p.indexed)
                .map(|p| p.name.clone())
                .collect()
        })
    }

    /// Number of `kind` entities with an indexed `name` entry equal to `value`
    pub fn count_where(&self, kind: &str, name: &str, value: &PropertyValue) -> usize {
        self.entities
            .read()
            .iter()
            .filter(|(key, _)| key.kind() == kind)
            .filter(|(_, props)| {
                props
                    .iter()
                    .any(|p| p.indexed && p.name == name && &p.value == value)
            })
            .count()
    }

    /// Keys of all stored `kind` entities, in key order
    pub fn keys_of_kind(&self, kind: &str) -> Vec<Key> {
        self.entities
            .read()
            .keys()
            .filter(|key| key.kind() == kind)
            .cloned()
            .collect()
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn require_complete(key: &Key) -> Result<()> {
    key.validate().map_err(|source| Error::InvalidKey {
        key: key.clone(),
        source,
    })?;
    if key.is_incomplete() {
        return Err(Error::IncompleteKey(key.clone()));
    }
    Ok(())
}

impl EntityStore for MemoryStore {
    fn put(&self, key: &Key, properties: PropertyList) -> Result<Key> {
        key.validate().map_err(|source| Error::InvalidKey {
            key: key.clone(),
            source,
        })?;
        self.limits
            .validate_entity(&properties)
            .map_err(|source| Error::LimitExceeded {
                key: key.clone(),
                source,
            })?;

        let key = if key.is_incomplete() {
            key.completed(self.next_id.fetch_add(1, Ordering::Relaxed))
        } else {
            key.clone()
        };
        self.entities.write().insert(key.clone(), properties);
        Ok(key)
    }

    fn get(&self, key: &Key) -> Result<Option<PropertyList>> {
        require_complete(key)?;
        Ok(self.properties(key))
    }

    fn delete(&self, key: &Key) -> Result<bool> {
        require_complete(key)?;
        Ok(self.entities.write().remove(key).is_some())
    }
}
