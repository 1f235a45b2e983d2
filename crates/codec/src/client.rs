//! Record-level client over an entity store
//!
//! `Client` is the boundary callers use: it looks up the record type's plan,
//! encodes or decodes, and talks to the [`EntityStore`]. The store never sees
//! record types; the codec never sees the transport.
//!
//! Keys passed in are never modified. Writing under an incomplete key returns
//! the completed key assigned by the store, and a record that tracks its own
//! identity gets that key in its identity slot unless it already holds a
//! complete one.

use std::sync::Arc;
use strata_core::{EntityStore, Error, Key};
use tracing::debug;

use crate::cache::{self, PlanCache};
use crate::config::{CodecConfig, DecodeOptions};
use crate::decode::decode;
use crate::encode::encode;
use crate::error::{CodecError, CodecResult};
use crate::shape::Record;

/// Typed access to an entity store
#[derive(Debug)]
pub struct Client<S> {
    store: S,
    plans: Arc<PlanCache>,
    options: DecodeOptions,
}

impl<S: EntityStore> Client<S> {
    /// Client using the process-wide plan cache and strict decoding
    pub fn new(store: S) -> Self {
        Client {
            store,
            plans: cache::shared(),
            options: DecodeOptions::strict(),
        }
    }

    /// Client with its own plan cache built from `config`
    pub fn with_config(store: S, config: &CodecConfig) -> Self {
        Client {
            store,
            plans: Arc::new(PlanCache::with_limits(config.limits())),
            options: config.decode_options(),
        }
    }

    /// Client sharing an existing plan cache
    pub fn with_plans(store: S, plans: Arc<PlanCache>, options: DecodeOptions) -> Self {
        Client {
            store,
            plans,
            options,
        }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Plan cache used by this client
    pub fn plans(&self) -> &PlanCache {
        &self.plans
    }

    /// Decode policy applied by [`get`](Self::get)
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Encode `record` and store it under `key`
    ///
    /// Returns the stored key, completed by the store if `key` was
    /// incomplete.
    ///
    /// # Errors
    ///
    /// Fails before anything reaches the store if the record type has no
    /// valid plan; store failures are passed through.
    pub fn put<R: Record>(&self, key: &Key, record: &mut R) -> CodecResult<Key> {
        let plan = self.plans.plan_for::<R>()?;
        let properties = encode(record, &plan)?;
        let stored = self.store.put(key, properties)?;

        if let Some(slot) = record.identity_mut() {
            if slot.as_ref().map_or(true, Key::is_incomplete) {
                debug!(shape = plan.shape_name(), key = %stored, "Assigned key to record");
                *slot = Some(stored.clone());
            }
        }
        Ok(stored)
    }

    /// Store several records, pairing `keys[i]` with `records[i]`
    ///
    /// # Errors
    ///
    /// [`CodecError::LengthMismatch`] if the slices differ in length;
    /// otherwise the first failing write. Earlier writes are not undone.
    pub fn put_multi<R: Record>(&self, keys: &[Key], records: &mut [R]) -> CodecResult<Vec<Key>> {
        check_lengths(keys.len(), records.len())?;
        keys.iter()
            .zip(records.iter_mut())
            .map(|(key, record)| self.put(key, record))
            .collect()
    }

    /// Load the entity under `key` into a fresh record
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] (wrapped in [`CodecError::Store`]) if nothing is
    /// stored under `key`, or a decode error under the client's policy.
    pub fn get<R: Record + Default>(&self, key: &Key) -> CodecResult<R> {
        let mut record = R::default();
        self.get_into(key, &mut record)?;
        Ok(record)
    }

    /// Load the entity under `key` into an existing record
    pub fn get_into<R: Record>(&self, key: &Key, record: &mut R) -> CodecResult<()> {
        let options = self.options;
        self.get_with(key, record, &options)
    }

    /// Load with an explicit decode policy
    pub fn get_with<R: Record>(
        &self,
        key: &Key,
        record: &mut R,
        options: &DecodeOptions,
    ) -> CodecResult<()> {
        let plan = self.plans.plan_for::<R>()?;
        let properties = self
            .store
            .get(key)?
            .ok_or_else(|| Error::KeyNotFound(key.clone()))?;
        decode(&properties, &plan, record, options)?;

        if let Some(slot) = record.identity_mut() {
            *slot = Some(key.clone());
        }
        Ok(())
    }

    /// Load several entities in key order
    pub fn get_multi<R: Record + Default>(&self, keys: &[Key]) -> CodecResult<Vec<R>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Load several entities into existing records, pairing by position
    pub fn get_multi_into<R: Record>(&self, keys: &[Key], records: &mut [R]) -> CodecResult<()> {
        check_lengths(keys.len(), records.len())?;
        keys.iter()
            .zip(records.iter_mut())
            .try_for_each(|(key, record)| self.get_into(key, record))
    }

    /// Remove the entity under `key`; returns true if one was removed
    pub fn delete(&self, key: &Key) -> CodecResult<bool> {
        Ok(self.store.delete(key)?)
    }
}

fn check_lengths(keys: usize, records: usize) -> CodecResult<()> {
    if keys != records {
        return Err(CodecError::LengthMismatch { keys, records });
    }
    Ok(())
}
