//! Strata Entity - typed records over a schemaless entity store
//!
//! Converts nested Rust records into flat, ordered property lists of
//! `(name, value, indexed)` entries and back, with field renaming, indexing
//! hints, legacy aliases and a strict or tolerant policy for schema drift.
//!
//! # Quick Start
//!
//! ```ignore
//! use strata_entity::{Client, Key};
//! use strata_entity::testing::MemoryStore;
//!
//! let client = Client::new(MemoryStore::new());
//! let key = client.put(&Key::incomplete("Main", None), &mut main)?;
//! let loaded: Main = client.get(&key)?;
//! ```
//!
//! # Architecture
//!
//! - `strata-core`: keys, values, property lists and the `EntityStore` seam
//! - `strata-codec`: shapes, field plans, the encoder and decoder, and the
//!   record-level `Client`

pub use strata_codec::*;
pub use strata_core::{
    BlobKey, ByteString, EntityStore, Error, GeoPoint, Key, KeyError, KeyId, LimitError, Limits,
    PathElement, Property, PropertyList, PropertyValue, Result, Text, Timestamp, ValueKind,
};
