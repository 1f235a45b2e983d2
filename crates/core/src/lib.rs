//! Core types and traits for Strata entities
//!
//! This crate defines the boundary types shared by the codec and by stores:
//! - Key: Hierarchical entity key (kind + id path)
//! - PropertyValue / ValueKind: Stored values and their semantic kinds
//! - Property / PropertyList: The flat stored form of an entity
//! - Timestamp: Microsecond timestamp
//! - Limits: Name and value size limits
//! - EntityStore: Storage seam implemented by backends
//! - Error: Store boundary errors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod limits;
pub mod property;
pub mod timestamp;
pub mod traits;
pub mod value;

pub use error::{Error, Result};
pub use key::{Key, KeyError, KeyId, PathElement};
pub use limits::{LimitError, Limits};
pub use property::{Property, PropertyList};
pub use timestamp::Timestamp;
pub use traits::EntityStore;
pub use value::{BlobKey, ByteString, GeoPoint, PropertyValue, Text, ValueKind};
