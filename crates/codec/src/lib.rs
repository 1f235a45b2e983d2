//! Codec between typed records and flat entity property lists
//!
//! This crate converts nested record values into the ordered
//! `(name, value, indexed)` lists stored by a schemaless entity store, and
//! back:
//! - Shape / Record: static description of a record type and field access
//! - FieldPlan: flattened, ordered leaves of one shape
//! - reflect: builds a plan from a shape, rejecting invalid shapes
//! - PlanCache: builds each plan once and shares it
//! - encode / decode: linear scans over a plan
//! - Client: record-level put/get over an `EntityStore`
//!
//! Nested records contribute a `Name.` prefix to their leaves; embedded
//! records surface their leaves at the parent's level. Sequence fields become
//! repeated entries under one name.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod client;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod field;
pub mod plan;
pub mod reflector;
pub mod shape;
pub mod testing;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cache::{plan_for, PlanCache};
pub use client::Client;
pub use config::{CodecConfig, DecodeOptions, CONFIG_FILE_NAME};
pub use decode::decode;
pub use encode::{encode, encode_with_clock};
pub use error::{CodecError, CodecResult, DecodeError, EncodeError, PlanError};
pub use field::{Describe, FieldValue, ScalarSlot, SequenceSlot, TypeClass, ValueError};
pub use plan::{FieldPlan, LeafDescriptor, Multiplicity};
pub use reflector::reflect;
pub use shape::{Directive, FieldDecl, FieldMut, FieldRef, FieldType, Record, Shape, ShapeRef};
