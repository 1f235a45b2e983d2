//! Codec error types
//!
//! - `PlanError`: a shape cannot be turned into a field plan
//! - `EncodeError`: a record cannot be turned into a property list
//! - `DecodeError`: a property list cannot be loaded into a record
//! - `CodecError`: umbrella type for record-level operations
//!
//! Every variant carries the shape name and the field or property involved,
//! so the failure can be diagnosed without re-deriving state.

use strata_core::{LimitError, ValueKind};
use thiserror::Error;

/// Result type alias for record-level operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Field plan construction failures
///
/// Plan errors are cached with the shape, so they are `Clone`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanError {
    /// A field's declared type has no property mapping (e.g. a map)
    #[error("unsupported field type: {type_name} (field \"{field}\" of \"{shape}\")")]
    UnsupportedFieldType {
        /// Root shape name
        shape: String,
        /// Dotted field path
        field: String,
        /// Rust type name of the field
        type_name: &'static str,
    },

    /// Two leaves resolve to the same property name
    #[error("duplicate property name \"{name}\" in \"{shape}\": fields \"{first}\" and \"{second}\"")]
    DuplicateName {
        /// Root shape name
        shape: String,
        /// Colliding property name
        name: String,
        /// Path of the leaf that claimed the name first
        first: String,
        /// Path of the leaf that collided
        second: String,
    },

    /// A shape contains itself
    #[error("recursive shape: field \"{field}\" of \"{shape}\" contains \"{nested}\" again")]
    RecursiveShape {
        /// Root shape name
        shape: String,
        /// Dotted field path where the cycle closes
        field: String,
        /// Shape that recurs
        nested: String,
    },

    /// Nesting exceeds the configured depth
    #[error("field \"{field}\" of \"{shape}\" is nested deeper than {max} levels")]
    NestingTooDeep {
        /// Root shape name
        shape: String,
        /// Dotted field path
        field: String,
        /// Configured maximum
        max: usize,
    },

    /// A directive is malformed or does not apply to the field
    #[error("invalid directive on field \"{field}\" of \"{shape}\": {reason}")]
    InvalidDirective {
        /// Root shape name
        shape: String,
        /// Dotted field path
        field: String,
        /// What is wrong
        reason: String,
    },

    /// A resolved property name violates name limits
    #[error("invalid property name for field \"{field}\" of \"{shape}\": {source}")]
    InvalidName {
        /// Root shape name
        shape: String,
        /// Dotted field path
        field: String,
        /// Violated limit
        #[source]
        source: LimitError,
    },
}

/// Encoding failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The plan was built for another record type
    #[error("field plan for \"{plan}\" cannot encode a \"{record}\"")]
    PlanMismatch {
        /// Shape the plan was built for
        plan: String,
        /// Type name of the record
        record: &'static str,
    },

    /// The record's accessors disagree with its declared shape
    #[error("field \"{field}\" of \"{shape}\" is not accessible as a {expected}")]
    Inaccessible {
        /// Root shape name
        shape: String,
        /// Dotted field path
        field: String,
        /// Expected accessor ("scalar", "sequence", "record")
        expected: &'static str,
    },

    /// The record's accessor yields another kind than declared
    #[error("field \"{field}\" of \"{shape}\" holds {found} values, declared {expected}")]
    KindMismatch {
        /// Root shape name
        shape: String,
        /// Dotted field path
        field: String,
        /// Declared kind
        expected: ValueKind,
        /// Kind produced by the accessor
        found: ValueKind,
    },
}

/// Decoding failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The plan was built for another record type
    #[error("field plan for \"{plan}\" cannot decode into a \"{record}\"")]
    PlanMismatch {
        /// Shape the plan was built for
        plan: String,
        /// Type name of the record
        record: &'static str,
    },

    /// No leaf or alias matches an incoming property
    #[error("cannot load property \"{property}\" into a \"{shape}\": no such field")]
    NoDestination {
        /// Root shape name
        shape: String,
        /// Incoming property name
        property: String,
    },

    /// Incoming value kind does not fit the leaf
    #[error("cannot load property \"{property}\" into a \"{shape}\": type mismatch: {expected} versus {found}")]
    TypeMismatch {
        /// Root shape name
        shape: String,
        /// Incoming property name
        property: String,
        /// Leaf kind
        expected: ValueKind,
        /// Incoming kind name
        found: &'static str,
    },

    /// Incoming value does not fit the field's Rust type
    #[error("cannot load property \"{property}\" into a \"{shape}\": value {value} overflows {target}")]
    Overflow {
        /// Root shape name
        shape: String,
        /// Incoming property name
        property: String,
        /// Offending value
        value: String,
        /// Rust type of the field
        target: &'static str,
    },

    /// The record's accessors disagree with its declared shape
    #[error("field \"{field}\" of \"{shape}\" is not accessible as a {expected}")]
    Inaccessible {
        /// Root shape name
        shape: String,
        /// Dotted field path
        field: String,
        /// Expected accessor ("scalar", "sequence", "record")
        expected: &'static str,
    },
}

/// Errors from record-level operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodecError {
    /// Plan construction failed
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Encoding failed
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Decoding failed
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The entity store failed
    #[error(transparent)]
    Store(#[from] strata_core::Error),

    /// Multi-entity call with mismatched lengths
    #[error("{keys} keys but {records} records")]
    LengthMismatch {
        /// Number of keys
        keys: usize,
        /// Number of records
        records: usize,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}
