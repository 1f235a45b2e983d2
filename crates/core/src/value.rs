//! Property value types
//!
//! This module defines:
//! - ValueKind: the closed set of semantic kinds a stored property may carry
//! - PropertyValue: one stored value, tagged with its kind
//! - Wrapper types that select a kind where a plain Rust type is ambiguous
//!   (`Text` for long text, `ByteString` for short indexed bytes, `BlobKey`)
//!
//! ## Kind Rules
//!
//! - `String` is short text; `Text` is long text
//! - `ByteString` is short bytes; `Vec<u8>` is long bytes
//! - Long text and long bytes are never indexed
//! - Different kinds are NEVER equal: `Int(1) != Float(1.0)`
//! - Float equality follows IEEE-754: `NaN != NaN`

use crate::key::Key;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a stored property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// 64-bit signed integer
    Integer,
    /// 64-bit IEEE-754 float
    Float,
    /// Boolean
    Boolean,
    /// UTF-8 text, indexable
    ShortText,
    /// UTF-8 text, never indexed
    LongText,
    /// Raw bytes, indexable
    ShortBytes,
    /// Raw bytes, never indexed
    LongBytes,
    /// Microsecond timestamp
    Timestamp,
    /// Latitude/longitude pair
    GeoPoint,
    /// Reference to an external blob
    BlobKey,
    /// Reference to another entity
    EntityKey,
}

impl ValueKind {
    /// Human-readable kind name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::ShortText => "short text",
            ValueKind::LongText => "long text",
            ValueKind::ShortBytes => "short bytes",
            ValueKind::LongBytes => "long bytes",
            ValueKind::Timestamp => "timestamp",
            ValueKind::GeoPoint => "geo point",
            ValueKind::BlobKey => "blob key",
            ValueKind::EntityKey => "entity key",
        }
    }

    /// Whether values of this kind can ever be indexed
    pub fn is_indexable(&self) -> bool {
        !matches!(self, ValueKind::LongText | ValueKind::LongBytes)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in [-90, 90]
    pub lat: f64,
    /// Longitude in [-180, 180]
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point
    pub const fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Whether both coordinates are in range
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Opaque reference to a blob held outside the entity store
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlobKey(pub String);

/// Short byte string, indexable
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ByteString(pub Vec<u8>);

/// Long text, never indexed
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Text(pub String);

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text(s.to_string())
    }
}

impl From<&[u8]> for ByteString {
    fn from(b: &[u8]) -> Self {
        ByteString(b.to_vec())
    }
}

/// One stored property value
///
/// `Null` stands for an absent entity key or blob reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Absent reference
    Null,
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Short text
    String(String),
    /// Long text
    Text(String),
    /// Short bytes
    ByteString(Vec<u8>),
    /// Long bytes
    Bytes(Vec<u8>),
    /// Timestamp
    Timestamp(Timestamp),
    /// Geo point
    GeoPoint(GeoPoint),
    /// Blob reference
    BlobKey(String),
    /// Entity reference
    Key(Key),
}

// Custom PartialEq for IEEE-754 float semantics and strict kind separation
impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        use PropertyValue as V;
        match (self, other) {
            (V::Null, V::Null) => true,
            (V::Int(a), V::Int(b)) => a == b,
            (V::Float(a), V::Float(b)) => a == b,
            (V::Bool(a), V::Bool(b)) => a == b,
            (V::String(a), V::String(b)) => a == b,
            (V::Text(a), V::Text(b)) => a == b,
            (V::ByteString(a), V::ByteString(b)) => a == b,
            (V::Bytes(a), V::Bytes(b)) => a == b,
            (V::Timestamp(a), V::Timestamp(b)) => a == b,
            (V::GeoPoint(a), V::GeoPoint(b)) => a == b,
            (V::BlobKey(a), V::BlobKey(b)) => a == b,
            (V::Key(a), V::Key(b)) => a == b,
            _ => false,
        }
    }
}

impl PropertyValue {
    /// Kind of this value, or `None` for `Null`
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            PropertyValue::Null => None,
            PropertyValue::Int(_) => Some(ValueKind::Integer),
            PropertyValue::Float(_) => Some(ValueKind::Float),
            PropertyValue::Bool(_) => Some(ValueKind::Boolean),
            PropertyValue::String(_) => Some(ValueKind::ShortText),
            PropertyValue::Text(_) => Some(ValueKind::LongText),
            PropertyValue::ByteString(_) => Some(ValueKind::ShortBytes),
            PropertyValue::Bytes(_) => Some(ValueKind::LongBytes),
            PropertyValue::Timestamp(_) => Some(ValueKind::Timestamp),
            PropertyValue::GeoPoint(_) => Some(ValueKind::GeoPoint),
            PropertyValue::BlobKey(_) => Some(ValueKind::BlobKey),
            PropertyValue::Key(_) => Some(ValueKind::EntityKey),
        }
    }

    /// Kind name for error messages ("null" for `Null`)
    pub fn kind_name(&self) -> &'static str {
        self.kind().map(|k| k.name()).unwrap_or("null")
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is short or long text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) | PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &Key if this is an entity reference
    pub fn as_key(&self) -> Option<&Key> {
        match self {
            PropertyValue::Key(k) => Some(k),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<Key> for PropertyValue {
    fn from(k: Key) -> Self {
        PropertyValue::Key(k)
    }
}

impl From<Timestamp> for PropertyValue {
    fn from(t: Timestamp) -> Self {
        PropertyValue::Timestamp(t)
    }
}
