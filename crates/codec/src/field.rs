//! Leaf field types
//!
//! A Rust type can sit in a leaf field when it implements [`FieldValue`]: it
//! maps to exactly one [`ValueKind`] and converts to and from a stored
//! [`PropertyValue`]. `Vec<T>` of such a type is a sequence leaf.
//!
//! [`Describe`] is what shape declarations use to classify a field's type.
//! Every `FieldValue` type and its `Vec` are described as scalar/sequence;
//! map types are described as unsupported so that plan construction can
//! reject them with the offending type name.
//!
//! | Rust type            | Kind         |
//! |----------------------|--------------|
//! | `i64` `i32` `i16` `i8` | integer    |
//! | `f64` `f32`          | float        |
//! | `bool`               | boolean      |
//! | `String`             | short text   |
//! | `Text`               | long text    |
//! | `ByteString`         | short bytes  |
//! | `Vec<u8>`            | long bytes   |
//! | `Timestamp`          | timestamp    |
//! | `GeoPoint`           | geo point    |
//! | `BlobKey`            | blob key     |
//! | `Key` `Option<Key>`  | entity key   |
//!
//! `u8` deliberately has no mapping, which keeps `Vec<u8>` an atomic
//! long-bytes value rather than a sequence. Stored timestamps carry
//! microseconds, so chrono's nanosecond `DateTime<Utc>` has no mapping either;
//! convert with `Timestamp::from` at the record boundary.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use strata_core::{BlobKey, ByteString, GeoPoint, Key, PropertyValue, Text, Timestamp, ValueKind};

/// Why a stored value could not be converted into a field type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The stored kind does not fit
    Mismatch {
        /// Kind name of the stored value
        found: &'static str,
    },
    /// The stored value is out of range for the field type
    Overflow {
        /// Rendered stored value
        value: String,
        /// Field type name
        target: &'static str,
    },
}

impl ValueError {
    fn mismatch(value: &PropertyValue) -> Self {
        ValueError::Mismatch {
            found: value.kind_name(),
        }
    }
}

/// A Rust type that occupies exactly one stored property value
pub trait FieldValue: Sized + Send + Sync + 'static {
    /// Kind of the stored values
    const KIND: ValueKind;

    /// Convert into the stored representation
    fn to_value(&self) -> PropertyValue;

    /// Convert from the stored representation
    fn from_value(value: PropertyValue) -> Result<Self, ValueError>;
}

/// How a field type maps onto properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// One property value
    Scalar(ValueKind),
    /// Zero or more property values sharing one name
    Sequence(ValueKind),
    /// No mapping; carries the Rust type name
    Unsupported(&'static str),
}

/// Classifies a field type for shape declarations
pub trait Describe {
    /// Classification of `Self`
    fn describe() -> TypeClass;
}

// ============================================================================
// Slots: object-safe access used by the encoder and decoder
// ============================================================================

/// Object-safe view of a scalar leaf
pub trait ScalarSlot {
    /// Kind of the leaf
    fn kind(&self) -> ValueKind;
    /// Current value in stored form
    fn get(&self) -> PropertyValue;
    /// Overwrite from a stored value
    fn set(&mut self, value: PropertyValue) -> Result<(), ValueError>;
}

impl<T: FieldValue> ScalarSlot for T {
    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn get(&self) -> PropertyValue {
        self.to_value()
    }

    fn set(&mut self, value: PropertyValue) -> Result<(), ValueError> {
        *self = T::from_value(value)?;
        Ok(())
    }
}

/// Object-safe view of a sequence leaf
pub trait SequenceSlot {
    /// Kind of each element
    fn kind(&self) -> ValueKind;
    /// Elements in stored form, in order
    fn values(&self) -> Vec<PropertyValue>;
    /// Remove all elements
    fn clear(&mut self);
    /// Append one element from a stored value
    fn push(&mut self, value: PropertyValue) -> Result<(), ValueError>;
}

impl<T: FieldValue> SequenceSlot for Vec<T> {
    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn values(&self) -> Vec<PropertyValue> {
        self.iter().map(FieldValue::to_value).collect()
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push(&mut self, value: PropertyValue) -> Result<(), ValueError> {
        Vec::push(self, T::from_value(value)?);
        Ok(())
    }
}

// ============================================================================
// FieldValue implementations
// ============================================================================

macro_rules! describe_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeClass {
                    TypeClass::Scalar(<$ty as FieldValue>::KIND)
                }
            }

            impl Describe for Vec<$ty> {
                fn describe() -> TypeClass {
                    TypeClass::Sequence(<$ty as FieldValue>::KIND)
                }
            }
        )*
    };
}

describe_field_value!(
    i64,
    i32,
    i16,
    i8,
    f64,
    f32,
    bool,
    String,
    Text,
    ByteString,
    Vec<u8>,
    Timestamp,
    GeoPoint,
    BlobKey,
    Key,
    Option<Key>,
);

impl FieldValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Int(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::Int(i) => Ok(i),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

macro_rules! narrow_int_field_value {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = ValueKind::Integer;

                fn to_value(&self) -> PropertyValue {
                    PropertyValue::Int(i64::from(*self))
                }

                fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
                    match value {
                        PropertyValue::Int(i) => <$ty>::try_from(i).map_err(|_| ValueError::Overflow {
                            value: i.to_string(),
                            target: stringify!($ty),
                        }),
                        other => Err(ValueError::mismatch(&other)),
                    }
                }
            }
        )*
    };
}

narrow_int_field_value!(i32, i16, i8);

impl FieldValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Float(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::Float(f) => Ok(f),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Float(f64::from(*self))
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::Float(f) if f.is_finite() && f.abs() > f64::from(f32::MAX) => {
                Err(ValueError::Overflow {
                    value: f.to_string(),
                    target: "f32",
                })
            }
            PropertyValue::Float(f) => Ok(f as f32),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Bool(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::Bool(b) => Ok(b),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

// Short and long text load into each other so a field can switch between
// `String` and `Text` without rewriting stored entities. Same for bytes.

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::ShortText;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::String(self.clone())
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::String(s) | PropertyValue::Text(s) => Ok(s),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for Text {
    const KIND: ValueKind = ValueKind::LongText;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Text(self.0.clone())
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::String(s) | PropertyValue::Text(s) => Ok(Text(s)),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for ByteString {
    const KIND: ValueKind = ValueKind::ShortBytes;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::ByteString(self.0.clone())
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::ByteString(b) | PropertyValue::Bytes(b) => Ok(ByteString(b)),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for Vec<u8> {
    const KIND: ValueKind = ValueKind::LongBytes;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Bytes(self.clone())
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::ByteString(b) | PropertyValue::Bytes(b) => Ok(b),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for Timestamp {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Timestamp(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::Timestamp(t) => Ok(t),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for GeoPoint {
    const KIND: ValueKind = ValueKind::GeoPoint;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::GeoPoint(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::GeoPoint(p) => Ok(p),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for BlobKey {
    const KIND: ValueKind = ValueKind::BlobKey;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::BlobKey(self.0.clone())
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::BlobKey(s) => Ok(BlobKey(s)),
            PropertyValue::Null => Ok(BlobKey::default()),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for Key {
    const KIND: ValueKind = ValueKind::EntityKey;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Key(self.clone())
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::Key(k) => Ok(k),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

impl FieldValue for Option<Key> {
    const KIND: ValueKind = ValueKind::EntityKey;

    fn to_value(&self) -> PropertyValue {
        match self {
            Some(k) => PropertyValue::Key(k.clone()),
            None => PropertyValue::Null,
        }
    }

    fn from_value(value: PropertyValue) -> Result<Self, ValueError> {
        match value {
            PropertyValue::Key(k) => Ok(Some(k)),
            PropertyValue::Null => Ok(None),
            other => Err(ValueError::mismatch(&other)),
        }
    }
}

// ============================================================================
// Unsupported types
// ============================================================================

impl<K, V, S: BuildHasher> Describe for HashMap<K, V, S> {
    fn describe() -> TypeClass {
        TypeClass::Unsupported(std::any::type_name::<Self>())
    }
}

impl<K, V> Describe for BTreeMap<K, V> {
    fn describe() -> TypeClass {
        TypeClass::Unsupported(std::any::type_name::<Self>())
    }
}
