//! Size limits for property names and values
//!
//! These limits are enforced when field plans are built (names, nesting) and
//! by stores when entities are written (indexed value sizes, geo ranges).

use crate::property::{Property, PropertyList};
use crate::value::PropertyValue;
use thiserror::Error;

/// Size limits for property names and values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum property name length in bytes (default: 500)
    pub max_name_bytes: usize,

    /// Maximum size of an indexed text or byte value (default: 1500)
    pub max_indexed_bytes: usize,

    /// Maximum depth of named/embedded record nesting (default: 32)
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_name_bytes: 500,
            max_indexed_bytes: 1500,
            max_nesting_depth: 32,
        }
    }
}

impl Limits {
    /// Validate a property name
    pub fn validate_name(&self, name: &str) -> Result<(), LimitError> {
        if name.is_empty() {
            return Err(LimitError::EmptyName);
        }
        if name.contains('\x00') {
            return Err(LimitError::NameContainsNul(name.to_string()));
        }
        if name.len() > self.max_name_bytes {
            return Err(LimitError::NameTooLong {
                name: name.to_string(),
                actual: name.len(),
                max: self.max_name_bytes,
            });
        }
        Ok(())
    }

    /// Validate one property about to be stored
    pub fn validate_property(&self, property: &Property) -> Result<(), LimitError> {
        self.validate_name(&property.name)?;
        if let PropertyValue::GeoPoint(point) = &property.value {
            if !point.is_valid() {
                return Err(LimitError::GeoPointOutOfRange(property.name.clone()));
            }
        }
        if !property.indexed {
            return Ok(());
        }
        let len = match &property.value {
            PropertyValue::String(s) => s.len(),
            PropertyValue::ByteString(b) => b.len(),
            _ => return Ok(()),
        };
        if len > self.max_indexed_bytes {
            return Err(LimitError::IndexedValueTooLong {
                name: property.name.clone(),
                actual: len,
                max: self.max_indexed_bytes,
            });
        }
        Ok(())
    }

    /// Validate every property of an entity
    pub fn validate_entity(&self, properties: &PropertyList) -> Result<(), LimitError> {
        properties
            .iter()
            .try_for_each(|p| self.validate_property(p))
    }
}

/// Limit violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Property name is empty
    #[error("Property name cannot be empty")]
    EmptyName,

    /// Property name contains NUL
    #[error("Property name '{0}' contains NUL bytes")]
    NameContainsNul(String),

    /// Property name exceeds limit
    #[error("Property name '{name}' too long: {actual} bytes exceeds maximum {max}")]
    NameTooLong {
        /// Offending name
        name: String,
        /// Actual length in bytes
        actual: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Indexed value exceeds limit
    #[error("Indexed value of '{name}' too long: {actual} bytes exceeds maximum {max}")]
    IndexedValueTooLong {
        /// Property name
        name: String,
        /// Actual length in bytes
        actual: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Geo point latitude or longitude outside its range
    #[error("Geo point '{0}' out of range")]
    GeoPointOutOfRange(String),
}
