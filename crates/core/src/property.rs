//! Property entries and property lists
//!
//! A property list is the stored form of an entity: an ordered sequence of
//! `(name, value, indexed)` entries. Several entries may share a name; that is
//! how multi-valued properties are stored, and their relative order matters.

use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};

/// One `(name, value, indexed)` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Wire name (dotted for nested fields)
    pub name: String,
    /// Stored value
    pub value: PropertyValue,
    /// Whether the store should index this value
    pub indexed: bool,
}

impl Property {
    /// Create an indexed property
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
            indexed: true,
        }
    }

    /// Create a property that is not indexed
    pub fn unindexed(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
            indexed: false,
        }
    }
}

/// Ordered list of properties making up one entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyList(Vec<Property>);

impl PropertyList {
    /// Create an empty list
    pub fn new() -> Self {
        PropertyList(Vec::new())
    }

    /// Create an empty list with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        PropertyList(Vec::with_capacity(capacity))
    }

    /// Append an entry
    pub fn push(&mut self, property: Property) {
        self.0.push(property);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in order
    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.0.iter()
    }

    /// Entry names in order, repeated names included
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.name.as_str()).collect()
    }

    /// All values stored under `name`, in order
    pub fn values_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PropertyValue> + 'a {
        self.0
            .iter()
            .filter(move |p| p.name == name)
            .map(|p| &p.value)
    }

    /// Borrow the entries as a slice
    pub fn as_slice(&self) -> &[Property] {
        &self.0
    }

    /// Consume the list, returning its entries
    pub fn into_inner(self) -> Vec<Property> {
        self.0
    }
}

impl From<Vec<Property>> for PropertyList {
    fn from(v: Vec<Property>) -> Self {
        PropertyList(v)
    }
}

impl FromIterator<Property> for PropertyList {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        PropertyList(iter.into_iter().collect())
    }
}

impl IntoIterator for PropertyList {
    type Item = Property;
    type IntoIter = std::vec::IntoIter<Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
