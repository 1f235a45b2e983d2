//! Entity keys
//!
//! A key is a hierarchical path of `(kind, id)` pairs, root first, scoped to an
//! optional namespace. The last element identifies the entity itself; the
//! preceding elements are its ancestors.
//!
//! The identifier of the last element may be unassigned ("incomplete"). The
//! store allocates an integer id for incomplete keys on write.
//!
//! ## Validation Rules
//!
//! - Kinds must not be empty and must not contain NUL bytes
//! - Integer ids must be positive
//! - String names must not be empty
//! - Only the last path element may be incomplete
//!
//! ```
//! use strata_core::Key;
//!
//! let parent = Key::with_name("Bar", "b1", None);
//! let child = Key::incomplete("Foo", Some(&parent));
//!
//! assert!(child.is_incomplete());
//! assert_eq!(child.parent(), Some(parent));
//! assert_eq!(child.to_string(), "Bar,b1/Foo,?");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of one path element
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyId {
    /// Not yet assigned by the store
    Incomplete,
    /// Store-allocated or caller-chosen integer id
    Id(i64),
    /// Caller-chosen string name
    Name(String),
}

/// One `(kind, id)` step of a key path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathElement {
    /// Entity kind
    pub kind: String,
    /// Identifier within the kind
    pub id: KeyId,
}

/// Hierarchical entity key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Key {
    namespace: String,
    path: Vec<PathElement>,
}

impl Key {
    fn child(kind: &str, id: KeyId, parent: Option<&Key>) -> Self {
        let (namespace, mut path) = match parent {
            Some(p) => (p.namespace.clone(), p.path.clone()),
            None => (String::new(), Vec::new()),
        };
        path.push(PathElement {
            kind: kind.to_string(),
            id,
        });
        Key { namespace, path }
    }

    /// Create a key whose id will be allocated by the store
    pub fn incomplete(kind: &str, parent: Option<&Key>) -> Self {
        Self::child(kind, KeyId::Incomplete, parent)
    }

    /// Create a key with an integer id
    pub fn with_id(kind: &str, id: i64, parent: Option<&Key>) -> Self {
        Self::child(kind, KeyId::Id(id), parent)
    }

    /// Create a key with a string name
    pub fn with_name(kind: &str, name: &str, parent: Option<&Key>) -> Self {
        Self::child(kind, KeyId::Name(name.to_string()), parent)
    }

    /// Return a copy of this key scoped to `namespace`
    ///
    /// Ancestors share the namespace of their descendants.
    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Namespace of the key (empty for the default namespace)
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Full path, root first
    pub fn path(&self) -> &[PathElement] {
        &self.path
    }

    fn last(&self) -> Option<&PathElement> {
        self.path.last()
    }

    /// Kind of the entity this key identifies
    pub fn kind(&self) -> &str {
        self.last().map(|e| e.kind.as_str()).unwrap_or("")
    }

    /// Identifier of the entity this key identifies
    pub fn id(&self) -> &KeyId {
        self.last().map(|e| &e.id).unwrap_or(&KeyId::Incomplete)
    }

    /// Integer id, or 0 if the key has a name or is incomplete
    pub fn int_id(&self) -> i64 {
        match self.id() {
            KeyId::Id(id) => *id,
            _ => 0,
        }
    }

    /// String name, or "" if the key has an integer id or is incomplete
    pub fn string_id(&self) -> &str {
        match self.id() {
            KeyId::Name(name) => name,
            _ => "",
        }
    }

    /// Whether the last element still awaits an id
    pub fn is_incomplete(&self) -> bool {
        matches!(self.id(), KeyId::Incomplete)
    }

    /// Parent key, if this key has ancestors
    pub fn parent(&self) -> Option<Key> {
        if self.path.len() < 2 {
            return None;
        }
        Some(Key {
            namespace: self.namespace.clone(),
            path: self.path[..self.path.len() - 1].to_vec(),
        })
    }

    /// Root ancestor (the key itself when it has no parent)
    pub fn root(&self) -> Key {
        Key {
            namespace: self.namespace.clone(),
            path: self.path.iter().take(1).cloned().collect(),
        }
    }

    /// Copy of this key with the last element's id set to `id`
    ///
    /// Used by stores when allocating ids for incomplete keys.
    pub fn completed(&self, id: i64) -> Key {
        let mut key = self.clone();
        if let Some(last) = key.path.last_mut() {
            last.id = KeyId::Id(id);
        }
        key
    }

    /// Validate the key against the rules in the module documentation
    pub fn validate(&self) -> Result<(), KeyError> {
        if self.path.is_empty() {
            return Err(KeyError::EmptyPath);
        }
        let last = self.path.len() - 1;
        for (i, element) in self.path.iter().enumerate() {
            if element.kind.is_empty() {
                return Err(KeyError::EmptyKind);
            }
            if element.kind.contains('\x00') {
                return Err(KeyError::ContainsNul);
            }
            match &element.id {
                KeyId::Incomplete if i != last => {
                    return Err(KeyError::IncompleteAncestor(element.kind.clone()))
                }
                KeyId::Id(id) if *id <= 0 => return Err(KeyError::NonPositiveId(*id)),
                KeyId::Name(name) if name.is_empty() => return Err(KeyError::EmptyName),
                _ => {}
            }
        }
        Ok(())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}:", self.namespace)?;
        }
        for (i, element) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match &element.id {
                KeyId::Incomplete => write!(f, "{},?", element.kind)?,
                KeyId::Id(id) => write!(f, "{},{}", element.kind, id)?,
                KeyId::Name(name) => write!(f, "{},{}", element.kind, name)?,
            }
        }
        Ok(())
    }
}

/// Key validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Key has no path elements
    #[error("Key has an empty path")]
    EmptyPath,

    /// A path element has an empty kind
    #[error("Key kind cannot be empty")]
    EmptyKind,

    /// A kind contains a NUL byte (\0)
    #[error("Key kind cannot contain NUL bytes")]
    ContainsNul,

    /// An integer id is zero or negative
    #[error("Key id must be positive, got {0}")]
    NonPositiveId(i64),

    /// A string name is empty
    #[error("Key name cannot be empty")]
    EmptyName,

    /// An ancestor element has no id
    #[error("Ancestor of kind '{0}' is incomplete")]
    IncompleteAncestor(String),
}
