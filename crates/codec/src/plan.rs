//! Field plans
//!
//! A [`FieldPlan`] is the flattened, ordered list of leaves of one record
//! shape. It is built once by the reflector and shared immutably by every
//! encode and decode call against that shape.
//!
//! ## Invariants
//!
//! - Leaves are in depth-first declaration order
//! - Property names and aliases are unique across the plan
//! - Long text and long bytes leaves are never indexed

use std::any::TypeId;
use std::collections::HashMap;
use strata_core::ValueKind;

/// Whether a leaf holds one value or many
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// One property entry
    Scalar,
    /// Zero or more property entries sharing a name
    Sequence,
}

/// One terminal field after flattening
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafDescriptor {
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) location: Vec<usize>,
    pub(crate) kind: ValueKind,
    pub(crate) multiplicity: Multiplicity,
    pub(crate) indexed: bool,
    pub(crate) aliases: Vec<String>,
    pub(crate) auto_now: bool,
}

impl LeafDescriptor {
    /// Dotted path of declared field names, e.g. `Foo3.Integer`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Property name used on the wire, e.g. `foofoo3.Integer`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field index chain from the root record to this leaf
    pub fn location(&self) -> &[usize] {
        &self.location
    }

    /// Kind of the stored values
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Scalar or sequence
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    /// Whether encoded entries are indexed
    pub fn indexed(&self) -> bool {
        self.indexed
    }

    /// Legacy names accepted on decode
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whether a zero timestamp is stamped with the current time on encode
    pub fn auto_now(&self) -> bool {
        self.auto_now
    }
}

/// Ordered leaves of one record shape plus a name lookup
#[derive(Debug, Clone)]
pub struct FieldPlan {
    shape_name: &'static str,
    type_id: TypeId,
    leaves: Vec<LeafDescriptor>,
    // Property name or alias -> index into `leaves`
    lookup: HashMap<String, usize>,
}

impl FieldPlan {
    pub(crate) fn new(
        shape_name: &'static str,
        type_id: TypeId,
        leaves: Vec<LeafDescriptor>,
        lookup: HashMap<String, usize>,
    ) -> Self {
        FieldPlan {
            shape_name,
            type_id,
            leaves,
            lookup,
        }
    }

    /// Name of the shape this plan was built from
    pub fn shape_name(&self) -> &'static str {
        self.shape_name
    }

    /// Identity of the record type this plan belongs to
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Leaves in plan order
    pub fn leaves(&self) -> &[LeafDescriptor] {
        &self.leaves
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the shape has no leaves
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Resolve a property name or alias to its leaf
    pub fn resolve(&self, name: &str) -> Option<&LeafDescriptor> {
        self.lookup.get(name).map(|&i| &self.leaves[i])
    }

    /// Property names in plan order
    pub fn names(&self) -> Vec<&str> {
        self.leaves.iter().map(|l| l.name.as_str()).collect()
    }
}
