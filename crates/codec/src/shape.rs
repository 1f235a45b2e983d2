//! Record shapes
//!
//! A [`Shape`] is the static description of a record type: its fields in
//! declaration order, each with a type classification and directives. Record
//! types register their shape by implementing [`Record::shape`]; the reflector
//! turns it into a field plan once and the plan cache keeps the result.
//!
//! [`Record`] also exposes index-based field access. The index of a field is
//! its position in the declared field list, and the accessors must agree with
//! the declaration: a scalar field is returned as [`FieldRef::Scalar`], a
//! sequence as [`FieldRef::Sequence`], a nested or embedded record as
//! [`FieldRef::Record`].
//!
//! # Example
//!
//! ```
//! use strata_codec::{FieldDecl, FieldMut, FieldRef, Record, Shape};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i64,
//!     tags: Vec<String>,
//! }
//!
//! impl Record for Point {
//!     fn shape() -> Shape {
//!         Shape::new::<Self>(
//!             "Point",
//!             vec![
//!                 FieldDecl::of::<i64>("X"),
//!                 FieldDecl::of::<Vec<String>>("Tags").noindex(),
//!             ],
//!         )
//!     }
//!
//!     fn field(&self, index: usize) -> Option<FieldRef<'_>> {
//!         match index {
//!             0 => Some(FieldRef::Scalar(&self.x)),
//!             1 => Some(FieldRef::Sequence(&self.tags)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
//!         match index {
//!             0 => Some(FieldMut::Scalar(&mut self.x)),
//!             1 => Some(FieldMut::Sequence(&mut self.tags)),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use std::any::TypeId;
use std::fmt;
use strata_core::Key;

use crate::field::{Describe, ScalarSlot, SequenceSlot, TypeClass};

/// A record type that can be encoded to and decoded from a property list
pub trait Record: Send + Sync + 'static {
    /// Static description of this record type
    fn shape() -> Shape
    where
        Self: Sized;

    /// Read access to the field at `index`
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    /// Write access to the field at `index`
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;

    /// Slot holding the record's own key, if the record tracks it
    ///
    /// The key is not a property. Record-level writes fill an unset or
    /// incomplete slot with the key assigned by the store.
    fn identity_mut(&mut self) -> Option<&mut Option<Key>> {
        None
    }
}

/// Read access to one field
pub enum FieldRef<'a> {
    /// Single-valued leaf
    Scalar(&'a dyn ScalarSlot),
    /// Multi-valued leaf
    Sequence(&'a dyn SequenceSlot),
    /// Nested or embedded record
    Record(&'a dyn Record),
}

/// Write access to one field
pub enum FieldMut<'a> {
    /// Single-valued leaf
    Scalar(&'a mut dyn ScalarSlot),
    /// Multi-valued leaf
    Sequence(&'a mut dyn SequenceSlot),
    /// Nested or embedded record
    Record(&'a mut dyn Record),
}

/// Reference to another record's shape
#[derive(Clone, Copy)]
pub struct ShapeRef {
    type_id: TypeId,
    type_name: &'static str,
    // Shapes are built on demand; a function pointer delays it.
    shape: fn() -> Shape,
}

impl ShapeRef {
    /// Reference the shape of `R`
    pub fn of<R: Record>() -> Self {
        ShapeRef {
            type_id: TypeId::of::<R>(),
            type_name: std::any::type_name::<R>(),
            shape: R::shape,
        }
    }

    /// `TypeId` of the referenced record type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Build the referenced shape
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}

impl fmt::Debug for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeRef").field(&self.type_name).finish()
    }
}

/// Type classification of a declared field
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    /// Leaf field
    Leaf(TypeClass),
    /// Nested or embedded record
    Record(ShapeRef),
}

/// Per-field directive
///
/// Directives are resolved once by the reflector into plain leaf descriptor
/// fields and never consulted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Use this property name instead of the field name
    Rename(&'static str),
    /// Store values unindexed
    NoIndex,
    /// Also accept this legacy name when decoding
    AliasOf(&'static str),
    /// Stamp a zero timestamp with the current time when encoding
    AutoNow,
    /// Leave the field out of the plan entirely
    Skip,
    /// Unrecognized tag option, rejected at plan construction
    Unknown(&'static str),
}

/// One declared field of a shape
#[derive(Debug, Clone)]
pub struct FieldDecl {
    name: &'static str,
    ty: FieldType,
    embedded: bool,
    directives: Vec<Directive>,
}

impl FieldDecl {
    /// Declare a leaf field (or an unsupported one) of type `T`
    pub fn of<T: Describe>(name: &'static str) -> Self {
        FieldDecl {
            name,
            ty: FieldType::Leaf(T::describe()),
            embedded: false,
            directives: Vec::new(),
        }
    }

    /// Declare a named nested record; its leaves are prefixed with `name.`
    pub fn record<R: Record>(name: &'static str) -> Self {
        FieldDecl {
            name,
            ty: FieldType::Record(ShapeRef::of::<R>()),
            embedded: false,
            directives: Vec::new(),
        }
    }

    /// Declare an embedded record; its leaves surface at this level
    pub fn embedded<R: Record>() -> Self {
        let ty = ShapeRef::of::<R>();
        FieldDecl {
            name: short_type_name(ty.type_name),
            ty: FieldType::Record(ty),
            embedded: true,
            directives: Vec::new(),
        }
    }

    /// Store under `name` instead of the field name
    pub fn rename(mut self, name: &'static str) -> Self {
        self.directives.push(Directive::Rename(name));
        self
    }

    /// Store values unindexed
    pub fn noindex(mut self) -> Self {
        self.directives.push(Directive::NoIndex);
        self
    }

    /// Accept the legacy property `name` when decoding
    pub fn alias(mut self, name: &'static str) -> Self {
        self.directives.push(Directive::AliasOf(name));
        self
    }

    /// Stamp the current time when the value is zero at encode time
    pub fn auto_now(mut self) -> Self {
        self.directives.push(Directive::AutoNow);
        self
    }

    /// Leave this field out of stored entities
    pub fn skip(mut self) -> Self {
        self.directives.push(Directive::Skip);
        self
    }

    /// Apply a tag string of the form `name,option,option`
    ///
    /// The name part renames the field when non-empty; `-` skips the field.
    /// Recognized options are `noindex` and `auto_now`; anything else is
    /// kept and rejected when the plan is built.
    pub fn tag(mut self, tag: &'static str) -> Self {
        let mut parts = tag.split(',');
        match parts.next() {
            Some("-") => self.directives.push(Directive::Skip),
            Some("") | None => {}
            Some(name) => self.directives.push(Directive::Rename(name)),
        }
        for option in parts {
            self.directives.push(match option.trim() {
                "noindex" => Directive::NoIndex,
                "auto_now" => Directive::AutoNow,
                _ => Directive::Unknown(option),
            });
        }
        self
    }

    /// Declared field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type classification
    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    /// Whether the field is an embedded record
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Directives in declaration order
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }
}

/// Static description of a record type
#[derive(Debug, Clone)]
pub struct Shape {
    name: &'static str,
    type_id: TypeId,
    fields: Vec<FieldDecl>,
}

impl Shape {
    /// Describe record type `R`
    ///
    /// The order of fields is the declaration order and determines both
    /// field indices and the order of encoded properties.
    pub fn new<R: Record>(name: &'static str, fields: Vec<FieldDecl>) -> Self {
        Shape {
            name,
            type_id: TypeId::of::<R>(),
            fields,
        }
    }

    /// Shape name used in error messages
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Identity of the described type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
