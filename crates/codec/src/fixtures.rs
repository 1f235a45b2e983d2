//! Small record types for the unit tests
//!
//! The full scenario records live with the integration suites; these only
//! cover the plan, encode and decode edge cases.

use std::collections::HashMap;
use strata_core::{Key, Timestamp};

use crate::shape::{FieldDecl, FieldMut, FieldRef, Record, Shape};

/// A handful of scalar kinds; `Note` is unindexed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flat {
    pub count: i64,
    pub ratio: f32,
    pub note: String,
    pub blob: Vec<u8>,
    pub seen: Timestamp,
    pub owner: Option<Key>,
}

impl Record for Flat {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Flat",
            vec![
                FieldDecl::of::<i64>("Count"),
                FieldDecl::of::<f32>("Ratio"),
                FieldDecl::of::<String>("Note").tag(",noindex"),
                FieldDecl::of::<Vec<u8>>("Blob"),
                FieldDecl::of::<Timestamp>("Seen"),
                FieldDecl::of::<Option<Key>>("Owner"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match index {
            0 => FieldRef::Scalar(&self.count),
            1 => FieldRef::Scalar(&self.ratio),
            2 => FieldRef::Scalar(&self.note),
            3 => FieldRef::Scalar(&self.blob),
            4 => FieldRef::Scalar(&self.seen),
            5 => FieldRef::Scalar(&self.owner),
            _ => return None,
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match index {
            0 => FieldMut::Scalar(&mut self.count),
            1 => FieldMut::Scalar(&mut self.ratio),
            2 => FieldMut::Scalar(&mut self.note),
            3 => FieldMut::Scalar(&mut self.blob),
            4 => FieldMut::Scalar(&mut self.seen),
            5 => FieldMut::Scalar(&mut self.owner),
            _ => return None,
        })
    }
}

/// Two named `Flat`s, the second stored under `r`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pair {
    pub left: Flat,
    pub right: Flat,
}

impl Record for Pair {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Pair",
            vec![
                FieldDecl::record::<Flat>("Left"),
                FieldDecl::record::<Flat>("Right").rename("r"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Record(&self.left)),
            1 => Some(FieldRef::Record(&self.right)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Record(&mut self.left)),
            1 => Some(FieldMut::Record(&mut self.right)),
            _ => None,
        }
    }
}

/// Sequence fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lists {
    pub counts: Vec<i64>,
    pub notes: Vec<String>,
    pub blobs: Vec<Vec<u8>>,
    pub owners: Vec<Key>,
}

impl Record for Lists {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Lists",
            vec![
                FieldDecl::of::<Vec<i64>>("Counts"),
                FieldDecl::of::<Vec<String>>("Notes").noindex(),
                FieldDecl::of::<Vec<Vec<u8>>>("Blobs"),
                FieldDecl::of::<Vec<Key>>("Owners"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match index {
            0 => FieldRef::Sequence(&self.counts),
            1 => FieldRef::Sequence(&self.notes),
            2 => FieldRef::Sequence(&self.blobs),
            3 => FieldRef::Sequence(&self.owners),
            _ => return None,
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match index {
            0 => FieldMut::Sequence(&mut self.counts),
            1 => FieldMut::Sequence(&mut self.notes),
            2 => FieldMut::Sequence(&mut self.blobs),
            3 => FieldMut::Sequence(&mut self.owners),
            _ => return None,
        })
    }
}

/// Embedded into `Outer`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inner {
    pub rev: i64,
}

impl Record for Inner {
    fn shape() -> Shape {
        Shape::new::<Self>("Inner", vec![FieldDecl::of::<i64>("Rev")])
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.rev)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.rev)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outer {
    pub inner: Inner,
    pub name: String,
    pub age: i64,
}

impl Record for Outer {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Outer",
            vec![
                FieldDecl::embedded::<Inner>(),
                FieldDecl::of::<String>("Name"),
                FieldDecl::of::<i64>("Age"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match index {
            0 => FieldRef::Record(&self.inner),
            1 => FieldRef::Scalar(&self.name),
            2 => FieldRef::Scalar(&self.age),
            _ => return None,
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match index {
            0 => FieldMut::Record(&mut self.inner),
            1 => FieldMut::Scalar(&mut self.name),
            2 => FieldMut::Scalar(&mut self.age),
            _ => return None,
        })
    }
}

/// Dictionary field excluded with a skip tag
#[derive(Debug, Default)]
pub struct Skipped {
    pub dict: HashMap<String, String>,
    pub name: String,
}

impl Record for Skipped {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Skipped",
            vec![
                FieldDecl::of::<HashMap<String, String>>("Dict").tag("-"),
                FieldDecl::of::<String>("Name"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            1 => Some(FieldRef::Scalar(&self.name)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            1 => Some(FieldMut::Scalar(&mut self.name)),
            _ => None,
        }
    }
}

/// Two integer fields under the given property names
macro_rules! pair_record {
    ($name:ident, $first:ident: $first_prop:literal, $second:ident: $second_prop:literal) => {
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub $first: i64,
            pub $second: i64,
        }

        impl Record for $name {
            fn shape() -> Shape {
                Shape::new::<Self>(
                    stringify!($name),
                    vec![
                        FieldDecl::of::<i64>($first_prop),
                        FieldDecl::of::<i64>($second_prop),
                    ],
                )
            }

            fn field(&self, index: usize) -> Option<FieldRef<'_>> {
                match index {
                    0 => Some(FieldRef::Scalar(&self.$first)),
                    1 => Some(FieldRef::Scalar(&self.$second)),
                    _ => None,
                }
            }

            fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
                match index {
                    0 => Some(FieldMut::Scalar(&mut self.$first)),
                    1 => Some(FieldMut::Scalar(&mut self.$second)),
                    _ => None,
                }
            }
        }
    };
}

pair_record!(V1, a: "A", b: "B");
pair_record!(V2, a: "A", c: "C");

/// `LegacyB` also loads properties written as `B`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct V3 {
    pub a: i64,
    pub legacy_b: i64,
}

impl Record for V3 {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "V3",
            vec![
                FieldDecl::of::<i64>("A"),
                FieldDecl::of::<i64>("LegacyB").alias("B").noindex(),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.a)),
            1 => Some(FieldRef::Scalar(&self.legacy_b)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.a)),
            1 => Some(FieldMut::Scalar(&mut self.legacy_b)),
            _ => None,
        }
    }
}

/// Declares its shape from a field list and has no accessible fields
macro_rules! shape_only_record {
    ($name:ident, [$($decl:expr),* $(,)?]) => {
        #[derive(Debug, Default)]
        pub struct $name;

        impl Record for $name {
            fn shape() -> Shape {
                Shape::new::<Self>(stringify!($name), vec![$($decl),*])
            }

            fn field(&self, _index: usize) -> Option<FieldRef<'_>> {
                None
            }

            fn field_mut(&mut self, _index: usize) -> Option<FieldMut<'_>> {
                None
            }
        }
    };
}

shape_only_record!(Unmapped, [FieldDecl::of::<HashMap<String, String>>("Dict")]);

shape_only_record!(
    Dup,
    [
        FieldDecl::of::<i64>("A").rename("X"),
        FieldDecl::of::<i64>("B").rename("X"),
    ]
);

shape_only_record!(
    AliasClash,
    [FieldDecl::of::<i64>("A"), FieldDecl::of::<i64>("B").alias("A")]
);

shape_only_record!(
    Node,
    [FieldDecl::of::<i64>("Value"), FieldDecl::record::<Node>("Next")]
);

shape_only_record!(BadAutoNow, [FieldDecl::of::<i64>("Count").auto_now()]);

shape_only_record!(BadTag, [FieldDecl::of::<i64>("A").tag("a,bogus")]);

shape_only_record!(Quiet, [FieldDecl::record::<Outer>("Wrapped").noindex()]);

shape_only_record!(Moved, [FieldDecl::record::<Inner>("New").alias("Old")]);

/// Creation timestamp stamped on first write
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stamped {
    pub created: Timestamp,
    pub updated: Timestamp,
}

impl Record for Stamped {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Stamped",
            vec![
                FieldDecl::of::<Timestamp>("Created").auto_now(),
                FieldDecl::of::<Timestamp>("Updated"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.created)),
            1 => Some(FieldRef::Scalar(&self.updated)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.created)),
            1 => Some(FieldMut::Scalar(&mut self.updated)),
            _ => None,
        }
    }
}

/// Declares a sequence but exposes it as a scalar
#[derive(Debug, Default)]
pub struct Miswired {
    pub values: i64,
}

impl Record for Miswired {
    fn shape() -> Shape {
        Shape::new::<Self>("Miswired", vec![FieldDecl::of::<Vec<i64>>("Values")])
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.values)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.values)),
            _ => None,
        }
    }
}

/// Narrow integer field for overflow tests
#[derive(Debug, Default)]
pub struct Small {
    pub tiny: i8,
}

impl Record for Small {
    fn shape() -> Shape {
        Shape::new::<Self>("Small", vec![FieldDecl::of::<i8>("Tiny")])
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.tiny)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.tiny)),
            _ => None,
        }
    }
}
