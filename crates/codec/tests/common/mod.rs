//! Shared record types for the integration test suites.
//!
//! Import via `mod common;`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Once;
use strata_codec::{FieldDecl, FieldMut, FieldRef, Record, Shape};
use strata_core::{BlobKey, ByteString, GeoPoint, Key, Timestamp};

static INIT_TRACING: Once = Once::new();

/// Route codec logs to the test writer (`RUST_LOG` aware)
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Foo: one field of every kind
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Foo {
    pub integer: i64,
    pub float: f32,
    pub boolean: bool,
    pub string_short: String,
    pub string_long: String,
    pub byte_short: ByteString,
    pub byte_long: Vec<u8>,
    pub time: Timestamp,
    pub geo_point: GeoPoint,
    pub blobstore: BlobKey,
    pub key: Option<Key>,
}

impl Foo {
    pub fn with_integer(integer: i64) -> Self {
        Foo {
            integer,
            ..Foo::default()
        }
    }
}

impl Record for Foo {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Foo",
            vec![
                FieldDecl::of::<i64>("Integer"),
                FieldDecl::of::<f32>("Float"),
                FieldDecl::of::<bool>("Boolean"),
                FieldDecl::of::<String>("StringShort"),
                FieldDecl::of::<String>("StringLong").tag(",noindex"),
                FieldDecl::of::<ByteString>("ByteShort"),
                FieldDecl::of::<Vec<u8>>("ByteLong"),
                FieldDecl::of::<Timestamp>("Time"),
                FieldDecl::of::<GeoPoint>("GeoPoint"),
                FieldDecl::of::<BlobKey>("Blobstore"),
                FieldDecl::of::<Option<Key>>("Key"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match index {
            0 => FieldRef::Scalar(&self.integer),
            1 => FieldRef::Scalar(&self.float),
            2 => FieldRef::Scalar(&self.boolean),
            3 => FieldRef::Scalar(&self.string_short),
            4 => FieldRef::Scalar(&self.string_long),
            5 => FieldRef::Scalar(&self.byte_short),
            6 => FieldRef::Scalar(&self.byte_long),
            7 => FieldRef::Scalar(&self.time),
            8 => FieldRef::Scalar(&self.geo_point),
            9 => FieldRef::Scalar(&self.blobstore),
            10 => FieldRef::Scalar(&self.key),
            _ => return None,
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match index {
            0 => FieldMut::Scalar(&mut self.integer),
            1 => FieldMut::Scalar(&mut self.float),
            2 => FieldMut::Scalar(&mut self.boolean),
            3 => FieldMut::Scalar(&mut self.string_short),
            4 => FieldMut::Scalar(&mut self.string_long),
            5 => FieldMut::Scalar(&mut self.byte_short),
            6 => FieldMut::Scalar(&mut self.byte_long),
            7 => FieldMut::Scalar(&mut self.time),
            8 => FieldMut::Scalar(&mut self.geo_point),
            9 => FieldMut::Scalar(&mut self.blobstore),
            10 => FieldMut::Scalar(&mut self.key),
            _ => return None,
        })
    }
}

// ============================================================================
// Bar: a sequence of keys
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bar {
    pub keys: Vec<Key>,
}

impl Record for Bar {
    fn shape() -> Shape {
        Shape::new::<Self>("Bar", vec![FieldDecl::of::<Vec<Key>>("Keys")])
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Sequence(&self.keys)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Sequence(&mut self.keys)),
            _ => None,
        }
    }
}

// ============================================================================
// Buzz: named nesting, one renamed
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buzz {
    pub foo1: Foo,
    pub foo2: Foo,
    pub foo3: Foo,
}

impl Record for Buzz {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Buzz",
            vec![
                FieldDecl::record::<Foo>("Foo1"),
                FieldDecl::record::<Foo>("Foo2"),
                FieldDecl::record::<Foo>("Foo3").tag("foofoo3"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match index {
            0 => FieldRef::Record(&self.foo1),
            1 => FieldRef::Record(&self.foo2),
            2 => FieldRef::Record(&self.foo3),
            _ => return None,
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match index {
            0 => FieldMut::Record(&mut self.foo1),
            1 => FieldMut::Record(&mut self.foo2),
            2 => FieldMut::Record(&mut self.foo3),
            _ => return None,
        })
    }
}

// ============================================================================
// Slice: a sequence of every kind
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slice {
    pub integers: Vec<i64>,
    pub floats: Vec<f32>,
    pub booleans: Vec<bool>,
    pub string_shorts: Vec<String>,
    pub string_longs: Vec<String>,
    pub byte_shorts: Vec<ByteString>,
    pub byte_longs: Vec<Vec<u8>>,
    pub times: Vec<Timestamp>,
    pub geo_points: Vec<GeoPoint>,
    pub blobstores: Vec<BlobKey>,
    pub key: Vec<Key>,
}

impl Record for Slice {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Slice",
            vec![
                FieldDecl::of::<Vec<i64>>("Integers"),
                FieldDecl::of::<Vec<f32>>("Floats"),
                FieldDecl::of::<Vec<bool>>("Booleans"),
                FieldDecl::of::<Vec<String>>("StringShorts"),
                FieldDecl::of::<Vec<String>>("StringLongs").tag(",noindex"),
                FieldDecl::of::<Vec<ByteString>>("ByteShorts"),
                FieldDecl::of::<Vec<Vec<u8>>>("ByteLongs"),
                FieldDecl::of::<Vec<Timestamp>>("Times"),
                FieldDecl::of::<Vec<GeoPoint>>("GeoPoints"),
                FieldDecl::of::<Vec<BlobKey>>("Blobstores"),
                FieldDecl::of::<Vec<Key>>("Key"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match index {
            0 => FieldRef::Sequence(&self.integers),
            1 => FieldRef::Sequence(&self.floats),
            2 => FieldRef::Sequence(&self.booleans),
            3 => FieldRef::Sequence(&self.string_shorts),
            4 => FieldRef::Sequence(&self.string_longs),
            5 => FieldRef::Sequence(&self.byte_shorts),
            6 => FieldRef::Sequence(&self.byte_longs),
            7 => FieldRef::Sequence(&self.times),
            8 => FieldRef::Sequence(&self.geo_points),
            9 => FieldRef::Sequence(&self.blobstores),
            10 => FieldRef::Sequence(&self.key),
            _ => return None,
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match index {
            0 => FieldMut::Sequence(&mut self.integers),
            1 => FieldMut::Sequence(&mut self.floats),
            2 => FieldMut::Sequence(&mut self.booleans),
            3 => FieldMut::Sequence(&mut self.string_shorts),
            4 => FieldMut::Sequence(&mut self.string_longs),
            5 => FieldMut::Sequence(&mut self.byte_shorts),
            6 => FieldMut::Sequence(&mut self.byte_longs),
            7 => FieldMut::Sequence(&mut self.times),
            8 => FieldMut::Sequence(&mut self.geo_points),
            9 => FieldMut::Sequence(&mut self.blobstores),
            10 => FieldMut::Sequence(&mut self.key),
            _ => return None,
        })
    }
}

// ============================================================================
// Map: unsupported field type
// ============================================================================

#[derive(Debug, Default)]
pub struct Map {
    pub dict: HashMap<String, String>,
}

impl Record for Map {
    fn shape() -> Shape {
        Shape::new::<Self>("Map", vec![FieldDecl::of::<HashMap<String, String>>("Dict")])
    }

    fn field(&self, _index: usize) -> Option<FieldRef<'_>> {
        None
    }

    fn field_mut(&mut self, _index: usize) -> Option<FieldMut<'_>> {
        None
    }
}

// ============================================================================
// Main: embeds Sub
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sub {
    pub rev: i64,
}

impl Record for Sub {
    fn shape() -> Shape {
        Shape::new::<Self>("Sub", vec![FieldDecl::of::<i64>("Rev")])
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
pub struct Main {
    pub sub: Sub,
    pub name: String,
    pub age: i32,
}

impl Record for Main {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Main",
            vec![
                FieldDecl::embedded::<Sub>(),
                FieldDecl::of::<String>("Name"),
                FieldDecl::of::<i32>("Age"),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match index {
            0 => FieldRef::Record(&self.sub),
            1 => FieldRef::Scalar(&self.name),
            2 => FieldRef::Scalar(&self.age),
            _ => return None,
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match index {
            0 => FieldMut::Record(&mut self.sub),
            1 => FieldMut::Scalar(&mut self.name),
            2 => FieldMut::Scalar(&mut self.age),
            _ => return None,
        })
    }
}

// ============================================================================
// Schema drift: Before -> After1 (no hint), Before -> After2 (alias)
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Before {
    pub a: i64,
    pub b: i64,
}

impl Record for Before {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "Before",
            vec![FieldDecl::of::<i64>("A"), FieldDecl::of::<i64>("B")],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.a)),
            1 => Some(FieldRef::Scalar(&self.b)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.a)),
            1 => Some(FieldMut::Scalar(&mut self.b)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct After1 {
    pub a: i64,
    pub c: i64,
}

impl Record for After1 {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "After1",
            vec![FieldDecl::of::<i64>("A"), FieldDecl::of::<i64>("C")],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.a)),
            1 => Some(FieldRef::Scalar(&self.c)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.a)),
            1 => Some(FieldMut::Scalar(&mut self.c)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct After2 {
    pub a: i64,
    pub c: i64,
    pub deprecated_b: i64,
}

impl Record for After2 {
    fn shape() -> Shape {
        Shape::new::<Self>(
            "After2",
            vec![
                FieldDecl::of::<i64>("A"),
                FieldDecl::of::<i64>("C"),
                FieldDecl::of::<i64>("DeprecatedB").alias("B").noindex(),
            ],
        )
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match index {
            0 => FieldRef::Scalar(&self.a),
            1 => FieldRef::Scalar(&self.c),
            2 => FieldRef::Scalar(&self.deprecated_b),
            _ => return None,
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match index {
            0 => FieldMut::Scalar(&mut self.a),
            1 => FieldMut::Scalar(&mut self.c),
            2 => FieldMut::Scalar(&mut self.deprecated_b),
            _ => return None,
        })
    }
}
