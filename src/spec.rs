//! The schema vocabulary: which token shapes a destination admits and where
//! decoded values land.
//!
//! A consumer describes one object shape as a slice of [`FieldSpec`]s, each
//! pairing a key name with a [`ValueSpec`]. The constructors on both types
//! keep the admissible-kind mask and the active [`Sink`] variant consistent,
//! so a mismatched kind/binding pair cannot be expressed.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use smallvec::SmallVec;

use crate::decode::{ArrayElement, Decoder};
use crate::Result;

/// Bitmask of JSON token shapes. A destination may legally accept more than
/// one shape, e.g. a reference field declaring `Kind::OBJECT | Kind::NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Kind(u8);

impl Kind {
    pub const NONE: Kind = Kind(0);
    pub const STRING: Kind = Kind(1 << 0);
    pub const INTEGER: Kind = Kind(1 << 1);
    pub const FLOAT: Kind = Kind(1 << 2);
    pub const BOOLEAN: Kind = Kind(1 << 3);
    pub const NULL: Kind = Kind(1 << 4);
    pub const ARRAY: Kind = Kind(1 << 5);
    pub const OBJECT: Kind = Kind(1 << 6);

    /// Union usable in const context, where `|` is not.
    pub const fn union(self, other: Kind) -> Kind {
        Kind(self.0 | other.0)
    }

    pub fn intersects(self, other: Kind) -> bool {
        self.0 & other.0 != 0
    }

    pub fn contains(self, other: Kind) -> bool {
        self.0 & other.0 == other.0
    }

    fn names(self) -> SmallVec<[&'static str; 7]> {
        let mut names = SmallVec::new();
        for (bit, name) in [
            (Kind::STRING, "string"),
            (Kind::INTEGER, "integer"),
            (Kind::FLOAT, "float"),
            (Kind::BOOLEAN, "boolean"),
            (Kind::NULL, "null"),
            (Kind::ARRAY, "array"),
            (Kind::OBJECT, "object"),
        ] {
            if self.intersects(bit) {
                names.push(name);
            }
        }
        names
    }
}

impl BitOr for Kind {
    type Output = Kind;

    fn bitor(self, rhs: Kind) -> Kind {
        self.union(rhs)
    }
}

impl BitOrAssign for Kind {
    fn bitor_assign(&mut self, rhs: Kind) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.names();
        if names.is_empty() {
            return f.write_str("nothing");
        }
        f.write_str(&names.join(" or "))
    }
}

/// Constructor for a nested object bound to one destination.
///
/// `parse_into` is called with the cursor on the opening `{`; the usual
/// implementation builds a [`FieldSpec`] table over its own destination and
/// calls [`Decoder::parse_object`]. Any `FnMut(&mut Decoder) -> Result<()>`
/// qualifies. `set_null` runs when a `null` stands where the object would
/// be, for fields that declared [`Kind::NULL`] as admissible.
pub trait ObjectTarget {
    fn parse_into(&mut self, decoder: &mut Decoder<'_>) -> Result<()>;

    fn set_null(&mut self) {}
}

impl<F> ObjectTarget for F
where
    F: FnMut(&mut Decoder<'_>) -> Result<()>,
{
    fn parse_into(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
        self(decoder)
    }
}

/// Constructor for a nested array bound to one destination, called with the
/// cursor on the opening `[`. [`BindArray`] covers the common case of a
/// `Vec` destination.
pub trait ArrayTarget {
    fn parse_into(&mut self, decoder: &mut Decoder<'_>) -> Result<()>;

    fn set_null(&mut self) {}
}

/// Adapts a `&mut Vec<T>` destination to an [`ArrayTarget`].
pub struct BindArray<'a, T: ArrayElement>(pub &'a mut Vec<T>);

impl<T: ArrayElement> ArrayTarget for BindArray<'_, T> {
    fn parse_into(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
        *self.0 = decoder.parse_array()?;
        Ok(())
    }

    fn set_null(&mut self) {
        self.0.clear();
    }
}

/// Exactly one destination binding for a decoded value.
pub enum Sink<'a> {
    /// Validate the token and discard it.
    Ignore,
    Str(&'a mut String),
    Int(&'a mut i32),
    Float(&'a mut f32),
    Bool(&'a mut bool),
    Object(Box<dyn ObjectTarget + 'a>),
    Array(Box<dyn ArrayTarget + 'a>),
}

impl Sink<'_> {
    /// Clear the destination to empty/absent after a `null` token. Integer,
    /// float and boolean destinations have no absent state and are left
    /// untouched.
    pub(crate) fn set_null(&mut self) {
        match self {
            Sink::Str(dst) => dst.clear(),
            Sink::Object(target) => target.set_null(),
            Sink::Array(target) => target.set_null(),
            _ => {}
        }
    }
}

impl fmt::Debug for Sink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sink::Ignore => "Ignore",
            Sink::Str(_) => "Str",
            Sink::Int(_) => "Int",
            Sink::Float(_) => "Float",
            Sink::Bool(_) => "Bool",
            Sink::Object(_) => "Object",
            Sink::Array(_) => "Array",
        };
        f.write_str(name)
    }
}

/// Pairing of an admissible-kind mask with one destination binding.
#[derive(Debug)]
pub struct ValueSpec<'a> {
    pub kinds: Kind,
    pub sink: Sink<'a>,
}

impl<'a> ValueSpec<'a> {
    pub fn string(dst: &'a mut String) -> Self {
        Self {
            kinds: Kind::STRING,
            sink: Sink::Str(dst),
        }
    }

    pub fn integer(dst: &'a mut i32) -> Self {
        Self {
            kinds: Kind::INTEGER,
            sink: Sink::Int(dst),
        }
    }

    /// A float destination also admits integer-shaped tokens: `1` is as good
    /// a float as `1.0`.
    pub fn float(dst: &'a mut f32) -> Self {
        Self {
            kinds: Kind::FLOAT | Kind::INTEGER,
            sink: Sink::Float(dst),
        }
    }

    pub fn boolean(dst: &'a mut bool) -> Self {
        Self {
            kinds: Kind::BOOLEAN,
            sink: Sink::Bool(dst),
        }
    }

    pub fn object(target: impl ObjectTarget + 'a) -> Self {
        Self {
            kinds: Kind::OBJECT,
            sink: Sink::Object(Box::new(target)),
        }
    }

    pub fn array<T: ArrayElement>(dst: &'a mut Vec<T>) -> Self {
        Self::array_target(BindArray(dst))
    }

    pub fn array_target(target: impl ArrayTarget + 'a) -> Self {
        Self {
            kinds: Kind::ARRAY,
            sink: Sink::Array(Box::new(target)),
        }
    }

    /// Validate against `kinds` but bind nothing.
    pub fn ignore(kinds: Kind) -> Self {
        Self {
            kinds,
            sink: Sink::Ignore,
        }
    }

    /// Additionally admit `null`; the destination is cleared when it occurs.
    pub fn nullable(mut self) -> Self {
        self.kinds |= Kind::NULL;
        self
    }
}

/// Named [`ValueSpec`] used for object-key lookup. Slice order defines
/// lookup order only, not a required key order in the JSON text.
#[derive(Debug)]
pub struct FieldSpec<'a> {
    pub name: &'a str,
    pub value: ValueSpec<'a>,
}

impl<'a> FieldSpec<'a> {
    pub fn new(name: &'a str, value: ValueSpec<'a>) -> Self {
        Self { name, value }
    }

    pub fn string(name: &'a str, dst: &'a mut String) -> Self {
        Self::new(name, ValueSpec::string(dst))
    }

    pub fn integer(name: &'a str, dst: &'a mut i32) -> Self {
        Self::new(name, ValueSpec::integer(dst))
    }

    pub fn float(name: &'a str, dst: &'a mut f32) -> Self {
        Self::new(name, ValueSpec::float(dst))
    }

    pub fn boolean(name: &'a str, dst: &'a mut bool) -> Self {
        Self::new(name, ValueSpec::boolean(dst))
    }

    pub fn object(name: &'a str, target: impl ObjectTarget + 'a) -> Self {
        Self::new(name, ValueSpec::object(target))
    }

    pub fn array<T: ArrayElement>(name: &'a str, dst: &'a mut Vec<T>) -> Self {
        Self::new(name, ValueSpec::array(dst))
    }

    pub fn nullable(mut self) -> Self {
        self.value = self.value.nullable();
        self
    }
}
