//! The reflection capability interface the engine consumes.
//!
//! Rust has no runtime reflection, so the engine works from two pieces of
//! per-type information supplied through the [`Reflect`] trait:
//!
//! - [`Reflect::shape`]: the static structure of the type, its [`TypeKey`]
//!   identity, display name, and [`Kind`] (text, primitive, enumeration,
//!   nullable-of, enumerable-of, or record-with-fields)
//! - [`Reflect::subject`]: a borrowed structural view of one value
//!   ([`Subject`]), which the generated rendering functions consume
//!
//! Implementations are provided for the standard primitive widths,
//! `String`, `&'static str`, `char`, `bool`, [`chrono::DateTime<Utc>`],
//! [`num_bigint::BigInt`], `Option<T>`, `Vec<T>`, `[T; N]`, `VecDeque<T>`,
//! `HashSet<T>`, and `BTreeSet<T>`. User record and enumeration types
//! implement the trait with the [`reflect!`] macro.
//!
//! Nested shapes are reached through `fn() -> Shape` thunks rather than
//! owned descriptors, which keeps [`Shape`] `Copy` and `'static`.
//!
//! [`reflect!`]: crate::reflect!
//!
//! ## Examples
//!
//! ```rust
//! use autostring::{Kind, Reflect};
//!
//! let shape = <Vec<i32>>::shape();
//! assert!(matches!(shape.kind, Kind::Enumerable { .. }));
//! if let Kind::Enumerable { element } = shape.kind {
//!     assert!(matches!(element().kind, Kind::Primitive));
//! }
//! ```

use crate::source::MethodSource;
use crate::subject::Subject;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use std::any::TypeId;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Opaque identity of a subject type; the cache key.
///
/// # Examples
///
/// ```rust
/// use autostring::TypeKey;
///
/// assert_eq!(TypeKey::of::<i32>(), TypeKey::of::<i32>());
/// assert_ne!(TypeKey::of::<i32>(), TypeKey::of::<u32>());
/// // Same element type, different containers: distinct identities.
/// assert_ne!(TypeKey::of::<Vec<i32>>(), TypeKey::of::<[i32; 3]>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey(TypeId);

impl TypeKey {
    /// The key of type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        TypeKey(TypeId::of::<T>())
    }
}

/// Static structure of a subject type.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// Identity used as the cache key.
    pub key: TypeKey,
    /// Simple display name (used verbatim in enumeration rendering).
    pub name: &'static str,
    /// Structural taxonomy.
    pub kind: Kind,
}

/// Structural taxonomy of a subject type.
#[derive(Clone, Copy, Debug)]
pub enum Kind {
    /// A string.
    Text,
    /// A numeric, boolean, or char-like scalar.
    Primitive,
    /// A unit-variant enumeration.
    Enumeration,
    /// An optional wrapper around a single inner value.
    Nullable {
        /// Shape of the wrapped type.
        inner: fn() -> Shape,
    },
    /// A homogeneous collection.
    Enumerable {
        /// Shape of the element type.
        element: fn() -> Shape,
    },
    /// Anything else: a record with named public fields.
    Record {
        /// Fields in declaration order.
        fields: &'static [Field],
        /// The type's own string conversion, if it declares one.
        conversion: Option<Conversion>,
    },
}

/// One named field of a record shape.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// Field name as declared.
    pub name: &'static str,
    /// Shape of the field's type.
    pub shape: fn() -> Shape,
}

/// Where a record's own string conversion comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// The type implements the conversion itself.
    Declared,
    /// The conversion is inherited/delegated from another type
    /// (a wrapper forwarding an inner type's `Display`).
    Inherited,
}

impl Conversion {
    /// The provenance a function generated from this conversion carries.
    #[inline]
    #[must_use]
    pub const fn source(self) -> MethodSource {
        match self {
            Conversion::Declared => MethodSource::DeclaringMethod,
            Conversion::Inherited => MethodSource::ParentMethod,
        }
    }
}

/// A type the engine can auto-stringify.
///
/// `shape` describes the type, `subject` views one value. The two must
/// agree: a `Record` shape with three fields must produce record subjects
/// with three field subjects in the same order.
pub trait Reflect: 'static {
    /// Static structure of this type.
    fn shape() -> Shape;

    /// Structural view of this value.
    fn subject(&self) -> Subject<'_>;
}

macro_rules! impl_reflect_primitive {
    ($($ty:ty => $name:expr),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape {
                        key: TypeKey::of::<$ty>(),
                        name: $name,
                        kind: Kind::Primitive,
                    }
                }

                fn subject(&self) -> Subject<'_> {
                    Subject::primitive(self, self.to_string())
                }
            }
        )*
    };
}

impl_reflect_primitive! {
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    BigInt => "BigInt",
}

impl Reflect for DateTime<Utc> {
    fn shape() -> Shape {
        Shape {
            key: TypeKey::of::<Self>(),
            name: "DateTime",
            kind: Kind::Primitive,
        }
    }

    fn subject(&self) -> Subject<'_> {
        Subject::primitive(self, self.to_rfc3339())
    }
}

impl Reflect for String {
    fn shape() -> Shape {
        Shape {
            key: TypeKey::of::<String>(),
            name: "String",
            kind: Kind::Text,
        }
    }

    fn subject(&self) -> Subject<'_> {
        Subject::text(self, self.as_str())
    }
}

impl Reflect for &'static str {
    fn shape() -> Shape {
        Shape {
            key: TypeKey::of::<&'static str>(),
            name: "str",
            kind: Kind::Text,
        }
    }

    fn subject(&self) -> Subject<'_> {
        Subject::text(self, *self)
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape {
            key: TypeKey::of::<Self>(),
            name: "Option",
            kind: Kind::Nullable {
                inner: <T as Reflect>::shape,
            },
        }
    }

    fn subject(&self) -> Subject<'_> {
        Subject::nullable(self, self.as_ref().map(Reflect::subject))
    }
}

macro_rules! impl_reflect_seq {
    ($($ty:ident $(: $($bound:path),+)? => $name:expr),* $(,)?) => {
        $(
            impl<T: Reflect $($(+ $bound)+)?> Reflect for $ty<T> {
                fn shape() -> Shape {
                    Shape {
                        key: TypeKey::of::<Self>(),
                        name: $name,
                        kind: Kind::Enumerable {
                            element: <T as Reflect>::shape,
                        },
                    }
                }

                fn subject(&self) -> Subject<'_> {
                    Subject::seq(self, self.iter().map(Reflect::subject).collect())
                }
            }
        )*
    };
}

impl_reflect_seq! {
    Vec => "Vec",
    VecDeque => "VecDeque",
    HashSet: Eq, std::hash::Hash => "HashSet",
    BTreeSet: Ord => "BTreeSet",
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> Shape {
        Shape {
            key: TypeKey::of::<Self>(),
            name: "array",
            kind: Kind::Enumerable {
                element: <T as Reflect>::shape,
            },
        }
    }

    fn subject(&self) -> Subject<'_> {
        Subject::seq(self, self.iter().map(Reflect::subject).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_shapes() {
        assert!(matches!(i32::shape().kind, Kind::Primitive));
        assert!(matches!(bool::shape().kind, Kind::Primitive));
        assert!(matches!(String::shape().kind, Kind::Text));
        assert_eq!(i32::shape().name, "i32");
    }

    #[test]
    fn nullable_shape_records_inner() {
        let shape = <Option<String>>::shape();
        match shape.kind {
            Kind::Nullable { inner } => assert!(matches!(inner().kind, Kind::Text)),
            other => panic!("expected Nullable, got {:?}", other),
        }
    }

    #[test]
    fn enumerable_shape_records_element() {
        let shape = <Vec<Option<i32>>>::shape();
        match shape.kind {
            Kind::Enumerable { element } => {
                assert!(matches!(element().kind, Kind::Nullable { .. }));
            }
            other => panic!("expected Enumerable, got {:?}", other),
        }
    }

    #[test]
    fn string_is_text_not_enumerable() {
        // A string must classify by the earlier rule, never as a
        // collection of chars.
        assert!(matches!(String::shape().kind, Kind::Text));
        assert!(matches!(<&'static str>::shape().kind, Kind::Text));
    }

    #[test]
    fn keys_are_per_container() {
        assert_ne!(
            <Vec<i32>>::shape().key,
            <std::collections::HashSet<i32>>::shape().key
        );
        assert_eq!(<Vec<i32>>::shape().key, TypeKey::of::<Vec<i32>>());
    }

    #[test]
    fn conversion_sources() {
        assert_eq!(Conversion::Declared.source(), MethodSource::DeclaringMethod);
        assert_eq!(Conversion::Inherited.source(), MethodSource::ParentMethod);
    }

    #[test]
    fn datetime_renders_rfc3339() {
        use chrono::TimeZone;
        let dt = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
        let subject = dt.subject();
        match subject.node() {
            crate::subject::Node::Primitive(text) => {
                assert!(text.starts_with("2021-06-01T12:00:00"));
            }
            other => panic!("expected Primitive, got {:?}", other),
        }
    }
}
