//! The `reflect!` macro: [`Reflect`] impls for user types.
//!
//! [`Reflect`]: crate::Reflect
//!
//! Four forms:
//!
//! ```rust
//! use autostring::reflect;
//! use std::fmt;
//!
//! struct Point { x: i32, y: i32 }
//! reflect!(struct Point { x: i32, y: i32 });
//!
//! struct Tag { label: String }
//! impl fmt::Display for Tag {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "tag:{}", self.label)
//!     }
//! }
//! // The type declares its own string conversion.
//! reflect!(struct Tag { label: String } with display);
//!
//! struct TagAlias { inner: Tag }
//! impl fmt::Display for TagAlias {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         self.inner.fmt(f) // delegated, not its own
//!     }
//! }
//! reflect!(struct TagAlias { inner: Tag } with inherited display);
//!
//! enum Color { Red, Green, Blue }
//! reflect!(enum Color { Red, Green, Blue });
//! ```
//!
//! `with display` requires a `Display` impl and tags the conversion as
//! declared by the type itself; `with inherited display` tags it as
//! delegated from another type, which a stricter source restriction can
//! rule out while still permitting declared conversions.

/// Implements [`Reflect`](crate::Reflect) for a user record or
/// unit-variant enumeration.
#[macro_export]
macro_rules! reflect {
    // Record without its own string conversion
    (struct $ty:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        $crate::reflect!(@record $ty, ::core::option::Option::None, { $($field : $fty),* });
    };

    // Record whose Display impl is its own conversion
    (struct $ty:ident { $($field:ident : $fty:ty),* $(,)? } with display) => {
        $crate::reflect!(@record_display $ty, $crate::Conversion::Declared, { $($field : $fty),* });
    };

    // Record whose Display impl is delegated from another type
    (struct $ty:ident { $($field:ident : $fty:ty),* $(,)? } with inherited display) => {
        $crate::reflect!(@record_display $ty, $crate::Conversion::Inherited, { $($field : $fty),* });
    };

    // Unit-variant enumeration
    (enum $ty:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape {
                    key: $crate::TypeKey::of::<$ty>(),
                    name: stringify!($ty),
                    kind: $crate::Kind::Enumeration,
                }
            }

            fn subject(&self) -> $crate::Subject<'_> {
                let variant = match self {
                    $( $ty::$variant => stringify!($variant) ),*
                };
                $crate::Subject::enumeration(self, variant)
            }
        }
    };

    (@record $ty:ident, $conversion:expr, { $($field:ident : $fty:ty),* }) => {
        impl $crate::Reflect for $ty {
            fn shape() -> $crate::Shape {
                const FIELDS: &[$crate::Field] = &[
                    $(
                        $crate::Field {
                            name: stringify!($field),
                            shape: <$fty as $crate::Reflect>::shape,
                        }
                    ),*
                ];
                $crate::Shape {
                    key: $crate::TypeKey::of::<$ty>(),
                    name: stringify!($ty),
                    kind: $crate::Kind::Record {
                        fields: FIELDS,
                        conversion: $conversion,
                    },
                }
            }

            fn subject(&self) -> $crate::Subject<'_> {
                $crate::Subject::record(
                    self,
                    vec![$( $crate::Reflect::subject(&self.$field) ),*],
                )
            }
        }
    };

    (@record_display $ty:ident, $conversion:expr, { $($field:ident : $fty:ty),* }) => {
        impl $crate::Reflect for $ty {
            fn shape() -> $crate::Shape {
                const FIELDS: &[$crate::Field] = &[
                    $(
                        $crate::Field {
                            name: stringify!($field),
                            shape: <$fty as $crate::Reflect>::shape,
                        }
                    ),*
                ];
                $crate::Shape {
                    key: $crate::TypeKey::of::<$ty>(),
                    name: stringify!($ty),
                    kind: $crate::Kind::Record {
                        fields: FIELDS,
                        conversion: ::core::option::Option::Some($conversion),
                    },
                }
            }

            fn subject(&self) -> $crate::Subject<'_> {
                $crate::Subject::record(
                    self,
                    vec![$( $crate::Reflect::subject(&self.$field) ),*],
                )
                .with_display(self)
            }
        }
    };
}
