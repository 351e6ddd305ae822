//! The type classifier.
//!
//! [`classify`] maps a [`Shape`] to its rendering [`Category`]. The
//! classification rules have a fixed priority (string, enumeration,
//! primitive, nullable, enumerable, complex, first match wins); in this
//! crate the priority is discharged where shapes are constructed, so a
//! `String` reflects as text and is never seen as a collection of chars,
//! and nothing ever matches two rules at once.
//!
//! [`is_simple`] and [`is_simple_enumerable`] are diagnostic predicates;
//! they do not influence rendering.
//!
//! ## Examples
//!
//! ```rust
//! use autostring::{classify, Category, Reflect};
//!
//! assert_eq!(classify(&String::shape()), Category::String);
//! assert_eq!(classify(&<Option<i32>>::shape()), Category::Nullable);
//! assert_eq!(classify(&<Vec<String>>::shape()), Category::Enumerable);
//! ```

use crate::reflect::{Kind, Shape};

/// The classifier's output: which rendering strategy family applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    String,
    Primitive,
    Enumeration,
    Nullable,
    Enumerable,
    Complex,
}

/// Classifies a shape. Deterministic and pure.
#[must_use]
pub fn classify(shape: &Shape) -> Category {
    match shape.kind {
        Kind::Text => Category::String,
        Kind::Enumeration => Category::Enumeration,
        Kind::Primitive => Category::Primitive,
        Kind::Nullable { .. } => Category::Nullable,
        Kind::Enumerable { .. } => Category::Enumerable,
        Kind::Record { .. } => Category::Complex,
    }
}

/// Returns `true` for primitive, string, and enumeration shapes, and for
/// nullables whose inner shape is itself simple.
///
/// # Examples
///
/// ```rust
/// use autostring::{is_simple, Reflect};
///
/// assert!(is_simple(&i32::shape()));
/// assert!(is_simple(&<Option<i32>>::shape()));
/// assert!(!is_simple(&<Vec<i32>>::shape()));
/// ```
#[must_use]
pub fn is_simple(shape: &Shape) -> bool {
    match shape.kind {
        Kind::Text | Kind::Primitive | Kind::Enumeration => true,
        Kind::Nullable { inner } => is_simple(&inner()),
        Kind::Enumerable { .. } | Kind::Record { .. } => false,
    }
}

/// Returns `true` for enumerable shapes whose element shape is simple.
///
/// Used to spot collections of plain values in diagnostics; rendering does
/// not branch on it.
#[must_use]
pub fn is_simple_enumerable(shape: &Shape) -> bool {
    match shape.kind {
        Kind::Enumerable { element } => is_simple(&element()),
        _ => false,
    }
}
