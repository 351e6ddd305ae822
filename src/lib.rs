//! # autostring
//!
//! Automatic human-readable string rendering for arbitrary values, without
//! requiring each type to implement a formatting method itself.
//!
//! ## How it works
//!
//! Hand the [`Engine`] any value whose type implements [`Reflect`]. The
//! engine classifies the type's [`Shape`] into a [`Category`] (string,
//! primitive, enumeration, nullable, enumerable, or complex), generates a
//! rendering function for that category, and caches the function per type,
//! so repeated renders of the same type are cheap. For complex types the
//! engine may use the type's own string conversion instead of field
//! enumeration, gated by a [`SourceRestriction`] policy, and callers can
//! override everything per type with [`Engine::register_custom`].
//!
//! ## Quick Start
//!
//! ```rust
//! use autostring::{reflect, Engine};
//!
//! struct User {
//!     name: String,
//!     age: Option<u32>,
//! }
//! reflect!(struct User { name: String, age: Option<u32> });
//!
//! let engine = Engine::new();
//! let user = User { name: "Alice".to_string(), age: None };
//! assert_eq!(engine.render(&user), "{name: \"Alice\", age: <null>}");
//! assert_eq!(engine.render(&vec![5, 3]), "[3, 5]");
//! assert_eq!(engine.render(&None::<i32>), "<null>");
//! ```
//!
//! ## Key behaviors
//!
//! - **Universal fallback**: every type is classifiable, so rendering
//!   never fails. Complex types without their own conversion render as
//!   `{field: value, ...}` in declaration order.
//! - **Normalized collections**: enumerable elements are sorted by their
//!   rendered text (placeholder-valued entries first), so two collections
//!   that differ only by insertion order render identically. The sort is
//!   textual: `[10, 2]`, not `[2, 10]`.
//! - **Method-source policy**: whether a complex type's own `Display`
//!   (declared or delegated) may be used is controlled by
//!   [`SourceRestriction`]; changing the policy rebuilds exactly the
//!   affected cache entries.
//! - **Sticky overrides**: custom functions survive settings and policy
//!   changes until explicitly removed.
//! - **No hidden state**: each [`Engine`] owns its settings, policy, and
//!   cache; independent engines coexist freely, and one engine is safe to
//!   share across threads.
//!
//! ## Configuration
//!
//! [`Settings`] selects the null placeholder text and a [`Bracket`] per
//! category:
//!
//! ```rust
//! use autostring::{Bracket, Engine, Settings};
//!
//! let engine = Engine::with_settings(
//!     Settings::new()
//!         .with_null_text("?")
//!         .with_enumerable_bracket(Bracket::Parenthesis),
//! );
//! assert_eq!(engine.render(&vec![Some(2i32), None]), "(<?>, 2)");
//! ```
//!
//! ## One-shot rendering
//!
//! [`render`] and [`render_with`] spin up a throwaway engine for a single
//! value; use a long-lived [`Engine`] when the per-type function cache
//! should pay off.

pub mod classify;
pub mod engine;
pub mod error;
pub mod generate;
pub mod macros;
pub mod reflect;
pub mod settings;
pub mod source;
pub mod subject;

pub use classify::{classify, is_simple, is_simple_enumerable, Category};
pub use engine::{Engine, RenderFn};
pub use error::{Error, Result};
pub use reflect::{Conversion, Field, Kind, Reflect, Shape, TypeKey};
pub use settings::{Bracket, Settings};
pub use source::{MethodSource, SourceRestriction};
pub use subject::{Node, RecordView, Subject};

/// Renders a value on a throwaway engine with default settings.
///
/// Convenience for one-off use; nothing is memoized across calls. Use an
/// [`Engine`] when rendering many values of the same types.
///
/// # Examples
///
/// ```rust
/// use autostring::render;
///
/// assert_eq!(render(&42i32), "42");
/// assert_eq!(render(&"hi".to_string()), "\"hi\"");
/// assert_eq!(render(&None::<bool>), "<null>");
/// ```
#[must_use]
pub fn render<T: Reflect>(value: &T) -> String {
    Engine::new().render(value)
}

/// Renders a value on a throwaway engine with the given settings.
///
/// # Examples
///
/// ```rust
/// use autostring::{render_with, Bracket, Settings};
///
/// let settings = Settings::new().with_primitive_bracket(Bracket::Angle);
/// assert_eq!(render_with(&42i32, settings), "<42>");
/// ```
#[must_use]
pub fn render_with<T: Reflect>(value: &T, settings: Settings) -> String {
    Engine::with_settings(settings).render(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_render() {
        assert_eq!(render(&5i32), "5");
        assert_eq!(render(&3.5f64), "3.5");
        assert_eq!(render(&true), "true");
        assert_eq!(render(&'x'), "x");
        assert_eq!(render(&"text".to_string()), "\"text\"");
    }

    #[test]
    fn one_shot_render_with_settings() {
        let settings = Settings::new().with_string_bracket(Bracket::SingleQuote);
        assert_eq!(render_with(&"text".to_string(), settings), "'text'");
    }

    #[test]
    fn nested_collections() {
        assert_eq!(render(&vec![vec![2i32, 1], vec![3]]), "[[1, 2], [3]]");
    }

    #[test]
    fn nullable_values() {
        assert_eq!(render(&Some(7i32)), "7");
        assert_eq!(render(&None::<i32>), "<null>");
        assert_eq!(render(&vec![Some(2i32), None, Some(1)]), "[<null>, 1, 2]");
    }
}
