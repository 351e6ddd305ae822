//! Error types for the auto-stringification engine.
//!
//! Rendering itself never fails: every shape is classifiable, and the
//! automatic record rendering is the universal fallback. Errors only arise
//! from configuration mistakes surfaced synchronously to the caller that
//! attempted them:
//!
//! - Registering a rendering function tagged with the [`Invalid`] provenance
//! - Naming an unrecognized bracket style on the configuration surface
//!
//! [`Invalid`]: crate::MethodSource::Invalid
//!
//! ## Examples
//!
//! ```rust
//! use autostring::Bracket;
//! use std::str::FromStr;
//!
//! let err = Bracket::from_str("wavy").unwrap_err();
//! assert!(err.to_string().contains("wavy"));
//! ```

use crate::source::MethodSource;
use thiserror::Error;

/// All errors the engine can report.
///
/// There is deliberately no "not found" variant: a type that was never
/// registered simply gets a function generated for it on first use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A rendering function may not be registered with this provenance.
    ///
    /// [`MethodSource::Invalid`] is a sentinel produced by a failed
    /// conversion probe and never describes a usable function.
    #[error("rendering functions with source {0:?} cannot be registered")]
    InvalidSource(MethodSource),

    /// An unrecognized bracket style name on the configuration surface.
    #[error("unknown bracket style {0:?} (expected one of: none, curly, square, angle, parenthesis, double-quote, single-quote)")]
    UnknownBracket(String),
}

impl Error {
    /// Creates an invalid-source error.
    pub fn invalid_source(source: MethodSource) -> Self {
        Error::InvalidSource(source)
    }

    /// Creates an unknown-bracket error from the offending name.
    pub fn unknown_bracket(name: &str) -> Self {
        Error::UnknownBracket(name.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
