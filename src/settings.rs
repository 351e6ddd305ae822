//! Formatting settings for rendered output.
//!
//! This module provides the configuration surface of the engine:
//!
//! - [`Bracket`]: a pair of enclosure characters (or none) wrapping a
//!   rendered string
//! - [`Settings`]: the null placeholder text plus one bracket choice per
//!   value category
//!
//! Both types derive serde traits, so settings can be loaded from a config
//! file, and [`Bracket`] parses from the style names `none`, `curly`,
//! `square`, `angle`, `parenthesis`, `double-quote`, `single-quote`.
//!
//! ## Examples
//!
//! ```rust
//! use autostring::{Bracket, Settings, Engine};
//!
//! let settings = Settings::new()
//!     .with_null_text("?")
//!     .with_enumerable_bracket(Bracket::Parenthesis);
//!
//! let engine = Engine::with_settings(settings);
//! assert_eq!(engine.render(&vec![2, 1]), "(1, 2)");
//! assert_eq!(engine.render(&None::<i32>), "<?>");
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A pair of wrapping characters for rendered text.
///
/// # Examples
///
/// ```rust
/// use autostring::Bracket;
///
/// assert_eq!(Bracket::Curly.wrap("x"), "{x}");
/// assert_eq!(Bracket::None.wrap("x"), "x");
/// assert_eq!(Bracket::DoubleQuote.wrap("x"), "\"x\"");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bracket {
    #[default]
    None,
    Curly,
    Square,
    Angle,
    Parenthesis,
    DoubleQuote,
    SingleQuote,
}

impl Bracket {
    /// Returns the opening/closing pair, or `None` for [`Bracket::None`].
    #[must_use]
    pub const fn pair(&self) -> Option<(char, char)> {
        match self {
            Bracket::None => None,
            Bracket::Curly => Some(('{', '}')),
            Bracket::Square => Some(('[', ']')),
            Bracket::Angle => Some(('<', '>')),
            Bracket::Parenthesis => Some(('(', ')')),
            Bracket::DoubleQuote => Some(('"', '"')),
            Bracket::SingleQuote => Some(('\'', '\'')),
        }
    }

    /// Wraps `text` in this enclosure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::Bracket;
    ///
    /// assert_eq!(Bracket::Square.wrap("1, 2"), "[1, 2]");
    /// ```
    #[must_use]
    pub fn wrap(&self, text: &str) -> String {
        match self.pair() {
            Some((open, close)) => {
                let mut out = String::with_capacity(text.len() + 2);
                out.push(open);
                out.push_str(text);
                out.push(close);
                out
            }
            None => text.to_string(),
        }
    }

    /// Returns the configuration-surface name of this style.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Bracket::None => "none",
            Bracket::Curly => "curly",
            Bracket::Square => "square",
            Bracket::Angle => "angle",
            Bracket::Parenthesis => "parenthesis",
            Bracket::DoubleQuote => "double-quote",
            Bracket::SingleQuote => "single-quote",
        }
    }
}

impl FromStr for Bracket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Bracket::None),
            "curly" => Ok(Bracket::Curly),
            "square" => Ok(Bracket::Square),
            "angle" => Ok(Bracket::Angle),
            "parenthesis" => Ok(Bracket::Parenthesis),
            "double-quote" => Ok(Bracket::DoubleQuote),
            "single-quote" => Ok(Bracket::SingleQuote),
            other => Err(Error::unknown_bracket(other)),
        }
    }
}

/// Formatting settings: the null placeholder text and one bracket choice per
/// value category.
///
/// Defaults:
///
/// | setting | default |
/// |---|---|
/// | `null_text` | `"null"` |
/// | `null_bracket` | angle (`<null>`) |
/// | `string_bracket` | double-quote |
/// | `primitive_bracket` | none |
/// | `enumeration_bracket` | none |
/// | `nullable_bracket` | none |
/// | `enumerable_bracket` | square |
/// | `complex_bracket` | curly |
///
/// # Examples
///
/// ```rust
/// use autostring::{Bracket, Settings};
///
/// let settings = Settings::new()
///     .with_complex_bracket(Bracket::Parenthesis)
///     .with_null_text("n/a");
/// assert_eq!(settings.null_placeholder(), "<n/a>");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Placeholder text substituted for null/absent values.
    pub null_text: String,
    /// Enclosure around the null placeholder.
    pub null_bracket: Bracket,
    /// Enclosure around string values.
    pub string_bracket: Bracket,
    /// Enclosure around primitive values.
    pub primitive_bracket: Bracket,
    /// Enclosure reserved for enumeration values.
    ///
    /// Enumeration values currently render with [`primitive_bracket`];
    /// this field is accepted on the configuration surface but not
    /// consulted by the generator.
    ///
    /// [`primitive_bracket`]: Settings::primitive_bracket
    pub enumeration_bracket: Bracket,
    /// Enclosure around present nullable values.
    pub nullable_bracket: Bracket,
    /// Enclosure around rendered collections.
    pub enumerable_bracket: Bracket,
    /// Enclosure around rendered records.
    pub complex_bracket: Bracket,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            null_text: "null".to_string(),
            null_bracket: Bracket::Angle,
            string_bracket: Bracket::DoubleQuote,
            primitive_bracket: Bracket::None,
            enumeration_bracket: Bracket::None,
            nullable_bracket: Bracket::None,
            enumerable_bracket: Bracket::Square,
            complex_bracket: Bracket::Curly,
        }
    }
}

impl Settings {
    /// Creates the default settings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::{Bracket, Settings};
    ///
    /// let settings = Settings::new();
    /// assert_eq!(settings.enumerable_bracket, Bracket::Square);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the null placeholder text.
    #[must_use]
    pub fn with_null_text(mut self, text: impl Into<String>) -> Self {
        self.null_text = text.into();
        self
    }

    /// Sets the enclosure around the null placeholder.
    #[must_use]
    pub fn with_null_bracket(mut self, bracket: Bracket) -> Self {
        self.null_bracket = bracket;
        self
    }

    /// Sets the enclosure around string values.
    #[must_use]
    pub fn with_string_bracket(mut self, bracket: Bracket) -> Self {
        self.string_bracket = bracket;
        self
    }

    /// Sets the enclosure around primitive values.
    #[must_use]
    pub fn with_primitive_bracket(mut self, bracket: Bracket) -> Self {
        self.primitive_bracket = bracket;
        self
    }

    /// Sets the enclosure reserved for enumeration values.
    #[must_use]
    pub fn with_enumeration_bracket(mut self, bracket: Bracket) -> Self {
        self.enumeration_bracket = bracket;
        self
    }

    /// Sets the enclosure around present nullable values.
    #[must_use]
    pub fn with_nullable_bracket(mut self, bracket: Bracket) -> Self {
        self.nullable_bracket = bracket;
        self
    }

    /// Sets the enclosure around rendered collections.
    #[must_use]
    pub fn with_enumerable_bracket(mut self, bracket: Bracket) -> Self {
        self.enumerable_bracket = bracket;
        self
    }

    /// Sets the enclosure around rendered records.
    #[must_use]
    pub fn with_complex_bracket(mut self, bracket: Bracket) -> Self {
        self.complex_bracket = bracket;
        self
    }

    /// The fully rendered null placeholder: the null text wrapped in the
    /// null bracket.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::Settings;
    ///
    /// assert_eq!(Settings::default().null_placeholder(), "<null>");
    /// ```
    #[must_use]
    pub fn null_placeholder(&self) -> String {
        self.null_bracket.wrap(&self.null_text)
    }
}
