//! Runtime structural view of a value.
//!
//! A [`Subject`] is what a generated rendering function actually consumes:
//! a borrowed tree mirroring the value's [`Shape`], built by
//! [`Reflect::subject`]. Alongside the structural node it carries the raw
//! value as `&dyn Any`, so a typed custom override registered with
//! [`Engine::register_custom`] can downcast back to the concrete type.
//!
//! [`Shape`]: crate::Shape
//! [`Reflect::subject`]: crate::Reflect::subject
//! [`Engine::register_custom`]: crate::Engine::register_custom
//!
//! ## Examples
//!
//! ```rust
//! use autostring::Reflect;
//!
//! let value = Some(5i32);
//! let subject = value.subject();
//! assert!(!subject.is_absent());
//!
//! let value: Option<i32> = None;
//! assert!(value.subject().is_absent());
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// A borrowed structural view of one value, paired with the raw value.
pub struct Subject<'a> {
    raw: &'a dyn Any,
    node: Node<'a>,
}

/// The structural node of a [`Subject`].
pub enum Node<'a> {
    /// A string value.
    Text(Cow<'a, str>),
    /// A scalar, already in its native textual form.
    Primitive(String),
    /// An enumeration value: the variant's simple name.
    Enumeration(&'static str),
    /// An optional value; `None` is the absent case.
    Nullable(Option<Box<Subject<'a>>>),
    /// A homogeneous collection's elements.
    Seq(Vec<Subject<'a>>),
    /// A record's fields, plus its own string conversion if it has one.
    Record(RecordView<'a>),
}

/// Field subjects of a record, in the shape's declaration order.
pub struct RecordView<'a> {
    /// One subject per field, ordered as in the record's [`Shape`].
    ///
    /// [`Shape`]: crate::Shape
    pub fields: Vec<Subject<'a>>,
    /// The value's own string conversion, when the type declares one.
    pub display: Option<&'a dyn fmt::Display>,
}

impl<'a> Subject<'a> {
    /// A text subject.
    #[must_use]
    pub fn text(raw: &'a dyn Any, text: impl Into<Cow<'a, str>>) -> Self {
        Subject {
            raw,
            node: Node::Text(text.into()),
        }
    }

    /// A primitive subject from its native textual form.
    #[must_use]
    pub fn primitive(raw: &'a dyn Any, text: impl Into<String>) -> Self {
        Subject {
            raw,
            node: Node::Primitive(text.into()),
        }
    }

    /// An enumeration subject from the variant's simple name.
    #[must_use]
    pub fn enumeration(raw: &'a dyn Any, variant: &'static str) -> Self {
        Subject {
            raw,
            node: Node::Enumeration(variant),
        }
    }

    /// A nullable subject; `None` marks the absent case.
    #[must_use]
    pub fn nullable(raw: &'a dyn Any, inner: Option<Subject<'a>>) -> Self {
        Subject {
            raw,
            node: Node::Nullable(inner.map(Box::new)),
        }
    }

    /// A sequence subject from its element subjects.
    #[must_use]
    pub fn seq(raw: &'a dyn Any, elements: Vec<Subject<'a>>) -> Self {
        Subject {
            raw,
            node: Node::Seq(elements),
        }
    }

    /// A record subject from its field subjects, in declaration order.
    #[must_use]
    pub fn record(raw: &'a dyn Any, fields: Vec<Subject<'a>>) -> Self {
        Subject {
            raw,
            node: Node::Record(RecordView {
                fields,
                display: None,
            }),
        }
    }

    /// Attaches the value's own string conversion to a record subject.
    ///
    /// No effect on non-record subjects.
    #[must_use]
    pub fn with_display(mut self, display: &'a dyn fmt::Display) -> Self {
        if let Node::Record(ref mut view) = self.node {
            view.display = Some(display);
        }
        self
    }

    /// The structural node.
    #[inline]
    #[must_use]
    pub fn node(&self) -> &Node<'a> {
        &self.node
    }

    /// The raw value, for downcasting in typed custom overrides.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> &'a dyn Any {
        self.raw
    }

    /// Returns `true` for an absent nullable value.
    ///
    /// The facade renders absent values as the null placeholder without
    /// consulting the function cache.
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self.node, Node::Nullable(None))
    }
}

impl fmt::Debug for Subject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Node::Primitive(s) => f.debug_tuple("Primitive").field(s).finish(),
            Node::Enumeration(v) => f.debug_tuple("Enumeration").field(v).finish(),
            Node::Nullable(inner) => f.debug_tuple("Nullable").field(inner).finish(),
            Node::Seq(elements) => f.debug_tuple("Seq").field(elements).finish(),
            Node::Record(view) => f
                .debug_struct("Record")
                .field("fields", &view.fields)
                .field("has_display", &view.display.is_some())
                .finish(),
        }
    }
}
