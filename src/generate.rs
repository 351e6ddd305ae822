//! The rendering-function generator.
//!
//! Given a classified [`Shape`] and the engine's current source
//! restriction, [`generate`] produces a plain closure (no dynamic code
//! generation) plus the [`MethodSource`] provenance it carries:
//!
//! - **String**: the text wrapped in the string bracket
//! - **Enumeration**: `TypeName.Variant` wrapped in the primitive bracket
//! - **Primitive**: the native text wrapped in the primitive bracket
//! - **Nullable**: the inner value's native text in the nullable bracket,
//!   or the null placeholder when absent
//! - **Enumerable**: each element auto-stringified, sorted with
//!   placeholder texts first and the rest lexicographic by rendered text,
//!   joined with `", "`, wrapped in the enumerable bracket
//! - **Record**: the type's own conversion when the restriction permits
//!   one, otherwise `Name: value` per field in declaration order, wrapped
//!   in the complex bracket
//!
//! Dispatch matches on [`Kind`] directly; each arm corresponds one-to-one
//! with a [`Category`](crate::Category), so the match *is* the classifier
//! applied in place (the mapping is pinned by
//! [`classify`](crate::classify::classify) and its tests).
//!
//! Closures read the engine's settings at render time; the engine's
//! configuration barrier keeps a settings change from landing in the
//! middle of a render, so each render observes one configuration and the
//! next render after a change observes the new one. Generation never fails
//! for a well-formed shape.
//!
//! The enumerable sort is a deliberate normalization: two collections that
//! differ only by insertion order render identically. It compares rendered
//! *text*, so `["10", "2"]` renders as `[10, 2]`.

use crate::engine::{Engine, RenderFn};
use crate::reflect::{Field, Kind, Shape};
use crate::source::MethodSource;
use crate::subject::{Node, RecordView, Subject};
use std::sync::Arc;

/// Builds the rendering function for `shape` under the engine's current
/// restriction, resolving inner/element types as a side effect so later
/// direct renders of those types hit the cache.
pub(crate) fn generate(engine: &Engine, shape: &Shape) -> (RenderFn, MethodSource) {
    match shape.kind {
        Kind::Text => (text_fn(), MethodSource::AutoMethod),
        Kind::Enumeration => (enumeration_fn(shape.name), MethodSource::AutoMethod),
        Kind::Primitive => (primitive_fn(), MethodSource::AutoMethod),
        Kind::Nullable { inner } => {
            engine.resolve_shape(&inner());
            (nullable_fn(inner), MethodSource::AutoMethod)
        }
        Kind::Enumerable { element } => {
            engine.resolve_shape(&element());
            (enumerable_fn(element), MethodSource::AutoMethod)
        }
        Kind::Record { fields, conversion } => {
            let restriction = engine.restriction();
            if restriction.permits_class_methods() {
                if let Some(conversion) = conversion {
                    let source = conversion.source();
                    if restriction.permits(source) {
                        return (conversion_fn(fields), source);
                    }
                }
            }
            (record_fn(fields), MethodSource::AutoMethod)
        }
    }
}

fn text_fn() -> RenderFn {
    Arc::new(|engine, subject| match subject.node() {
        Node::Text(text) => engine.settings_with(|s| s.string_bracket.wrap(text)),
        _ => mismatched(engine, "text"),
    })
}

fn primitive_fn() -> RenderFn {
    Arc::new(|engine, subject| match subject.node() {
        Node::Primitive(text) => engine.settings_with(|s| s.primitive_bracket.wrap(text)),
        _ => mismatched(engine, "primitive"),
    })
}

fn enumeration_fn(type_name: &'static str) -> RenderFn {
    // The original renders enumerations with the primitive bracket; the
    // enumeration bracket setting is surface-only.
    Arc::new(move |engine, subject| match subject.node() {
        Node::Enumeration(variant) => {
            let text = format!("{}.{}", type_name, variant);
            engine.settings_with(|s| s.primitive_bracket.wrap(&text))
        }
        _ => mismatched(engine, "enumeration"),
    })
}

fn nullable_fn(inner: fn() -> Shape) -> RenderFn {
    Arc::new(move |engine, subject| match subject.node() {
        Node::Nullable(Some(value)) => {
            let text = native_text(engine, &inner(), value);
            engine.settings_with(|s| s.nullable_bracket.wrap(&text))
        }
        Node::Nullable(None) => engine.null_placeholder(),
        _ => mismatched(engine, "nullable"),
    })
}

fn enumerable_fn(element: fn() -> Shape) -> RenderFn {
    Arc::new(move |engine, subject| match subject.node() {
        Node::Seq(elements) => {
            let element_shape = element();
            let placeholder = engine.null_placeholder();
            let mut rendered: Vec<String> = elements
                .iter()
                .map(|e| engine.render_subject(&element_shape, e))
                .collect();
            // Placeholder-valued texts first, the rest lexicographic by
            // rendered text. Stable, so equal texts keep their order.
            rendered.sort_by(|a, b| {
                let a_null = *a == placeholder;
                let b_null = *b == placeholder;
                b_null.cmp(&a_null).then_with(|| a.cmp(b))
            });
            engine.settings_with(|s| s.enumerable_bracket.wrap(&rendered.join(", ")))
        }
        _ => mismatched(engine, "enumerable"),
    })
}

fn record_fn(fields: &'static [Field]) -> RenderFn {
    Arc::new(move |engine, subject| match subject.node() {
        Node::Record(view) => render_record_fields(engine, fields, view),
        _ => mismatched(engine, "record"),
    })
}

fn conversion_fn(fields: &'static [Field]) -> RenderFn {
    Arc::new(move |engine, subject| match subject.node() {
        Node::Record(view) => match view.display {
            Some(display) => {
                let text = display.to_string();
                engine.settings_with(|s| s.complex_bracket.wrap(&text))
            }
            // Shape promised a conversion the subject did not supply;
            // fall back to field enumeration rather than fail.
            None => render_record_fields(engine, fields, view),
        },
        _ => mismatched(engine, "record"),
    })
}

fn render_record_fields(engine: &Engine, fields: &[Field], view: &RecordView<'_>) -> String {
    if view.fields.len() != fields.len() {
        return mismatched(engine, "record fields");
    }
    let parts: Vec<String> = fields
        .iter()
        .zip(&view.fields)
        .map(|(field, value)| {
            let shape = (field.shape)();
            format!("{}: {}", field.name, engine.render_subject(&shape, value))
        })
        .collect();
    engine.settings_with(|s| s.complex_bracket.wrap(&parts.join(", ")))
}

/// The unbracketed textual form of a present nullable's inner value.
///
/// Sequences and records have no native textual form, so they fall back to
/// full auto-stringification.
fn native_text(engine: &Engine, shape: &Shape, subject: &Subject<'_>) -> String {
    match subject.node() {
        Node::Text(text) => text.to_string(),
        Node::Primitive(text) => text.clone(),
        Node::Enumeration(variant) => (*variant).to_string(),
        _ => engine.render_subject(shape, subject),
    }
}

fn mismatched(engine: &Engine, expected: &'static str) -> String {
    tracing::warn!(expected, "subject does not match its rendering function");
    engine.null_placeholder()
}
