//! The auto-stringification engine: function cache, invalidation, facade.
//!
//! An [`Engine`] owns the per-type rendering-function cache together with
//! the [`Settings`] and [`SourceRestriction`] that govern generation.
//! Engines are independent: two engines with different settings never
//! interfere, and there is no process-wide state.
//!
//! ## Rendering
//!
//! [`Engine::render`] is the single entry point: resolve the value's type
//! through the cache (building the function on a miss) and invoke the
//! function. It never fails; an absent value renders as the null
//! placeholder.
//!
//! ```rust
//! use autostring::Engine;
//!
//! let engine = Engine::new();
//! assert_eq!(engine.render(&5i32), "5");
//! assert_eq!(engine.render(&"hi".to_string()), "\"hi\"");
//! assert_eq!(engine.render(&None::<i32>), "<null>");
//! assert_eq!(engine.render(&vec![5, 3]), "[3, 5]");
//! ```
//!
//! ## Cache coherency
//!
//! Cached entries carry their [`MethodSource`] provenance. A settings
//! change marks every non-custom entry stale (rebuilt lazily on next
//! resolve); a restriction change rebuilds exactly the affected entries:
//! broadening promotes records whose own conversion becomes permitted,
//! narrowing demotes entries whose provenance is no longer allowed.
//! Custom entries are never touched by
//! either; only [`Engine::remove`] or [`Engine::reset`] with
//! `keep_custom = false` evicts them.
//!
//! ## Concurrency
//!
//! State sits behind a [`parking_lot::RwLock`]: renders take short read
//! locks, and cache mutations take the write lock. A second lock, the
//! configuration barrier, is held in read mode for the full duration of a
//! top-level render and in write mode by [`Engine::set_settings`] and
//! [`Engine::set_restriction`], so a configuration change waits out every
//! in-flight render and no single render mixes old and new settings.
//! Nested renders re-enter the barrier recursively; a rendering function
//! must therefore never call `set_settings` or `set_restriction` itself.
//! Rebuilds regenerate outside the state lock (generation re-enters the
//! cache for nested types) and re-install under the write lock.

use crate::error::{Error, Result};
use crate::generate::generate;
use crate::reflect::{Kind, Reflect, Shape, TypeKey};
use crate::settings::Settings;
use crate::source::{MethodSource, SourceRestriction};
use crate::subject::Subject;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A cached rendering function.
///
/// Functions take the engine so they can read live settings and recurse
/// into nested types through the cache.
pub type RenderFn = Arc<dyn Fn(&Engine, &Subject<'_>) -> String + Send + Sync>;

#[derive(Clone)]
struct Entry {
    func: RenderFn,
    source: MethodSource,
    shape: Shape,
}

struct State {
    settings: Settings,
    restriction: SourceRestriction,
    entries: IndexMap<TypeKey, Entry>,
    stale: HashSet<TypeKey>,
}

/// The auto-stringification engine.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct Engine {
    state: RwLock<State>,
    // Held for reading across a whole top-level render; settings and
    // restriction changes take it for writing.
    barrier: RwLock<()>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with default settings and the most permissive
    /// restriction ([`SourceRestriction::AllowAll`]).
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Creates an engine with the given settings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::{Bracket, Engine, Settings};
    ///
    /// let engine = Engine::with_settings(
    ///     Settings::new().with_string_bracket(Bracket::SingleQuote),
    /// );
    /// assert_eq!(engine.render(&"hi".to_string()), "'hi'");
    /// ```
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Engine {
            state: RwLock::new(State {
                settings,
                restriction: SourceRestriction::default(),
                entries: IndexMap::new(),
                stale: HashSet::new(),
            }),
            barrier: RwLock::new(()),
        }
    }

    /// Renders any reflectable value to a string. Never fails.
    ///
    /// An absent value (`None`) renders as the null placeholder in the
    /// null bracket regardless of its static type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::Engine;
    ///
    /// let engine = Engine::new();
    /// assert_eq!(engine.render(&Some(5i32)), "5");
    /// assert_eq!(engine.render(&None::<String>), "<null>");
    /// ```
    pub fn render<T: Reflect>(&self, value: &T) -> String {
        let shape = T::shape();
        let subject = value.subject();
        self.render_subject(&shape, &subject)
    }

    /// Renders a subject against its shape, resolving through the cache.
    ///
    /// This is the recursion point generated functions use for nested
    /// fields and elements; custom rendering functions may use it too.
    /// Holds the configuration barrier for the duration, so a concurrent
    /// settings or restriction change waits until this render completes.
    pub fn render_subject(&self, shape: &Shape, subject: &Subject<'_>) -> String {
        // Recursive acquisition: nested renders re-enter even while a
        // configuration writer is queued.
        let _config = self.barrier.read_recursive();
        if subject.is_absent() {
            return self.null_placeholder();
        }
        let func = self.resolve_shape(shape);
        func(self, subject)
    }

    /// Returns the cached rendering function for `T`, building it on a
    /// miss.
    ///
    /// The returned `Arc` is pointer-stable across calls until a settings
    /// or restriction change replaces the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::Engine;
    /// use std::sync::Arc;
    ///
    /// let engine = Engine::new();
    /// let first = engine.resolve::<i32>();
    /// let second = engine.resolve::<i32>();
    /// assert!(Arc::ptr_eq(&first, &second));
    /// ```
    pub fn resolve<T: Reflect>(&self) -> RenderFn {
        self.resolve_shape(&T::shape())
    }

    pub(crate) fn resolve_shape(&self, shape: &Shape) -> RenderFn {
        {
            let state = self.state.read();
            if let Some(entry) = state.entries.get(&shape.key) {
                if entry.source == MethodSource::Custom || !state.stale.contains(&shape.key) {
                    return entry.func.clone();
                }
            }
        }
        tracing::debug!(
            type_name = shape.name,
            category = ?crate::classify::classify(shape),
            "building rendering function"
        );
        let (func, source) = generate(self, shape);
        self.install_generated(*shape, func, source)
    }

    /// Registers a custom rendering function for `T`, replacing any
    /// existing entry.
    ///
    /// Custom functions override all automatic behavior for the type and
    /// survive settings and restriction changes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::Engine;
    ///
    /// let engine = Engine::new();
    /// engine.register_custom(|n: &i32| format!("#{n}"));
    /// assert_eq!(engine.render(&7), "#7");
    /// ```
    pub fn register_custom<T, F>(&self, render: F)
    where
        T: Reflect,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.install(T::shape(), Self::wrap_custom(render), MethodSource::Custom, true);
    }

    /// Registers a custom rendering function for `T` only if no entry for
    /// `T` exists yet. Returns whether it was installed.
    pub fn register_custom_if_absent<T, F>(&self, render: F) -> bool
    where
        T: Reflect,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.install(T::shape(), Self::wrap_custom(render), MethodSource::Custom, false)
    }

    fn wrap_custom<T, F>(render: F) -> RenderFn
    where
        T: Reflect,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Arc::new(move |engine: &Engine, subject: &Subject<'_>| {
            match subject.raw().downcast_ref::<T>() {
                Some(value) => render(value),
                None => {
                    tracing::warn!("custom rendering function received a foreign subject");
                    engine.null_placeholder()
                }
            }
        })
    }

    /// Low-level registration with an explicit provenance tag.
    ///
    /// Returns whether the function was installed (`false` only when
    /// `replace` is `false` and an entry already exists).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSource`] when `source` is [`MethodSource::Invalid`].
    pub fn register_function(
        &self,
        shape: Shape,
        func: RenderFn,
        source: MethodSource,
        replace: bool,
    ) -> Result<bool> {
        if source == MethodSource::Invalid {
            return Err(Error::invalid_source(source));
        }
        Ok(self.install(shape, func, source, replace))
    }

    fn install(&self, shape: Shape, func: RenderFn, source: MethodSource, replace: bool) -> bool {
        let mut state = self.state.write();
        if !replace && state.entries.contains_key(&shape.key) {
            return false;
        }
        state.stale.remove(&shape.key);
        state.entries.insert(shape.key, Entry { func, source, shape });
        true
    }

    /// Installs a generated function unless a custom entry took the slot
    /// in the meantime; returns whichever function ends up cached.
    fn install_generated(&self, shape: Shape, func: RenderFn, source: MethodSource) -> RenderFn {
        let mut state = self.state.write();
        if let Some(existing) = state.entries.get(&shape.key) {
            if existing.source == MethodSource::Custom {
                return existing.func.clone();
            }
        }
        state.stale.remove(&shape.key);
        let installed = func.clone();
        state.entries.insert(shape.key, Entry { func, source, shape });
        installed
    }

    /// Removes the cached entry for `T` (custom or not). Returns whether
    /// an entry existed.
    pub fn remove<T: Reflect>(&self) -> bool {
        let mut state = self.state.write();
        let key = TypeKey::of::<T>();
        state.stale.remove(&key);
        state.entries.shift_remove(&key).is_some()
    }

    /// Clears the cache. Custom entries survive unless `keep_custom` is
    /// `false`. Settings and restriction are untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::Engine;
    ///
    /// let engine = Engine::new();
    /// engine.register_custom(|n: &i32| format!("#{n}"));
    /// engine.render(&true);
    /// engine.reset(true);
    /// assert_eq!(engine.len(), 1); // the custom entry survived
    /// engine.reset(false);
    /// assert!(engine.is_empty());
    /// ```
    pub fn reset(&self, keep_custom: bool) {
        let mut state = self.state.write();
        if keep_custom {
            state.entries.retain(|_, entry| entry.source == MethodSource::Custom);
        } else {
            state.entries.clear();
        }
        state.stale.clear();
        tracing::debug!(keep_custom, remaining = state.entries.len(), "cache reset");
    }

    /// Replaces the settings and marks every non-custom entry stale; the
    /// next resolve of each rebuilds it.
    ///
    /// Waits for in-flight renders to complete, so every render observes
    /// exactly one settings configuration; all subsequent renders use the
    /// new one. Must not be called from inside a rendering function.
    pub fn set_settings(&self, settings: Settings) {
        let _config = self.barrier.write();
        let mut state = self.state.write();
        state.settings = settings;
        let marked: Vec<TypeKey> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.source != MethodSource::Custom)
            .map(|(key, _)| *key)
            .collect();
        let count = marked.len();
        state.stale.extend(marked);
        tracing::debug!(marked = count, "settings changed");
    }

    /// Changes the source restriction and rebuilds the affected entries.
    ///
    /// - Same level: no-op.
    /// - Broadening: only non-custom record entries that now gain a
    ///   permitted conversion are rebuilt (promoted to the class method).
    /// - Narrowing: non-custom entries whose provenance is no longer
    ///   permitted are rebuilt, falling back to automatic rendering.
    ///
    /// Waits for in-flight renders to complete, like
    /// [`Engine::set_settings`]. Must not be called from inside a
    /// rendering function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::{Engine, SourceRestriction};
    ///
    /// let engine = Engine::new();
    /// engine.set_restriction(SourceRestriction::AutoMethodOnly);
    /// assert_eq!(engine.restriction(), SourceRestriction::AutoMethodOnly);
    /// ```
    pub fn set_restriction(&self, new: SourceRestriction) {
        let _config = self.barrier.write();
        let affected: Vec<Shape> = {
            let mut state = self.state.write();
            let old = state.restriction;
            if old == new {
                return;
            }
            state.restriction = new;
            let broadened = new > old;
            tracing::debug!(?old, ?new, broadened, "restriction changed");
            state
                .entries
                .values()
                .filter(|entry| entry.source != MethodSource::Custom)
                .filter(|entry| {
                    if broadened {
                        match entry.shape.kind {
                            Kind::Record {
                                conversion: Some(conversion),
                                ..
                            } => {
                                new.permits(conversion.source())
                                    && !entry.source.is_class_method()
                            }
                            _ => false,
                        }
                    } else {
                        !new.permits(entry.source)
                    }
                })
                .map(|entry| entry.shape)
                .collect()
        };
        for shape in affected {
            let (func, source) = generate(self, &shape);
            self.install_generated(shape, func, source);
        }
    }

    /// The current source restriction.
    #[must_use]
    pub fn restriction(&self) -> SourceRestriction {
        self.state.read().restriction
    }

    /// A clone of the current settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.state.read().settings.clone()
    }

    pub(crate) fn settings_with<R>(&self, f: impl FnOnce(&Settings) -> R) -> R {
        f(&self.state.read().settings)
    }

    /// The null placeholder under the current settings: the null text
    /// wrapped in the null bracket.
    #[must_use]
    pub fn null_placeholder(&self) -> String {
        self.settings_with(Settings::null_placeholder)
    }

    /// The provenance of `T`'s cached function, if one is cached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::{Engine, MethodSource};
    ///
    /// let engine = Engine::new();
    /// assert_eq!(engine.source_of::<i32>(), None);
    /// engine.render(&5i32);
    /// assert_eq!(engine.source_of::<i32>(), Some(MethodSource::AutoMethod));
    /// ```
    #[must_use]
    pub fn source_of<T: Reflect>(&self) -> Option<MethodSource> {
        self.state
            .read()
            .entries
            .get(&TypeKey::of::<T>())
            .map(|entry| entry.source)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Returns `true` when no entry is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Engine")
            .field("entries", &state.entries.len())
            .field("stale", &state.stale.len())
            .field("restriction", &state.restriction)
            .finish()
    }
}
