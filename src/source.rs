//! Method-source provenance and the restriction policy.
//!
//! Every cached rendering function carries a [`MethodSource`] recording how
//! it was obtained. The engine-wide [`SourceRestriction`] decides which of
//! those provenances the generator may choose when a record type offers its
//! own string conversion.
//!
//! The three restriction levels form a strict containment chain,
//!
//! ```text
//! AutoMethodOnly ⊂ AllowDeclaringMethod ⊂ AllowAll
//! ```
//!
//! which is exactly the derived ordering of the enum, so "new level is a
//! superset of old" is just `new >= old`.
//!
//! ## Examples
//!
//! ```rust
//! use autostring::{MethodSource, SourceRestriction};
//!
//! let policy = SourceRestriction::AllowDeclaringMethod;
//! assert!(policy.permits(MethodSource::DeclaringMethod));
//! assert!(!policy.permits(MethodSource::ParentMethod));
//! assert!(SourceRestriction::AutoMethodOnly < SourceRestriction::AllowAll);
//! ```

use serde::{Deserialize, Serialize};

/// Provenance of a cached rendering function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MethodSource {
    /// Explicitly registered by a caller; overrides all automatic behavior
    /// and survives settings/restriction changes.
    Custom,
    /// Generated from the type's classified structure (string, primitive,
    /// enumeration, nullable, enumerable, or record-by-fields).
    AutoMethod,
    /// The subject type declares its own string conversion.
    DeclaringMethod,
    /// The subject type's string conversion is inherited/delegated from
    /// another type.
    ParentMethod,
    /// Sentinel from a failed conversion probe. Never describes a usable
    /// function; registration with this tag fails.
    Invalid,
}

impl MethodSource {
    /// Returns `true` for the class-method provenances
    /// ([`DeclaringMethod`] and [`ParentMethod`]).
    ///
    /// [`DeclaringMethod`]: MethodSource::DeclaringMethod
    /// [`ParentMethod`]: MethodSource::ParentMethod
    #[inline]
    #[must_use]
    pub const fn is_class_method(&self) -> bool {
        matches!(self, MethodSource::DeclaringMethod | MethodSource::ParentMethod)
    }
}

/// Policy restricting which [`MethodSource`]s the generator may use for
/// record types.
///
/// `Custom` and `AutoMethod` functions are permitted at every level; the
/// levels only gate the class-method provenances. The default is
/// [`AllowAll`], the most permissive level.
///
/// [`AllowAll`]: SourceRestriction::AllowAll
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum SourceRestriction {
    /// Only custom and automatic functions.
    AutoMethodOnly,
    /// Additionally, conversions the subject type declares itself.
    AllowDeclaringMethod,
    /// Additionally, conversions inherited from another type.
    #[default]
    AllowAll,
}

impl SourceRestriction {
    /// Returns `true` if a function with the given provenance is acceptable
    /// under this restriction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use autostring::{MethodSource, SourceRestriction};
    ///
    /// assert!(SourceRestriction::AutoMethodOnly.permits(MethodSource::Custom));
    /// assert!(!SourceRestriction::AutoMethodOnly.permits(MethodSource::DeclaringMethod));
    /// assert!(SourceRestriction::AllowAll.permits(MethodSource::ParentMethod));
    /// ```
    #[must_use]
    pub fn permits(self, source: MethodSource) -> bool {
        match source {
            MethodSource::Custom | MethodSource::AutoMethod => true,
            MethodSource::DeclaringMethod => self >= SourceRestriction::AllowDeclaringMethod,
            MethodSource::ParentMethod => self >= SourceRestriction::AllowAll,
            MethodSource::Invalid => false,
        }
    }

    /// Returns `true` if this restriction permits any class-method
    /// provenance at all.
    #[inline]
    #[must_use]
    pub fn permits_class_methods(self) -> bool {
        self >= SourceRestriction::AllowDeclaringMethod
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [SourceRestriction; 3] = [
        SourceRestriction::AutoMethodOnly,
        SourceRestriction::AllowDeclaringMethod,
        SourceRestriction::AllowAll,
    ];

    const SOURCES: [MethodSource; 5] = [
        MethodSource::Custom,
        MethodSource::AutoMethod,
        MethodSource::DeclaringMethod,
        MethodSource::ParentMethod,
        MethodSource::Invalid,
    ];

    #[test]
    fn containment_chain_is_the_ordering() {
        assert!(SourceRestriction::AutoMethodOnly < SourceRestriction::AllowDeclaringMethod);
        assert!(SourceRestriction::AllowDeclaringMethod < SourceRestriction::AllowAll);
    }

    #[test]
    fn permitted_sets_are_monotone() {
        // Each level's permitted set must contain the previous level's.
        for pair in LEVELS.windows(2) {
            for source in SOURCES {
                if pair[0].permits(source) {
                    assert!(
                        pair[1].permits(source),
                        "{:?} permits {:?} but {:?} does not",
                        pair[0],
                        source,
                        pair[1]
                    );
                }
            }
        }
    }

    #[test]
    fn custom_and_auto_always_permitted() {
        for level in LEVELS {
            assert!(level.permits(MethodSource::Custom));
            assert!(level.permits(MethodSource::AutoMethod));
        }
    }

    #[test]
    fn invalid_never_permitted() {
        for level in LEVELS {
            assert!(!level.permits(MethodSource::Invalid));
        }
    }

    #[test]
    fn class_method_gating() {
        assert!(!SourceRestriction::AutoMethodOnly.permits_class_methods());
        assert!(SourceRestriction::AllowDeclaringMethod.permits(MethodSource::DeclaringMethod));
        assert!(!SourceRestriction::AllowDeclaringMethod.permits(MethodSource::ParentMethod));
        assert!(SourceRestriction::AllowAll.permits(MethodSource::ParentMethod));
    }

    #[test]
    fn default_is_most_permissive() {
        assert_eq!(SourceRestriction::default(), SourceRestriction::AllowAll);
    }
}
