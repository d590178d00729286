//! Family filters over component signatures.

use std::fmt;

use kinship_foundation::{BitSet, ComponentBit};

/// Matching predicate of a family: three masks over component bits.
///
/// An entity signature matches when it contains every `all_of` bit, none
/// of the `none_of` bits, and at least one `any_of` bit (or `any_of` is
/// empty). Two filters are equal exactly when all three masks hold the
/// same bits, regardless of the order bits were added in.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Filter {
    all_of: BitSet,
    none_of: BitSet,
    any_of: BitSet,
}

impl Filter {
    /// Creates a filter that matches every signature.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `bit`.
    #[must_use]
    pub fn all_of(mut self, bit: ComponentBit) -> Self {
        self.all_of.insert(bit.index());
        self
    }

    /// Excludes `bit`.
    #[must_use]
    pub fn none_of(mut self, bit: ComponentBit) -> Self {
        self.none_of.insert(bit.index());
        self
    }

    /// Adds `bit` to the set of which at least one is required.
    #[must_use]
    pub fn any_of(mut self, bit: ComponentBit) -> Self {
        self.any_of.insert(bit.index());
        self
    }

    /// The required mask.
    #[must_use]
    pub fn required(&self) -> &BitSet {
        &self.all_of
    }

    /// The excluded mask.
    #[must_use]
    pub fn excluded(&self) -> &BitSet {
        &self.none_of
    }

    /// The at-least-one mask.
    #[must_use]
    pub fn optional(&self) -> &BitSet {
        &self.any_of
    }

    /// Every bit mentioned by any mask, each once.
    #[must_use]
    pub fn components(&self) -> BitSet {
        let mut bits = self.all_of.clone();
        bits.union_with(&self.none_of);
        bits.union_with(&self.any_of);
        bits
    }

    /// Checks a signature against the filter.
    #[must_use]
    pub fn matches(&self, signature: &BitSet) -> bool {
        self.all_of.is_subset(signature)
            && self.none_of.is_disjoint(signature)
            && (self.any_of.is_empty() || self.any_of.intersects(signature))
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("all_of", &self.all_of)
            .field("none_of", &self.none_of)
            .field("any_of", &self.any_of)
            .finish()
    }
}
