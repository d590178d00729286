//! Growable bit set keyed by dense indices.
//!
//! A thin wrapper around [`fixedbitset::FixedBitSet`] that grows on insert
//! and compares by the set of enabled bits rather than by allocated length,
//! so two sets holding the same bits are equal (and hash equally) no matter
//! how they were built.

use std::fmt;
use std::hash::{Hash, Hasher};

use fixedbitset::FixedBitSet;

/// Growable set of `usize` indices.
#[derive(Clone, Default)]
pub struct BitSet(FixedBitSet);

impl BitSet {
    /// Creates an empty bit set.
    #[must_use]
    pub fn new() -> Self {
        Self(FixedBitSet::new())
    }

    /// Creates an empty bit set with room for `bits` indices.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self(FixedBitSet::with_capacity(bits))
    }

    /// Returns the number of indices addressable without growing.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.0.len()
    }

    /// Grows the set so that `bits` indices are addressable.
    pub fn reserve(&mut self, bits: usize) {
        if bits > self.0.len() {
            self.0.grow(bits);
        }
    }

    /// Adds an index, growing as needed.
    ///
    /// Returns `true` if the index was not already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.reserve(index + 1);
        let fresh = !self.0.contains(index);
        self.0.insert(index);
        fresh
    }

    /// Removes an index.
    ///
    /// Returns `true` if the index was present.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.0.contains(index) {
            return false;
        }
        self.0.set(index, false);
        true
    }

    /// Sets or clears an index.
    pub fn set(&mut self, index: usize, enabled: bool) {
        if enabled {
            self.insert(index);
        } else {
            self.remove(index);
        }
    }

    /// Checks whether an index is present.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(index)
    }

    /// Returns the number of indices present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.count_ones(..)
    }

    /// Returns true if no index is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.ones().next().is_none()
    }

    /// Removes every index, keeping the allocation.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates over present indices in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.ones()
    }

    /// Returns true if every index in `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &BitSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Returns true if `self` and `other` share no index.
    #[must_use]
    pub fn is_disjoint(&self, other: &BitSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Returns true if `self` and `other` share at least one index.
    #[must_use]
    pub fn intersects(&self, other: &BitSet) -> bool {
        !self.is_disjoint(other)
    }

    /// Adds every index of `other` to `self`.
    pub fn union_with(&mut self, other: &BitSet) {
        self.0.union_with(&other.0);
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.ones().eq(other.ones())
    }
}

impl Eq for BitSet {}

impl Hash for BitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for index in self.ones() {
            index.hash(state);
        }
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ones()).finish()
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<usize> for BitSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for index in iter {
            self.insert(index);
        }
    }
}
