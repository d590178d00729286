//! Per-entity component signatures.
//!
//! A signature is the set of component bits an entity currently has.
//! Component stores keep it in sync on every presence change, before
//! notifying their listeners, so listeners always observe the updated
//! signature.

use std::cell::{Ref, RefCell};

use kinship_foundation::{BitSet, ComponentBit, EntityId};

/// Signature cache indexed by entity identity.
#[derive(Debug, Default)]
pub struct Signatures {
    rows: RefCell<Vec<BitSet>>,
    /// Seen by entities beyond the allocated rows.
    empty: RefCell<BitSet>,
}

impl Signatures {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache with rows for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: RefCell::new(vec![BitSet::new(); capacity]),
            empty: RefCell::new(BitSet::new()),
        }
    }

    /// Ensures a row exists for `entity`.
    ///
    /// Only borrows mutably when the rows must grow.
    pub fn reserve(&self, entity: EntityId) {
        if entity.index() < self.rows.borrow().len() {
            return;
        }
        let mut rows = self.rows.borrow_mut();
        if entity.index() >= rows.len() {
            let len = (rows.len() * 2).max(entity.index() + 1);
            rows.resize_with(len, BitSet::new);
        }
    }

    /// Returns the signature of `entity`.
    ///
    /// Never grows the cache: entities beyond the current rows read as
    /// empty. Any number of views may be held at once, but one must not be
    /// held across a component change.
    #[must_use]
    pub fn signature(&self, entity: EntityId) -> Ref<'_, BitSet> {
        Ref::filter_map(self.rows.borrow(), |rows| rows.get(entity.index()))
            .unwrap_or_else(|_| self.empty.borrow())
    }

    /// Checks whether `entity` currently has `bit`.
    #[must_use]
    pub fn contains(&self, entity: EntityId, bit: ComponentBit) -> bool {
        self.rows
            .borrow()
            .get(entity.index())
            .is_some_and(|row| row.contains(bit.index()))
    }

    /// Sets `bit` in the signature of `entity`.
    pub fn insert(&self, entity: EntityId, bit: ComponentBit) {
        self.reserve(entity);
        self.rows.borrow_mut()[entity.index()].insert(bit.index());
    }

    /// Clears `bit` in the signature of `entity`.
    pub fn remove(&self, entity: EntityId, bit: ComponentBit) {
        if let Some(row) = self.rows.borrow_mut().get_mut(entity.index()) {
            row.remove(bit.index());
        }
    }

    /// Clears the whole signature of `entity`.
    pub fn clear(&self, entity: EntityId) {
        if let Some(row) = self.rows.borrow_mut().get_mut(entity.index()) {
            row.clear();
        }
    }

    /// Returns the number of rows currently allocated.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.rows.borrow().len()
    }
}
