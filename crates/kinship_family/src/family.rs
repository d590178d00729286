//! Families: standing queries with deferred, reentrant-safe iteration.
//!
//! A [`Family`] owns a [`Filter`] and the set of entities currently
//! matching it. It observes the component stores named by its filter and
//! the entity registry, recomputing an entity's membership from its
//! signature whenever one of those reports a change.
//!
//! While any [`Family::iterate`] call is active the matching set is
//! frozen: membership changes are queued, one entry per entity holding
//! only its latest state, and applied in queue order when the outermost
//! iteration returns (or unwinds).

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use kinship_foundation::{BitSet, EntityId};
use kinship_storage::{ComponentListener, EntityListener, Signatures};
use tracing::trace;

use crate::filter::Filter;

/// Membership changes recorded while iterating.
#[derive(Debug, Default)]
struct PendingChanges {
    /// Latest resolved membership per entity, in first-queued order.
    changes: Vec<(EntityId, bool)>,
    /// Position of each queued entity in `changes`.
    positions: HashMap<EntityId, usize>,
}

impl PendingChanges {
    fn record(&mut self, entity: EntityId, member: bool) {
        if let Some(&position) = self.positions.get(&entity) {
            self.changes[position].1 = member;
        } else {
            self.positions.insert(entity, self.changes.len());
            self.changes.push((entity, member));
        }
    }

    fn len(&self) -> usize {
        self.changes.len()
    }

    fn drain(&mut self) -> Vec<(EntityId, bool)> {
        self.positions.clear();
        std::mem::take(&mut self.changes)
    }
}

/// A standing query over entity signatures.
pub struct Family {
    filter: Filter,
    signatures: Rc<Signatures>,
    entities: RefCell<BitSet>,
    pending: RefCell<PendingChanges>,
    depth: Cell<usize>,
}

impl Family {
    /// Creates an idle family with an empty matching set.
    #[must_use]
    pub fn new(filter: Filter, signatures: Rc<Signatures>) -> Self {
        Self {
            filter,
            signatures,
            entities: RefCell::new(BitSet::new()),
            pending: RefCell::new(PendingChanges::default()),
            depth: Cell::new(0),
        }
    }

    /// The filter defining this family.
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Evaluates `entities` against the filter and adds the matching ones.
    ///
    /// Used once, when the family is created, to pick up entities that
    /// already exist.
    pub fn seed(&self, entities: impl IntoIterator<Item = EntityId>) {
        for entity in entities {
            if self.matches(entity) {
                self.entities.borrow_mut().insert(entity.index());
            }
        }
    }

    /// Borrows the applied matching set.
    ///
    /// Changes queued during an active iteration are not visible here
    /// until the outermost iteration returns. Components may still be
    /// added and removed while the view is held: membership changes that
    /// arrive meanwhile are queued and applied by the first family access
    /// after the view is dropped.
    #[must_use]
    pub fn entities(&self) -> Ref<'_, BitSet> {
        self.settle();
        self.entities.borrow()
    }

    /// Returns the applied matching set as identities in ascending order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.settle();
        self.entities
            .borrow()
            .ones()
            .map(EntityId::from_index)
            .collect()
    }

    /// Checks whether `entity` is in the applied matching set.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.settle();
        self.entities.borrow().contains(entity.index())
    }

    /// Returns the size of the applied matching set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settle();
        self.entities.borrow().len()
    }

    /// Returns true if the applied matching set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settle();
        self.entities.borrow().is_empty()
    }

    /// Returns true while at least one iteration is active.
    #[must_use]
    pub fn is_iterating(&self) -> bool {
        self.depth.get() > 0
    }

    /// Returns the number of entities with a queued membership change.
    ///
    /// Changes queue while an iteration is active or while a view from
    /// [`entities`](Self::entities) is held.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Calls `action` once per matching entity, in ascending order.
    ///
    /// The visited set is the one applied when the call starts. `action`
    /// may create and destroy entities, add and remove components, and
    /// iterate this or other families; any resulting membership changes
    /// to this family are applied once the outermost `iterate` returns.
    pub fn iterate(&self, mut action: impl FnMut(EntityId)) {
        self.settle();
        let snapshot = self.entities.borrow().clone();
        let _guard = IterationGuard::enter(self);
        for index in snapshot.ones() {
            action(EntityId::from_index(index));
        }
    }

    /// Like [`iterate`](Self::iterate), stopping at the first error.
    ///
    /// Queued changes are still applied when the outermost iteration
    /// exits early.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `action`.
    pub fn try_iterate<E>(
        &self,
        mut action: impl FnMut(EntityId) -> Result<(), E>,
    ) -> Result<(), E> {
        self.settle();
        let snapshot = self.entities.borrow().clone();
        let _guard = IterationGuard::enter(self);
        for index in snapshot.ones() {
            action(EntityId::from_index(index))?;
        }
        Ok(())
    }

    fn matches(&self, entity: EntityId) -> bool {
        self.filter.matches(&self.signatures.signature(entity))
    }

    fn update_membership(&self, entity: EntityId) {
        let member = self.matches(entity);
        self.set_membership(entity, member);
    }

    fn set_membership(&self, entity: EntityId, member: bool) {
        let idle = !self.is_iterating();
        if idle && self.pending.borrow().len() == 0 {
            if let Ok(mut entities) = self.entities.try_borrow_mut() {
                entities.set(entity.index(), member);
                return;
            }
        }

        trace!(%entity, member, "queued family change");
        self.pending.borrow_mut().record(entity, member);
        if idle {
            self.flush();
        }
    }

    /// Applies changes left queued by a view that has since been dropped.
    fn settle(&self) {
        if !self.is_iterating() {
            self.flush();
        }
    }

    fn flush(&self) {
        if self.pending.borrow().len() == 0 {
            return;
        }
        let Ok(mut entities) = self.entities.try_borrow_mut() else {
            trace!("matching set is borrowed, keeping changes queued");
            return;
        };
        let changes = self.pending.borrow_mut().drain();
        trace!(changes = changes.len(), "flushing family changes");
        for (entity, member) in changes {
            entities.set(entity.index(), member);
        }
    }
}

/// Tracks one level of iteration; the outermost guard flushes on drop.
struct IterationGuard<'a> {
    family: &'a Family,
}

impl<'a> IterationGuard<'a> {
    fn enter(family: &'a Family) -> Self {
        family.depth.set(family.depth.get() + 1);
        Self { family }
    }
}

impl Drop for IterationGuard<'_> {
    fn drop(&mut self) {
        let depth = self.family.depth.get() - 1;
        self.family.depth.set(depth);
        if depth == 0 {
            self.family.flush();
        }
    }
}

impl ComponentListener for Family {
    fn component_added(&self, entity: EntityId) {
        self.update_membership(entity);
    }

    fn component_removed(&self, entity: EntityId) {
        self.update_membership(entity);
    }
}

impl EntityListener for Family {
    fn entity_added(&self, entity: EntityId) {
        self.update_membership(entity);
    }

    fn entity_removed(&self, entity: EntityId) {
        self.set_membership(entity, false);
    }
}

impl fmt::Debug for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Family")
            .field("filter", &self.filter)
            .field("entities", &*self.entities.borrow())
            .field("pending", &self.pending_len())
            .field("depth", &self.depth.get())
            .finish()
    }
}
