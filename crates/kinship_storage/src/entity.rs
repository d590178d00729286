//! Entity identity allocation and lifecycle broadcasting.
//!
//! The [`EntityPool`] hands out dense integer identities and recycles
//! freed ones. The [`EntityRegistry`] wraps a shared pool and notifies
//! every registered [`EntityListener`] when entities are created or
//! destroyed.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use kinship_foundation::{BitSet, EntityId, Error, Result};
use tracing::{debug, trace};

use crate::listener::Listeners;

/// Observer of entity creation and destruction.
///
/// Both methods default to doing nothing so implementors only override
/// the events they care about.
pub trait EntityListener {
    /// Called after `entity` has been allocated.
    fn entity_added(&self, _entity: EntityId) {}

    /// Called before `entity` is released for reuse.
    fn entity_removed(&self, _entity: EntityId) {}
}

/// Allocates and recycles entity identities.
///
/// Freed identities are kept on a stack and the most recently freed one
/// is handed out first. When none are free the live range is extended by
/// one, doubling the tracked capacity whenever it is exhausted.
#[derive(Debug, Clone)]
pub struct EntityPool {
    /// Liveness flag per identity.
    alive: BitSet,
    /// Free list of identities available for reuse.
    free_list: Vec<EntityId>,
    /// Next never-allocated identity.
    next: u32,
    /// Identities addressable before the next growth step.
    capacity: usize,
    /// Count of live entities.
    live_count: usize,
}

impl Default for EntityPool {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityPool {
    /// Creates an empty pool with no reserved capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty pool sized for `capacity` identities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            alive: BitSet::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            next: 0,
            capacity,
            live_count: 0,
        }
    }

    /// Allocates an identity, reusing the most recently freed one if any.
    pub fn allocate(&mut self) -> EntityId {
        let id = if let Some(id) = self.free_list.pop() {
            id
        } else {
            let id = EntityId::new(self.next);
            self.next += 1;
            if id.index() >= self.capacity {
                self.capacity = (self.capacity * 2).max(id.index() + 1);
                self.alive.reserve(self.capacity);
                debug!(capacity = self.capacity, "grew entity pool");
            }
            id
        };

        self.alive.insert(id.index());
        self.live_count += 1;
        id
    }

    /// Releases a live identity for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidEntity`](kinship_foundation::ErrorKind::InvalidEntity)
    /// if the identity is out of range or not live.
    pub fn release(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;

        self.alive.remove(id.index());
        self.free_list.push(id);
        self.live_count -= 1;

        Ok(())
    }

    /// Checks if an identity is currently live.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.alive.contains(id.index())
    }

    /// Validates that an identity is live.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidEntity`](kinship_foundation::ErrorKind::InvalidEntity)
    /// if the identity is out of range or not live.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::invalid_entity(id))
        }
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Returns the number of identities addressable before the next growth.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over live identities in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive.ones().map(EntityId::from_index)
    }
}

/// Identity registry with lifecycle notifications.
///
/// The pool lives behind a shared handle so component stores can check
/// liveness without holding on to the registry itself.
#[derive(Debug)]
pub struct EntityRegistry {
    pool: Rc<RefCell<EntityPool>>,
    listeners: Listeners<dyn EntityListener>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    /// Creates an empty registry with no reserved capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty registry sized for `capacity` identities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: Rc::new(RefCell::new(EntityPool::with_capacity(capacity))),
            listeners: Listeners::new(),
        }
    }

    /// Returns the shared pool handle.
    #[must_use]
    pub fn pool(&self) -> Rc<RefCell<EntityPool>> {
        Rc::clone(&self.pool)
    }

    /// Creates an entity and notifies listeners in registration order.
    pub fn create(&self) -> EntityId {
        let entity = self.pool.borrow_mut().allocate();
        trace!(%entity, "created entity");
        self.listeners.for_each(|l| l.entity_added(entity));
        entity
    }

    /// Destroys a live entity.
    ///
    /// Listeners are notified while the entity is still live, then its
    /// identity is released for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidEntity`](kinship_foundation::ErrorKind::InvalidEntity)
    /// if the entity is not live, including when a listener destroyed it
    /// during the broadcast.
    pub fn destroy(&self, entity: EntityId) -> Result<()> {
        self.pool.borrow().validate(entity)?;
        self.listeners.for_each(|l| l.entity_removed(entity));
        self.pool.borrow_mut().release(entity)?;
        trace!(%entity, "destroyed entity");
        Ok(())
    }

    /// Checks if an entity is live.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.pool.borrow().contains(entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pool.borrow().len()
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.borrow().is_empty()
    }

    /// Returns the live entities in ascending order.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        self.pool.borrow().iter().collect()
    }

    /// Borrows the pool for read-only inspection.
    ///
    /// # Panics
    ///
    /// Panics if the pool is being mutated, i.e. when called from inside
    /// an allocation. Listener callbacks run outside that window.
    #[must_use]
    pub fn borrow_pool(&self) -> Ref<'_, EntityPool> {
        self.pool.borrow()
    }

    /// Registers a lifecycle listener.
    ///
    /// Returns `false` if the listener was already registered.
    pub fn add_listener(&self, listener: Rc<dyn EntityListener>) -> bool {
        self.listeners.add(listener)
    }

    /// Unregisters a lifecycle listener.
    ///
    /// Returns `true` if the listener was registered.
    pub fn remove_listener<T: ?Sized>(&self, listener: &Rc<T>) -> bool {
        self.listeners.remove(listener)
    }

    /// Checks whether a listener is registered.
    #[must_use]
    pub fn has_listener<T: ?Sized>(&self, listener: &Rc<T>) -> bool {
        self.listeners.contains(listener)
    }
}
