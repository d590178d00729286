//! Per-type component storage with presence tracking.
//!
//! Each component type gets its own [`ComponentStore`]: a dense array of
//! values indexed directly by entity identity, plus a presence bit set.
//! Presence changes update the owning entity's signature and are then
//! broadcast to [`ComponentListener`]s (families) in registration order.

use std::any::{Any, type_name};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use kinship_foundation::{BitSet, Component, ComponentBit, EntityId, Error, Result};
use tracing::trace;

use crate::entity::{EntityListener, EntityPool};
use crate::listener::Listeners;
use crate::signature::Signatures;

/// Observer of component presence changes on a single store.
pub trait ComponentListener {
    /// Called after `entity` gained the component.
    fn component_added(&self, entity: EntityId);

    /// Called after `entity` lost the component.
    fn component_removed(&self, entity: EntityId);
}

/// Type-erased view of a component store.
///
/// Lets a world keep stores of different component types in one table,
/// subscribe families to them, and forward entity lifecycle events.
pub trait AnyComponentStore: EntityListener {
    /// Bit position of the stored component type.
    fn bit(&self) -> ComponentBit;

    /// Name of the stored component type.
    fn type_name(&self) -> &'static str;

    /// Checks whether `entity` has the component.
    fn contains(&self, entity: EntityId) -> bool;

    /// Removes the component from `entity`, returning whether it was present.
    fn deregister(&self, entity: EntityId) -> bool;

    /// Presence listeners of this store.
    fn listeners(&self) -> &Listeners<dyn ComponentListener>;

    /// Upcasts to `Any` for downcasting back to the concrete store.
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

/// Dense values plus presence bits.
struct Slots<T> {
    values: Vec<T>,
    present: BitSet,
}

impl<T: Component> Slots<T> {
    fn with_capacity(capacity: usize) -> Self {
        let mut values = Vec::with_capacity(capacity);
        values.resize_with(capacity, T::default);
        Self {
            values,
            present: BitSet::with_capacity(capacity),
        }
    }

    fn reserve(&mut self, index: usize) {
        if index >= self.values.len() {
            let len = (self.values.len() * 2).max(index + 1);
            self.values.resize_with(len, T::default);
            self.present.reserve(len);
        }
    }

    /// Stores `value`, returning true if `index` was previously absent.
    fn put(&mut self, index: usize, value: T) -> bool {
        self.reserve(index);
        self.values[index] = value;
        self.present.insert(index)
    }

    /// Marks `index` absent, returning the stale value if it was present.
    fn take(&mut self, index: usize) -> Option<T> {
        if self.present.remove(index) {
            Some(std::mem::take(&mut self.values[index]))
        } else {
            None
        }
    }
}

/// Storage for every component of type `T`.
///
/// Values are read through [`get`](Self::get) and mutated in place
/// through [`get_mut`](Self::get_mut); neither changes presence nor
/// notifies anyone. Only [`register`](Self::register) and
/// [`deregister`](Self::deregister) change presence.
///
/// # Borrowing
///
/// `get` and `get_mut` hand out `RefCell` guards. Holding one across a
/// `register` or `deregister` on the same store panics, so keep guards
/// short-lived inside iteration callbacks.
pub struct ComponentStore<T: Component> {
    bit: ComponentBit,
    slots: RefCell<Slots<T>>,
    entities: Rc<RefCell<EntityPool>>,
    signatures: Rc<Signatures>,
    listeners: Listeners<dyn ComponentListener>,
}

impl<T: Component> ComponentStore<T> {
    /// Creates a store for `T` at `bit`, sized for `capacity` entities.
    #[must_use]
    pub fn new(
        bit: ComponentBit,
        entities: Rc<RefCell<EntityPool>>,
        signatures: Rc<Signatures>,
        capacity: usize,
    ) -> Self {
        Self {
            bit,
            slots: RefCell::new(Slots::with_capacity(capacity)),
            entities,
            signatures,
            listeners: Listeners::new(),
        }
    }

    /// Bit position of `T`.
    #[must_use]
    pub fn bit(&self) -> ComponentBit {
        self.bit
    }

    /// Name of `T`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    /// Attaches `value` to `entity`.
    ///
    /// If the entity already has the component, the value is replaced and
    /// nobody is notified. Otherwise the entity's signature gains this
    /// store's bit and every listener sees an add event.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidEntity`](kinship_foundation::ErrorKind::InvalidEntity)
    /// if `entity` is not live.
    ///
    /// # Panics
    ///
    /// Panics if a guard from [`get`](Self::get) or [`get_mut`](Self::get_mut)
    /// on this store is still held.
    pub fn register(&self, entity: EntityId, value: T) -> Result<()> {
        self.entities.borrow().validate(entity)?;

        let added = self.slots.borrow_mut().put(entity.index(), value);
        if added {
            self.signatures.insert(entity, self.bit);
            trace!(%entity, component = self.type_name(), "component added");
            self.listeners.for_each(|l| l.component_added(entity));
        }
        Ok(())
    }

    /// Attaches `T::default()` to `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidEntity`](kinship_foundation::ErrorKind::InvalidEntity)
    /// if `entity` is not live.
    pub fn register_default(&self, entity: EntityId) -> Result<()> {
        self.register(entity, T::default())
    }

    /// Detaches the component from `entity`.
    ///
    /// Returns `false` without notifying anyone if it was absent.
    ///
    /// # Panics
    ///
    /// Panics if a guard from [`get`](Self::get) or [`get_mut`](Self::get_mut)
    /// on this store is still held.
    pub fn deregister(&self, entity: EntityId) -> bool {
        let stale = self.slots.borrow_mut().take(entity.index());
        let Some(stale) = stale else {
            return false;
        };
        drop(stale);

        self.signatures.remove(entity, self.bit);
        trace!(%entity, component = self.type_name(), "component removed");
        self.listeners.for_each(|l| l.component_removed(entity));
        true
    }

    /// Checks whether `entity` has the component.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.slots.borrow().present.contains(entity.index())
    }

    /// Borrows the component of `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotPresent`](kinship_foundation::ErrorKind::NotPresent)
    /// if `entity` does not have the component.
    pub fn get(&self, entity: EntityId) -> Result<Ref<'_, T>> {
        let slots = self.slots.borrow();
        if !slots.present.contains(entity.index()) {
            return Err(Error::not_present(entity, self.type_name()));
        }
        Ok(Ref::map(slots, |s| &s.values[entity.index()]))
    }

    /// Mutably borrows the component of `entity` for in-place edits.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NotPresent`](kinship_foundation::ErrorKind::NotPresent)
    /// if `entity` does not have the component.
    pub fn get_mut(&self, entity: EntityId) -> Result<RefMut<'_, T>> {
        let slots = self.slots.borrow_mut();
        if !slots.present.contains(entity.index()) {
            return Err(Error::not_present(entity, self.type_name()));
        }
        Ok(RefMut::map(slots, |s| &mut s.values[entity.index()]))
    }

    /// Returns the number of entities with the component.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().present.len()
    }

    /// Returns true if no entity has the component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().present.is_empty()
    }

    /// Returns the entities with the component in ascending order.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        self.slots
            .borrow()
            .present
            .ones()
            .map(EntityId::from_index)
            .collect()
    }

    /// Registers a presence listener.
    ///
    /// Returns `false` if the listener was already registered.
    pub fn add_listener(&self, listener: Rc<dyn ComponentListener>) -> bool {
        self.listeners.add(listener)
    }

    /// Unregisters a presence listener.
    ///
    /// Returns `true` if the listener was registered.
    pub fn remove_listener<L: ?Sized>(&self, listener: &Rc<L>) -> bool {
        self.listeners.remove(listener)
    }

    /// Checks whether a listener is registered.
    #[must_use]
    pub fn has_listener<L: ?Sized>(&self, listener: &Rc<L>) -> bool {
        self.listeners.contains(listener)
    }
}

impl<T: Component> EntityListener for ComponentStore<T> {
    fn entity_added(&self, entity: EntityId) {
        self.slots.borrow_mut().reserve(entity.index());
    }

    fn entity_removed(&self, entity: EntityId) {
        self.deregister(entity);
    }
}

impl<T: Component> AnyComponentStore for ComponentStore<T> {
    fn bit(&self) -> ComponentBit {
        self.bit
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn contains(&self, entity: EntityId) -> bool {
        ComponentStore::contains(self, entity)
    }

    fn deregister(&self, entity: EntityId) -> bool {
        ComponentStore::deregister(self, entity)
    }

    fn listeners(&self) -> &Listeners<dyn ComponentListener> {
        &self.listeners
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

impl<T: Component> fmt::Debug for ComponentStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentStore")
            .field("type", &self.type_name())
            .field("bit", &self.bit)
            .field("len", &self.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
