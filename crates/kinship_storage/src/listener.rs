//! Ordered, duplicate-free observer collections.
//!
//! Observers are shared (`Rc`) and compared by address, so the same
//! observer instance can only be registered once per collection.
//! Broadcasts iterate a snapshot, which lets an observer add or remove
//! observers (or trigger nested broadcasts) while being notified.

use std::cell::RefCell;
use std::fmt;
use std::ptr;
use std::rc::Rc;

/// Ordered set of shared observers, identified by pointer.
pub struct Listeners<L: ?Sized> {
    items: RefCell<Vec<Rc<L>>>,
}

impl<L: ?Sized> Listeners<L> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
        }
    }

    /// Appends an observer.
    ///
    /// Returns `false` (and changes nothing) if it is already registered.
    pub fn add(&self, listener: Rc<L>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.items.borrow_mut().push(listener);
        true
    }

    /// Removes an observer, preserving the order of the others.
    ///
    /// Returns `true` if it was registered.
    pub fn remove<T: ?Sized>(&self, listener: &Rc<T>) -> bool {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|item| !ptr::addr_eq(Rc::as_ptr(item), Rc::as_ptr(listener)));
        items.len() != before
    }

    /// Checks whether an observer is registered.
    ///
    /// Accepts any `Rc` pointing at the same allocation, so a concrete
    /// `Rc<Family>` can be looked up in a `Listeners<dyn Trait>`.
    #[must_use]
    pub fn contains<T: ?Sized>(&self, listener: &Rc<T>) -> bool {
        self.items
            .borrow()
            .iter()
            .any(|item| ptr::addr_eq(Rc::as_ptr(item), Rc::as_ptr(listener)))
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Returns true if no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Returns the observers in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Rc<L>> {
        self.items.borrow().clone()
    }

    /// Invokes `notify` on every observer in registration order.
    pub fn for_each(&self, mut notify: impl FnMut(&L)) {
        for listener in self.snapshot() {
            notify(&listener);
        }
    }
}

impl<L: ?Sized> Default for Listeners<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> fmt::Debug for Listeners<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}
