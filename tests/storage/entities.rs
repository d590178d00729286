//! Integration tests for the entity registry
//!
//! Tests identity allocation, reuse, growth, and lifecycle notifications.

use std::cell::RefCell;
use std::rc::Rc;

use kinship_foundation::{EntityId, ErrorKind};
use kinship_storage::{EntityListener, EntityRegistry};

#[derive(Default)]
struct Journal {
    events: RefCell<Vec<(char, EntityId)>>,
}

impl EntityListener for Journal {
    fn entity_added(&self, entity: EntityId) {
        self.events.borrow_mut().push(('+', entity));
    }

    fn entity_removed(&self, entity: EntityId) {
        self.events.borrow_mut().push(('-', entity));
    }
}

// =============================================================================
// Allocation
// =============================================================================

#[test]
fn fresh_identities_are_sequential() {
    let registry = EntityRegistry::with_capacity(4);
    let ids: Vec<_> = (0..4).map(|_| registry.create()).collect();
    assert_eq!(ids, (0..4).map(EntityId::new).collect::<Vec<_>>());
}

#[test]
fn live_identities_are_unique() {
    let registry = EntityRegistry::new();
    let mut ids: Vec<_> = (0..100).map(|_| registry.create()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 100);
    assert_eq!(registry.len(), 100);
}

#[test]
fn destroyed_identities_are_reused_before_growth() {
    let registry = EntityRegistry::with_capacity(4);
    let ids: Vec<_> = (0..4).map(|_| registry.create()).collect();
    let capacity = registry.borrow_pool().capacity();

    registry.destroy(ids[1]).unwrap();
    registry.destroy(ids[3]).unwrap();

    assert_eq!(registry.create(), ids[3]);
    assert_eq!(registry.create(), ids[1]);
    assert_eq!(registry.borrow_pool().capacity(), capacity);
}

#[test]
fn zero_capacity_grows() {
    let registry = EntityRegistry::with_capacity(0);
    let ids: Vec<_> = (0..9).map(|_| registry.create()).collect();
    assert_eq!(ids.len(), 9);
    assert!(registry.borrow_pool().capacity() >= 9);
}

// =============================================================================
// Destruction
// =============================================================================

#[test]
fn destroy_unknown_entity_fails() {
    let registry = EntityRegistry::new();
    let err = registry.destroy(EntityId::new(12)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidEntity(_)));
}

#[test]
fn destroy_twice_fails() {
    let registry = EntityRegistry::new();
    let e = registry.create();
    registry.destroy(e).unwrap();
    assert!(registry.destroy(e).is_err());
    assert!(!registry.contains(e));
}

// =============================================================================
// Notifications
// =============================================================================

#[test]
fn listeners_see_creates_and_destroys() {
    let registry = EntityRegistry::new();
    let journal = Rc::new(Journal::default());
    registry.add_listener(journal.clone());

    let a = registry.create();
    let b = registry.create();
    registry.destroy(a).unwrap();

    assert_eq!(*journal.events.borrow(), vec![('+', a), ('+', b), ('-', a)]);
}

#[test]
fn removed_listener_is_silent() {
    let registry = EntityRegistry::new();
    let journal = Rc::new(Journal::default());
    registry.add_listener(journal.clone());
    assert!(registry.remove_listener(&journal));
    assert!(!registry.has_listener(&journal));

    registry.create();

    assert!(journal.events.borrow().is_empty());
}

#[test]
fn entity_is_live_during_removal_broadcast() {
    struct Probe {
        registry: Rc<EntityRegistry>,
        seen_live: RefCell<Option<bool>>,
    }

    impl EntityListener for Probe {
        fn entity_removed(&self, entity: EntityId) {
            *self.seen_live.borrow_mut() = Some(self.registry.contains(entity));
        }
    }

    let registry = Rc::new(EntityRegistry::new());
    let probe = Rc::new(Probe {
        registry: Rc::clone(&registry),
        seen_live: RefCell::new(None),
    });
    registry.add_listener(probe.clone());

    let e = registry.create();
    registry.destroy(e).unwrap();

    assert_eq!(*probe.seen_live.borrow(), Some(true));
}
