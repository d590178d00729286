//! Integration tests for component stores
//!
//! Tests registration, lookup, mutation, and signature upkeep.

use std::rc::Rc;

use kinship_foundation::{ComponentBit, EntityId, ErrorKind};
use kinship_storage::{ComponentStore, EntityRegistry, Signatures};

#[derive(Debug, Default, Clone, PartialEq)]
struct Health(u32);

struct Setup {
    entities: EntityRegistry,
    signatures: Rc<Signatures>,
    health: Rc<ComponentStore<Health>>,
}

fn setup(capacity: usize) -> Setup {
    let entities = EntityRegistry::with_capacity(capacity);
    let signatures = Rc::new(Signatures::with_capacity(capacity));
    let health = Rc::new(ComponentStore::new(
        ComponentBit::new(2),
        entities.pool(),
        Rc::clone(&signatures),
        capacity,
    ));
    entities.add_listener(health.clone());
    Setup {
        entities,
        signatures,
        health,
    }
}

// =============================================================================
// Register / Get
// =============================================================================

#[test]
fn register_then_get() {
    let s = setup(4);
    let e = s.entities.create();

    s.health.register(e, Health(10)).unwrap();

    assert_eq!(*s.health.get(e).unwrap(), Health(10));
    assert!(s.signatures.contains(e, ComponentBit::new(2)));
}

#[test]
fn register_replaces_value() {
    let s = setup(4);
    let e = s.entities.create();

    s.health.register(e, Health(1)).unwrap();
    s.health.register(e, Health(2)).unwrap();

    assert_eq!(s.health.get(e).unwrap().0, 2);
    assert_eq!(s.health.len(), 1);
}

#[test]
fn register_default_uses_default() {
    let s = setup(4);
    let e = s.entities.create();
    s.health.register_default(e).unwrap();
    assert_eq!(*s.health.get(e).unwrap(), Health(0));
}

#[test]
fn get_absent_fails_with_not_present() {
    let s = setup(4);
    let e = s.entities.create();

    let err = s.health.get(e).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotPresent { entity, .. } if entity == e));
}

#[test]
fn register_on_dead_entity_fails() {
    let s = setup(4);
    let err = s.health.register(EntityId::new(3), Health(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidEntity(_)));
}

#[test]
fn get_mut_writes_through() {
    let s = setup(4);
    let e = s.entities.create();
    s.health.register(e, Health(5)).unwrap();

    s.health.get_mut(e).unwrap().0 += 3;

    assert_eq!(s.health.get(e).unwrap().0, 8);
}

#[test]
fn store_grows_past_initial_capacity() {
    let s = setup(1);
    let ids: Vec<_> = (0..20).map(|_| s.entities.create()).collect();

    for (n, e) in (0..).zip(&ids) {
        s.health.register(*e, Health(n)).unwrap();
    }

    assert_eq!(s.health.get(ids[19]).unwrap().0, 19);
    assert_eq!(s.health.len(), 20);
}

// =============================================================================
// Deregister
// =============================================================================

#[test]
fn deregister_clears_presence_and_signature() {
    let s = setup(4);
    let e = s.entities.create();
    s.health.register(e, Health(3)).unwrap();

    assert!(s.health.deregister(e));

    assert!(!s.health.contains(e));
    assert!(!s.signatures.contains(e, ComponentBit::new(2)));
    assert!(s.health.get(e).is_err());
}

#[test]
fn deregister_absent_is_noop() {
    let s = setup(4);
    let e = s.entities.create();
    assert!(!s.health.deregister(e));
    assert!(!s.health.deregister(EntityId::new(400)));
}

#[test]
fn reregister_after_deregister_starts_fresh() {
    let s = setup(4);
    let e = s.entities.create();
    s.health.register(e, Health(9)).unwrap();
    s.health.deregister(e);

    s.health.register_default(e).unwrap();

    assert_eq!(s.health.get(e).unwrap().0, 0);
}

#[test]
fn destroying_entity_removes_component() {
    let s = setup(4);
    let e = s.entities.create();
    s.health.register(e, Health(3)).unwrap();

    s.entities.destroy(e).unwrap();

    assert!(!s.health.contains(e));
    assert!(s.health.is_empty());
}

#[test]
fn entities_lists_holders_in_order() {
    let s = setup(4);
    let ids: Vec<_> = (0..4).map(|_| s.entities.create()).collect();
    s.health.register(ids[3], Health(1)).unwrap();
    s.health.register(ids[0], Health(1)).unwrap();

    assert_eq!(s.health.entities(), vec![ids[0], ids[3]]);
    assert!(s.health.type_name().ends_with("Health"));
}
