//! Integration tests for the component index and signature cache

use kinship_foundation::{ComponentBit, EntityId};
use kinship_storage::{ComponentIndex, Signatures};

#[derive(Default)]
struct Transform;
#[derive(Default)]
struct Render;

// =============================================================================
// Component Index
// =============================================================================

#[test]
fn bits_are_dense_and_stable() {
    let index = ComponentIndex::new();

    let t = index.index_of::<Transform>();
    let r = index.index_of::<Render>();

    assert_eq!(t, ComponentBit::new(0));
    assert_eq!(r, ComponentBit::new(1));
    assert_eq!(index.index_of::<Transform>(), t);
    assert_eq!(index.len(), 2);
}

#[test]
fn names_follow_assignment_order() {
    let index = ComponentIndex::new();
    index.index_of::<Render>();
    index.index_of::<Transform>();

    assert!(index.name_of(ComponentBit::new(0)).unwrap().ends_with("Render"));
    assert!(index.name_of(ComponentBit::new(1)).unwrap().ends_with("Transform"));
    assert_eq!(index.name_of(ComponentBit::new(2)), None);
}

#[test]
fn get_does_not_assign() {
    let index = ComponentIndex::new();
    assert_eq!(index.get::<Transform>(), None);
    assert!(index.is_empty());
}

// =============================================================================
// Signatures
// =============================================================================

#[test]
fn signature_of_unseen_entity_is_empty() {
    let signatures = Signatures::new();
    assert!(signatures.signature(EntityId::new(50)).is_empty());
    assert_eq!(signatures.capacity(), 0);
}

#[test]
fn signature_views_can_overlap() {
    let signatures = Signatures::new();
    let (a, b) = (EntityId::new(0), EntityId::new(1));
    signatures.insert(a, ComponentBit::new(0));
    signatures.insert(b, ComponentBit::new(3));

    let first = signatures.signature(a);
    let second = signatures.signature(b);

    assert_eq!(first.ones().collect::<Vec<_>>(), vec![0]);
    assert_eq!(second.ones().collect::<Vec<_>>(), vec![3]);
}

#[test]
fn signature_insert_remove_clear() {
    let signatures = Signatures::with_capacity(2);
    let e = EntityId::new(1);

    signatures.insert(e, ComponentBit::new(0));
    signatures.insert(e, ComponentBit::new(5));
    signatures.remove(e, ComponentBit::new(0));
    assert_eq!(signatures.signature(e).ones().collect::<Vec<_>>(), vec![5]);

    signatures.clear(e);
    assert!(signatures.signature(e).is_empty());
}
