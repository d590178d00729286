//! Shared setup: a registry, three stores, and a family registry.

use std::rc::Rc;

use kinship_family::{Family, FamilyRegistry, Filter};
use kinship_foundation::ComponentBit;
use kinship_storage::{AnyComponentStore, ComponentStore, EntityRegistry, Signatures};

#[derive(Debug, Default)]
pub struct A(pub i32);
#[derive(Debug, Default)]
pub struct B;
#[derive(Debug, Default)]
pub struct C;

pub struct Fixture {
    pub entities: EntityRegistry,
    pub a: Rc<ComponentStore<A>>,
    pub b: Rc<ComponentStore<B>>,
    pub c: Rc<ComponentStore<C>>,
    pub families: FamilyRegistry,
}

impl Fixture {
    pub fn new() -> Self {
        let entities = EntityRegistry::with_capacity(2);
        let signatures = Rc::new(Signatures::with_capacity(2));
        let a = Rc::new(ComponentStore::new(
            ComponentBit::new(0),
            entities.pool(),
            Rc::clone(&signatures),
            2,
        ));
        let b = Rc::new(ComponentStore::new(
            ComponentBit::new(1),
            entities.pool(),
            Rc::clone(&signatures),
            2,
        ));
        let c = Rc::new(ComponentStore::new(
            ComponentBit::new(2),
            entities.pool(),
            Rc::clone(&signatures),
            2,
        ));
        entities.add_listener(a.clone());
        entities.add_listener(b.clone());
        entities.add_listener(c.clone());
        Self {
            entities,
            a,
            b,
            c,
            families: FamilyRegistry::new(signatures),
        }
    }

    pub fn stores(&self) -> Vec<Rc<dyn AnyComponentStore>> {
        let a: Rc<dyn AnyComponentStore> = self.a.clone();
        let b: Rc<dyn AnyComponentStore> = self.b.clone();
        let c: Rc<dyn AnyComponentStore> = self.c.clone();
        vec![a, b, c]
    }

    pub fn family(&self, filter: Filter) -> Rc<Family> {
        self.families.intern(filter, &self.stores(), &self.entities)
    }

    pub fn a_and_b(&self) -> Rc<Family> {
        self.family(Filter::new().all_of(self.a.bit()).all_of(self.b.bit()))
    }
}
