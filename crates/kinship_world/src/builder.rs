//! Declarative family construction.

use std::rc::Rc;

use kinship_family::{Family, Filter};
use kinship_foundation::{Component, ComponentBit};
use kinship_storage::AnyComponentStore;

use crate::world::World;

/// Collects constraints for a family, then interns it on [`build`](Self::build).
///
/// Each constraint resolves its component's store, creating it if this is
/// the first use of the type.
#[must_use = "a family builder does nothing until `build` is called"]
pub struct FamilyBuilder<'w> {
    world: &'w World,
    filter: Filter,
    stores: Vec<Rc<dyn AnyComponentStore>>,
}

impl<'w> FamilyBuilder<'w> {
    pub(crate) fn new(world: &'w World) -> Self {
        Self {
            world,
            filter: Filter::new(),
            stores: Vec::new(),
        }
    }

    /// Members must have a `T`.
    pub fn all_of<T: Component>(self) -> Self {
        self.constrain::<T>(Filter::all_of)
    }

    /// Members must not have a `T`.
    pub fn none_of<T: Component>(self) -> Self {
        self.constrain::<T>(Filter::none_of)
    }

    /// Members must have at least one of the `any_of` components.
    pub fn any_of<T: Component>(self) -> Self {
        self.constrain::<T>(Filter::any_of)
    }

    /// The filter collected so far.
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Returns the world's family for the collected filter.
    pub fn build(self) -> Rc<Family> {
        self.world.intern_family(self.filter, &self.stores)
    }

    fn constrain<T: Component>(mut self, add: fn(Filter, ComponentBit) -> Filter) -> Self {
        let store = self.world.store::<T>();
        let filter = std::mem::take(&mut self.filter);
        self.filter = add(filter, store.bit());
        self.stores.push(store);
        self
    }
}
