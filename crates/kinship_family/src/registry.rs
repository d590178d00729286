//! Family interning.
//!
//! Families are deduplicated by filter: asking for a filter that already
//! has a family returns that family, with no new subscriptions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kinship_foundation::BitSet;
use kinship_storage::{AnyComponentStore, EntityRegistry, Signatures};
use tracing::debug;

use crate::family::Family;
use crate::filter::Filter;

/// Interning table of every family in a world.
#[derive(Debug)]
pub struct FamilyRegistry {
    signatures: Rc<Signatures>,
    families: RefCell<Families>,
}

#[derive(Debug, Default)]
struct Families {
    by_filter: HashMap<Filter, Rc<Family>>,
    /// Creation order.
    ordered: Vec<Rc<Family>>,
}

impl FamilyRegistry {
    /// Creates an empty registry over the given signature cache.
    #[must_use]
    pub fn new(signatures: Rc<Signatures>) -> Self {
        Self {
            signatures,
            families: RefCell::new(Families::default()),
        }
    }

    /// Returns the family for `filter`, creating it if needed.
    ///
    /// A new family is subscribed once to each store in `stores` whose
    /// component the filter mentions, and to `entities`, then seeded with
    /// every live entity whose signature matches. `stores` must cover
    /// every bit the filter mentions; extra and duplicate stores are
    /// ignored.
    pub fn intern(
        &self,
        filter: Filter,
        stores: &[Rc<dyn AnyComponentStore>],
        entities: &EntityRegistry,
    ) -> Rc<Family> {
        if let Some(family) = self.get(&filter) {
            return family;
        }

        let family = Rc::new(Family::new(filter.clone(), Rc::clone(&self.signatures)));

        let named = filter.components();
        let mut subscribed = BitSet::new();
        for store in stores {
            let bit = store.bit().index();
            if named.contains(bit) && subscribed.insert(bit) {
                let added = store.listeners().add(family.clone());
                debug_assert!(added, "family subscribed twice to {}", store.type_name());
            }
        }
        debug_assert!(
            named.is_subset(&subscribed),
            "family filter names a component without a store"
        );

        family.seed(entities.entities());
        entities.add_listener(family.clone());

        debug!(?filter, matching = family.len(), "created family");

        let mut families = self.families.borrow_mut();
        families.by_filter.insert(filter, Rc::clone(&family));
        families.ordered.push(Rc::clone(&family));
        family
    }

    /// Returns the existing family for `filter`, if any.
    #[must_use]
    pub fn get(&self, filter: &Filter) -> Option<Rc<Family>> {
        self.families.borrow().by_filter.get(filter).cloned()
    }

    /// Checks whether `family` was created by this registry.
    #[must_use]
    pub fn contains(&self, family: &Rc<Family>) -> bool {
        self.families
            .borrow()
            .ordered
            .iter()
            .any(|f| Rc::ptr_eq(f, family))
    }

    /// Returns every family in creation order.
    #[must_use]
    pub fn families(&self) -> Vec<Rc<Family>> {
        self.families.borrow().ordered.clone()
    }

    /// Returns the number of families.
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.borrow().ordered.len()
    }

    /// Returns true if no family has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.borrow().ordered.is_empty()
    }
}
