//! The world: composition root for entities, components, and families.
//!
//! A [`World`] owns the entity registry, the component index, the
//! signature cache, one [`ComponentStore`] per component type, and the
//! family registry. Every operation takes `&self`, so iteration callbacks
//! can capture the world and keep mutating it while a family is being
//! iterated.

use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kinship_family::{Family, FamilyRegistry, Filter};
use kinship_foundation::{BitSet, Component, ComponentBit, EntityId, Result};
use kinship_storage::{
    AnyComponentStore, ComponentIndex, ComponentStore, EntityListener, EntityRegistry, Signatures,
};
use tracing::debug;

use crate::builder::FamilyBuilder;
use crate::config::WorldConfig;

/// Entities, their components, and the families querying them.
pub struct World {
    config: WorldConfig,
    entities: EntityRegistry,
    components: ComponentIndex,
    signatures: Rc<Signatures>,
    /// Indexed by component bit.
    stores: RefCell<Vec<Rc<dyn AnyComponentStore>>>,
    families: FamilyRegistry,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates an empty world sized for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(WorldConfig::new().with_initial_entity_capacity(capacity))
    }

    /// Creates an empty world from `config`.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        let capacity = config.initial_entity_capacity;
        let signatures = Rc::new(Signatures::with_capacity(capacity));
        Self {
            entities: EntityRegistry::with_capacity(capacity),
            components: ComponentIndex::new(),
            families: FamilyRegistry::new(Rc::clone(&signatures)),
            signatures,
            stores: RefCell::new(Vec::new()),
            config,
        }
    }

    /// The configuration this world was created with.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Creates an entity.
    ///
    /// Reuses the most recently destroyed identity if there is one.
    /// Entity listeners (component stores, families, and any registered
    /// with [`add_listener`](Self::add_listener)) are notified before this
    /// returns.
    pub fn create(&self) -> EntityId {
        self.entities.create()
    }

    /// Destroys an entity, removing all of its components.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidEntity`](kinship_foundation::ErrorKind::InvalidEntity)
    /// if the entity is not live.
    pub fn destroy(&self, entity: EntityId) -> Result<()> {
        self.entities.borrow_pool().validate(entity)?;

        // Strip components before the lifecycle broadcast so every family
        // sees its final removal last, whatever order it subscribed in.
        let held: Vec<Rc<dyn AnyComponentStore>> = {
            let stores = self.stores.borrow();
            let signature = self.signatures.signature(entity);
            signature.ones().filter_map(|bit| stores.get(bit).cloned()).collect()
        };
        for store in held {
            store.deregister(entity);
        }

        self.entities.destroy(entity)?;
        self.signatures.clear(entity);
        Ok(())
    }

    /// Checks if an entity is live.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains(entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the live entities in ascending order.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        self.entities.entities()
    }

    /// Returns a copy of the signature of `entity`.
    #[must_use]
    pub fn signature(&self, entity: EntityId) -> BitSet {
        self.signatures.signature(entity).clone()
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Returns the store for `T`, creating it on first use.
    ///
    /// A new store is assigned the next component bit and registered as
    /// an entity listener so destroyed entities lose their `T`.
    ///
    /// # Panics
    ///
    /// Panics if the store at `T`'s bit holds another component type,
    /// which would be an internal bug.
    pub fn store<T: Component>(&self) -> Rc<ComponentStore<T>> {
        if let Some(existing) = self.components.get::<T>().and_then(|bit| self.store_at(bit)) {
            return existing
                .into_any()
                .downcast::<ComponentStore<T>>()
                .expect("component store registered under the wrong bit");
        }

        let bit = self.components.index_of::<T>();
        let store = Rc::new(ComponentStore::<T>::new(
            bit,
            self.entities.pool(),
            Rc::clone(&self.signatures),
            self.config.initial_entity_capacity,
        ));
        self.entities.add_listener(store.clone());

        let mut stores = self.stores.borrow_mut();
        debug_assert_eq!(stores.len(), bit.index());
        stores.push(store.clone());

        debug!(component = type_name::<T>(), ?bit, "created component store");
        store
    }

    /// Returns the bit assigned to `T`, creating its store on first use.
    #[must_use]
    pub fn component_bit<T: Component>(&self) -> ComponentBit {
        self.store::<T>().bit()
    }

    /// Returns the type-erased store at `bit`, if one exists.
    #[must_use]
    pub fn store_at(&self, bit: ComponentBit) -> Option<Rc<dyn AnyComponentStore>> {
        self.stores.borrow().get(bit.index()).cloned()
    }

    /// Returns the type name registered at `bit`.
    #[must_use]
    pub fn component_name(&self, bit: ComponentBit) -> Option<&'static str> {
        self.components.name_of(bit)
    }

    /// Returns the number of component types in use.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // =========================================================================
    // Families
    // =========================================================================

    /// Declares a family and returns the shared instance for its filter.
    ///
    /// ```ignore
    /// let movers = world.family(|f| f.all_of::<Position>().all_of::<Velocity>().none_of::<Frozen>());
    /// ```
    pub fn family<'w>(
        &'w self,
        declare: impl FnOnce(FamilyBuilder<'w>) -> FamilyBuilder<'w>,
    ) -> Rc<Family> {
        declare(self.family_builder()).build()
    }

    /// Starts declaring a family.
    #[must_use]
    pub fn family_builder(&self) -> FamilyBuilder<'_> {
        FamilyBuilder::new(self)
    }

    pub(crate) fn intern_family(
        &self,
        filter: Filter,
        stores: &[Rc<dyn AnyComponentStore>],
    ) -> Rc<Family> {
        self.families.intern(filter, stores, &self.entities)
    }

    /// Checks whether `family` belongs to this world.
    #[must_use]
    pub fn has_family(&self, family: &Rc<Family>) -> bool {
        self.families.contains(family)
    }

    /// Returns the number of distinct families.
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Returns every family in creation order.
    #[must_use]
    pub fn families(&self) -> Vec<Rc<Family>> {
        self.families.families()
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Registers an entity lifecycle listener.
    ///
    /// Returns `false` if it was already registered.
    pub fn add_listener(&self, listener: Rc<dyn EntityListener>) -> bool {
        self.entities.add_listener(listener)
    }

    /// Unregisters an entity lifecycle listener.
    ///
    /// Returns `true` if it was registered.
    pub fn remove_listener<L: ?Sized>(&self, listener: &Rc<L>) -> bool {
        self.entities.remove_listener(listener)
    }

    /// Checks whether an entity lifecycle listener is registered.
    #[must_use]
    pub fn has_listener<L: ?Sized>(&self, listener: &Rc<L>) -> bool {
        self.entities.has_listener(listener)
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("entities", &self.entity_count())
            .field("components", &self.component_count())
            .field("families", &self.family_count())
            .finish()
    }
}
