//! Component type to bit position mapping.

use std::any::{TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;

use kinship_foundation::{Component, ComponentBit};

/// Assigns each component type a stable bit position on first request.
///
/// Positions are handed out sequentially from zero and never reused, so
/// the table is append-only. It is owned by a world rather than being
/// process-global, which keeps independent worlds independent.
#[derive(Debug, Default)]
pub struct ComponentIndex {
    inner: RefCell<IndexTable>,
}

#[derive(Debug, Default)]
struct IndexTable {
    bits: HashMap<TypeId, ComponentBit>,
    names: Vec<&'static str>,
}

impl ComponentIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bit position of `T`, assigning one if `T` is new.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` component types are registered.
    pub fn index_of<T: Component>(&self) -> ComponentBit {
        let mut table = self.inner.borrow_mut();
        if let Some(&bit) = table.bits.get(&TypeId::of::<T>()) {
            return bit;
        }

        let position = u32::try_from(table.names.len()).expect("too many component types");
        let bit = ComponentBit::new(position);
        table.bits.insert(TypeId::of::<T>(), bit);
        table.names.push(type_name::<T>());
        bit
    }

    /// Returns the bit position of `T` if one has been assigned.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<ComponentBit> {
        self.inner.borrow().bits.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the type name registered at `bit`.
    #[must_use]
    pub fn name_of(&self, bit: ComponentBit) -> Option<&'static str> {
        self.inner.borrow().names.get(bit.index()).copied()
    }

    /// Returns the number of registered component types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().names.len()
    }

    /// Returns true if no component type has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
