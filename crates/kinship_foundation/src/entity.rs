//! Entity identifiers.

use std::fmt;

/// Entity identifier: a recyclable integer with no intrinsic payload.
///
/// Identities are dense, starting at zero, and are handed out again after
/// the entity they named has been destroyed. Component storage and
/// signatures are indexed directly by [`EntityId::index`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates an entity ID from its raw integer value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the identity as an index into dense storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Creates an entity ID from a dense storage index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("entity index exceeds u32 range"))
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl From<EntityId> for usize {
    fn from(id: EntityId) -> Self {
        id.index()
    }
}
