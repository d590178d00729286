//! Configuration for a world.

/// Default number of entities a world is sized for up front.
pub const DEFAULT_INITIAL_ENTITY_CAPACITY: usize = 128;

/// Configuration for a [`World`](crate::World).
///
/// Controls initial sizing only; every structure grows on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Entities the pool, signature cache, and each component store are
    /// sized for before the first growth.
    pub initial_entity_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            initial_entity_capacity: DEFAULT_INITIAL_ENTITY_CAPACITY,
        }
    }
}

impl WorldConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the initial entity capacity.
    #[must_use]
    pub fn with_initial_entity_capacity(mut self, capacity: usize) -> Self {
        self.initial_entity_capacity = capacity;
        self
    }
}
