//! Component marker trait and component bit positions.

use std::fmt;

/// A type that can be stored as a component.
///
/// Component stores keep a dense array of values indexed by entity, so
/// slots that hold no component are filled with `Default::default()`.
/// Every `Default + 'static` type qualifies.
pub trait Component: Default + 'static {}

impl<T: Default + 'static> Component for T {}

/// Bit position assigned to a component type.
///
/// Positions are small, dense, assigned on first use, and never reused
/// within a world. They index into entity signatures and family filters.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ComponentBit(u32);

impl ComponentBit {
    /// Creates a component bit from its raw position.
    #[must_use]
    pub const fn new(position: u32) -> Self {
        Self(position)
    }

    /// Returns the bit position as an index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ComponentBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentBit({})", self.0)
    }
}
