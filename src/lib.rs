//! Kinship - Entity-component-system core
//!
//! This crate re-exports all layers of the Kinship system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: kinship_world      — World, family builder, system schedule
//! Layer 2: kinship_family     — Filters, families, deferred iteration, interning
//! Layer 1: kinship_storage    — Entity registry, component stores, signatures
//! Layer 0: kinship_foundation — Core types (EntityId, BitSet, Error)
//! ```

pub use kinship_family as family;
pub use kinship_foundation as foundation;
pub use kinship_storage as storage;
pub use kinship_world as world;

pub use kinship_family::{Family, Filter};
pub use kinship_foundation::{Component, ComponentBit, EntityId, Error, ErrorKind, Result};
pub use kinship_storage::{ComponentListener, ComponentStore, EntityListener};
pub use kinship_world::{FamilyBuilder, Schedule, System, World, WorldConfig};
