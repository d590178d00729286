//! Entity identities, component storage, and signatures for Kinship.
//!
//! This crate provides:
//! - [`EntityRegistry`] - Identity allocation with lifecycle notifications
//! - [`ComponentStore`] - Dense per-type component storage with presence tracking
//! - [`ComponentIndex`] - Component type to bit position mapping
//! - [`Signatures`] - Per-entity component bit sets
//! - [`Listeners`] - Ordered, duplicate-free observer collections

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod index;
pub mod listener;
pub mod signature;

pub use component::{AnyComponentStore, ComponentListener, ComponentStore};
pub use entity::{EntityListener, EntityPool, EntityRegistry};
pub use index::ComponentIndex;
pub use listener::Listeners;
pub use signature::Signatures;
