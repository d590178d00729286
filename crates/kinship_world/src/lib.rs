//! The Kinship world and its system schedule.
//!
//! This crate provides:
//! - [`World`] - Composition root owning entities, stores, and families
//! - [`FamilyBuilder`] - Declarative family construction by component type
//! - [`WorldConfig`] - Initial sizing
//! - [`System`] and [`Schedule`] - Ordered per-tick game logic

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod config;
pub mod schedule;
pub mod world;

pub use builder::FamilyBuilder;
pub use config::{DEFAULT_INITIAL_ENTITY_CAPACITY, WorldConfig};
pub use schedule::{Schedule, System};
pub use world::World;
