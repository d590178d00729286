//! Core identifiers, bit sets, and error types for Kinship.
//!
//! This crate provides:
//! - [`EntityId`] - Recyclable integer entity identifiers
//! - [`ComponentBit`] - Stable bit positions assigned to component types
//! - [`BitSet`] - Growable bit set used for signatures, presence, and membership
//! - [`Component`] - Marker trait for types storable as components
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bitset;
pub mod component;
pub mod entity;
pub mod error;

pub use bitset::BitSet;
pub use component::{Component, ComponentBit};
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};
