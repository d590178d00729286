//! Families: interned entity queries that stay consistent under iteration.
//!
//! This crate provides:
//! - [`Filter`] - The all-of / none-of / any-of predicate over signatures
//! - [`Family`] - Live matching set with deferred, reentrant-safe iteration
//! - [`FamilyRegistry`] - Interning of families by filter

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod family;
pub mod filter;
pub mod registry;

pub use family::Family;
pub use filter::Filter;
pub use registry::FamilyRegistry;
