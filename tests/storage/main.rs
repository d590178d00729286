//! Integration tests for Layer 1: Storage
//!
//! Tests for the entity registry, component stores, the component index,
//! and the signature cache.

mod components;
mod entities;
mod index;
