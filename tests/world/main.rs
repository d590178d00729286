//! Integration tests for Layer 3: World
//!
//! End-to-end scenarios through the world: families built by component
//! type, mutation during iteration, and the system schedule.

mod schedule;
