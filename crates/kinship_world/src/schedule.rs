//! Systems and the order they run in.
//!
//! A [`System`] is game logic that reads and writes a [`World`] once per
//! tick. A [`Schedule`] runs its systems in insertion order and stops at
//! the first failure.

use std::fmt;

use kinship_foundation::{ErrorContext, Result};
use tracing::{trace, warn};

use crate::world::World;

/// Logic run against a world once per tick.
pub trait System {
    /// Name used in logs and error context.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Inactive systems are skipped by [`Schedule::run`].
    fn is_active(&self) -> bool {
        true
    }

    /// Advances this system by `delta` seconds.
    ///
    /// # Errors
    ///
    /// Any error aborts the rest of the tick.
    fn update(&mut self, world: &World, delta: f32) -> Result<()>;
}

/// Ordered list of systems.
#[derive(Default)]
pub struct Schedule {
    systems: Vec<Box<dyn System>>,
}

impl Schedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append a system.
    #[must_use]
    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.add(system);
        self
    }

    /// Appends a system; it runs after every system already added.
    pub fn add(&mut self, system: impl System + 'static) -> &mut Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Returns the number of systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns true if there are no systems.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Returns the system names in run order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.systems.iter().map(|s| s.name().to_owned()).collect()
    }

    /// Runs every active system once, in order.
    ///
    /// # Errors
    ///
    /// Returns the first system error, with the system's name attached as
    /// context. Later systems do not run.
    pub fn run(&mut self, world: &World, delta: f32) -> Result<()> {
        for system in &mut self.systems {
            if !system.is_active() {
                trace!(system = system.name(), "skipping inactive system");
                continue;
            }

            if let Err(mut err) = system.update(world, delta) {
                warn!(system = system.name(), error = %err, "system failed");
                let context = match err.context.take() {
                    Some(context) => context.with_frame(system.name()),
                    None => ErrorContext::new().with_operation(system.name()),
                };
                return Err(err.with_context(context));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule")
            .field("systems", &self.names())
            .finish()
    }
}
