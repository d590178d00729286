//! Error types for the Kinship system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// Result alias used throughout Kinship.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Kinship operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a component-not-present error.
    #[must_use]
    pub fn not_present(entity: EntityId, component: &'static str) -> Self {
        Self::new(ErrorKind::NotPresent { entity, component })
    }

    /// Creates an invalid entity error.
    #[must_use]
    pub fn invalid_entity(entity: EntityId) -> Self {
        Self::new(ErrorKind::InvalidEntity(entity))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The entity has no component of the requested type.
    #[error("component not present: {component} on {entity}")]
    NotPresent {
        /// The entity that was queried.
        entity: EntityId,
        /// Type name of the component store that was queried.
        component: &'static str,
    },

    /// The entity is out of the allocated range or not live.
    #[error("invalid entity: {0}")]
    InvalidEntity(EntityId),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that failed, e.g. a system name.
    pub operation: Option<String>,
    /// Stack of enclosing operations, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
