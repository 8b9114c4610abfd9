//! # Error Types
//!
//! Domain-specific error types for franchise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  franchise-core errors (this file)                                     │
//! │  ├── CoreError        - What every use case returns (two kinds only)   │
//! │  │   ├── Validation   - ValidationError                                │
//! │  │   └── NotFound     - NotFoundError                                  │
//! │  │                                                                      │
//! │  gateway errors (gateway.rs)                                           │
//! │  └── GatewayError     - Anything a store reports                       │
//! │                                                                         │
//! │  franchise-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: DbError → GatewayError → ValidationError::Gateway → CoreError   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity, ID, field)
//! 3. The boundary layer only ever sees the two [`CoreError`] kinds
//! 4. Wrapped causes stay reachable through `Error::source()`

use std::fmt;

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::types::EntityId;

// =============================================================================
// Entity Kind
// =============================================================================

/// The three entity types of the aggregate, used to label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Franchise,
    Branch,
    Product,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Franchise => write!(f, "Franchise"),
            EntityKind::Branch => write!(f, "Branch"),
            EntityKind::Product => write!(f, "Product"),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Error returned by every use case.
///
/// Exactly two kinds exist. Anything else that goes wrong underneath (a
/// store outage, a constraint violation) arrives here as
/// [`ValidationError::Gateway`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller-supplied data violates a field constraint, or a gateway call
    /// failed and was normalized.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced entity, or an entity-parent relationship, does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl CoreError {
    /// Machine-readable error code for the boundary layer.
    ///
    /// ```text
    /// Validation → "BUSINESS_VALIDATION_ERROR"
    /// NotFound   → "ENTITY_NOT_FOUND"
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "BUSINESS_VALIDATION_ERROR",
            CoreError::NotFound(_) => "ENTITY_NOT_FOUND",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }

    /// Shorthand for a plain "entity with ID not found" error.
    pub fn not_found(entity: EntityKind, id: EntityId) -> Self {
        CoreError::NotFound(NotFoundError::Entity { entity, id })
    }

    /// Shorthand for "entity not found in parent" (compound existence check).
    pub fn not_found_in(
        entity: EntityKind,
        id: EntityId,
        parent: EntityKind,
        parent_id: EntityId,
    ) -> Self {
        CoreError::NotFound(NotFoundError::Relation {
            entity,
            id,
            parent,
            parent_id,
        })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any I/O happens, or by the entity rules themselves.
/// Never retried; the caller fixes the input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    #[error("{field} cannot be empty")]
    Empty { field: String },

    /// A text field is longer than allowed after trimming.
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: String, max: usize },

    /// A numeric field is below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// A gateway call failed and was normalized into a validation error.
    ///
    /// ## When This Occurs
    /// - Store unreachable or pool exhausted
    /// - Constraint violation reported by the store
    /// - Update of a row that disappeared between read and write
    ///
    /// The original failure is kept as the error source.
    #[error("{context}: {source}")]
    Gateway {
        context: String,
        #[source]
        source: GatewayError,
    },
}

impl ValidationError {
    pub fn empty(field: impl Into<String>) -> Self {
        ValidationError::Empty {
            field: field.into(),
        }
    }

    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    pub fn negative(field: impl Into<String>) -> Self {
        ValidationError::Negative {
            field: field.into(),
        }
    }
}

// =============================================================================
// Not Found Error
// =============================================================================

/// A referenced entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    /// Plain existence check failed.
    #[error("{entity} with ID {id} not found")]
    Entity { entity: EntityKind, id: EntityId },

    /// Compound check failed: the entity may exist, but not under this parent.
    #[error("{entity} with ID {id} not found in {parent} {parent_id}")]
    Relation {
        entity: EntityKind,
        id: EntityId,
        parent: EntityKind,
        parent_id: EntityId,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
