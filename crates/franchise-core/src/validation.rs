//! # Validation Module
//!
//! Input validation shared by the entity rules and the use cases.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Use case, stage 1 (THIS MODULE)                              │
//! │  ├── Pure, synchronous, no I/O                                         │
//! │  └── Rejects bad input before any gateway is touched                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity rules (types.rs, also THIS MODULE)                    │
//! │  └── update_name / update_stock re-check their own invariants          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (stock >= 0)                                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use franchise_core::error::EntityKind;
//! use franchise_core::validation::{validate_entity_name, validate_stock};
//!
//! assert_eq!(validate_entity_name(EntityKind::Branch, "  Downtown ").unwrap(), "Downtown");
//! assert!(validate_stock("Stock", -1).is_err());
//! ```

use crate::error::{EntityKind, ValidationError, ValidationResult};
use crate::MAX_NAME_LENGTH;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name and returns it trimmed.
///
/// ## Rules
/// - Leading/trailing whitespace is removed first
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LENGTH`] characters after trimming
///
/// Length is counted in characters, not bytes, so "Café" is 4.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::empty(field));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::too_long(field, MAX_NAME_LENGTH));
    }

    Ok(name.to_string())
}

/// Validates the name of a franchise, branch or product.
///
/// The field label in the error is "`<Entity>` name", e.g. "Product name".
pub fn validate_entity_name(entity: EntityKind, name: &str) -> ValidationResult<String> {
    validate_name(&name_field(entity), name)
}

/// The field label used in name validation errors.
pub fn name_field(entity: EntityKind) -> String {
    format!("{} name", entity)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (out of stock)
pub fn validate_stock(field: &str, stock: i32) -> ValidationResult<i32> {
    if stock < 0 {
        return Err(ValidationError::negative(field));
    }

    Ok(stock)
}

// =============================================================================
// Unit Tests
// =============================================================================
