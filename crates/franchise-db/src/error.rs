//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GatewayError (franchise-core) ← At the gateway trait boundary         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ValidationError::Gateway ← Wrapped by the use case with context       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use franchise_core::gateway::GatewayError;
use franchise_core::EntityId;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging.
#[derive(Debug, Error)]
pub enum DbError {
    /// Row not found in database.
    ///
    /// ## When This Occurs
    /// - `update` of a row deleted in the meantime
    /// - `fetch_one` returns no rows
    #[error("{entity} row not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// CHECK constraint violation.
    ///
    /// ## When This Occurs
    /// - Negative stock written past the use cases
    /// - Empty or over-long name written past the use cases
    #[error("Check constraint violation: {message}")]
    CheckViolation { message: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Branch saved with a non-existent franchise_id
    /// - Product saved with a non-existent branch_id
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given table and id.
    pub fn not_found(entity: &'static str, id: Option<EntityId>) -> Self {
        DbError::NotFound {
            entity,
            id: id.map_or_else(|| "unassigned".to_string(), |id| id.to_string()),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record",
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "CHECK constraint failed: <expr>"
                // "FOREIGN KEY constraint failed"
                if msg.contains("CHECK constraint failed") {
                    DbError::CheckViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Gateways report every database failure as a [`GatewayError`] whose
/// message is this error's text.
impl From<DbError> for GatewayError {
    fn from(err: DbError) -> Self {
        GatewayError::with_source(err.to_string(), err)
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
