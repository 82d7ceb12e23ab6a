//! # Database Error Types
//!
//! Error types for database operations and the service layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)        CoreError (not found, access denied, │
//! │       │                            validation)                          │
//! │       ▼                                  │                              │
//! │  DbError (this module) ◄─────────────────┘                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Web layer maps NotFound → 404, AccessDenied → 403, Validation → 422    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storesense_core::{CoreError, ValidationError};
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Row not found by id.
    ///
    /// ## When This Occurs
    /// - UPDATE or DELETE touched no row
    /// - `fetch_one` returned nothing
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Item referencing a store that does not exist
    /// - Store referencing an unknown store type
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed (includes CHECK constraint failures).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Domain outcome raised by the service layer.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True for repository misses and domain not-found outcomes alike.
    pub fn is_not_found(&self) -> bool {
        match self {
            DbError::NotFound { .. } => true,
            DbError::Domain(err) => err.is_not_found(),
            _ => false,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, DbError::Domain(CoreError::AccessDenied { .. }))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DbError::Domain(CoreError::Validation(_)))
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Domain(CoreError::Validation(err))
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
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "FOREIGN KEY constraint failed"
                if msg.contains("FOREIGN KEY constraint failed") {
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

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(DbError::not_found("Item", "i1").is_not_found());
        assert!(DbError::from(CoreError::StoreNotFound("s1".into())).is_not_found());
        assert!(DbError::from(CoreError::access_denied("s1", "u1")).is_access_denied());

        let err = DbError::from(ValidationError::Negative {
            field: "stock".into(),
        });
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_domain_message_is_transparent() {
        let err = DbError::from(CoreError::ItemNotFound("i9".into()));
        assert_eq!(err.to_string(), "Item not found: i9");
    }
}
