//! # Error Types
//!
//! Domain-specific error types for storesense-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storesense-core errors (this file)                                    │
//! │  ├── CoreError        - Not-found and ownership outcomes               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storesense-db errors (separate crate)                                 │
//! │  └── DbError          - Database failures, wraps CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → web layer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Division by zero is deliberately absent: an item that does not sell yields
//! an open-ended forecast, never an error.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store id does not exist.
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// Item id does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Store type id (or name) does not exist in the catalog.
    #[error("Store type not found: {0}")]
    StoreTypeNotFound(String),

    /// Default product id does not exist in the catalog.
    #[error("Default product not found: {0}")]
    DefaultProductNotFound(String),

    /// The current user does not own the store being operated on.
    ///
    /// ## When This Occurs
    /// - Opening another tenant's dashboard by id
    /// - Editing or deleting an item whose store belongs to someone else
    ///
    /// The operation is rejected outright; it is never redirected to the
    /// caller's own data.
    #[error("Access denied: user {user_id} does not own store {store_id}")]
    AccessDenied { store_id: String, user_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an AccessDenied error.
    pub fn access_denied(store_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        CoreError::AccessDenied {
            store_id: store_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Whether this is one of the not-found outcomes.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::StoreNotFound(_)
                | CoreError::ItemNotFound(_)
                | CoreError::StoreTypeNotFound(_)
                | CoreError::DefaultProductNotFound(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before a record is written, so the forecast engine only
/// ever sees non-negative, finite numbers.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Text where a number is required.
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// Invalid format (e.g., invalid UUID, NaN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
