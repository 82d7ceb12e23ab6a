//! # Validation Module
//!
//! Input validation for StoreSense. The forecast engine assumes non-negative,
//! finite numbers; this module is where anything else gets turned away.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form                                                     │
//! │  └── parse_quantity / parse_price / parse_daily_sales (raw text)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service call (storesense-db)                                 │
//! │  └── validate_new_item / validate_item_update / validate_new_store     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (stock >= 0, price_cents >= 0, avg_daily_sales >= 0)        │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storesense_core::validation::{parse_price, parse_quantity};
//!
//! assert_eq!(parse_quantity("stock", " 12 ").unwrap(), 12);
//! assert_eq!(parse_price("price", "12.50").unwrap(), 1250);
//! assert!(parse_price("price", "twelve").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{ItemUpdate, NewItem, NewStore};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an item or default product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use storesense_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Rice 5kg").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a store name. Same rules as product names.
pub fn validate_store_name(name: &str) -> ValidationResult<()> {
    validate_name("store name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Stock must be zero or more.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    non_negative("stock", stock)
}

/// Price must be zero or more. Zero is a free item.
///
/// ## Example
/// ```rust
/// use storesense_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    non_negative("price", cents)
}

/// A low-stock threshold must be zero or more.
pub fn validate_threshold(threshold: i64) -> ValidationResult<()> {
    non_negative("low stock threshold", threshold)
}

/// Average daily sales must be a finite number, zero or more.
pub fn validate_avg_daily_sales(sales: f64) -> ValidationResult<()> {
    if !sales.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "average daily sales".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if sales < 0.0 {
        return Err(ValidationError::Negative {
            field: "average daily sales".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates every field of an item about to be created.
pub fn validate_new_item(item: &NewItem) -> ValidationResult<()> {
    validate_product_name(&item.name)?;
    validate_stock(item.stock)?;
    validate_price_cents(item.price_cents)?;
    validate_avg_daily_sales(item.avg_daily_sales)?;
    if let Some(threshold) = item.low_stock_threshold {
        validate_threshold(threshold)?;
    }
    Ok(())
}

/// Validates the fields an update actually sets.
pub fn validate_item_update(update: &ItemUpdate) -> ValidationResult<()> {
    if let Some(name) = &update.name {
        validate_product_name(name)?;
    }
    if let Some(stock) = update.stock {
        validate_stock(stock)?;
    }
    if let Some(price_cents) = update.price_cents {
        validate_price_cents(price_cents)?;
    }
    if let Some(sales) = update.avg_daily_sales {
        validate_avg_daily_sales(sales)?;
    }
    if let Some(Some(threshold)) = update.low_stock_threshold {
        validate_threshold(threshold)?;
    }
    Ok(())
}

/// Validates a store about to be created. The store type reference is
/// checked against the catalog by the caller.
pub fn validate_new_store(store: &NewStore) -> ValidationResult<()> {
    validate_store_name(&store.name)?;
    if let Some(region) = &store.region {
        if region.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::TooLong {
                field: "region".to_string(),
                max: MAX_NAME_LENGTH,
            });
        }
    }
    if let Some(store_type_id) = &store.store_type_id {
        validate_uuid(store_type_id)?;
    }
    Ok(())
}

// =============================================================================
// Raw Input Parsers
// =============================================================================

fn not_a_number(field: &str, raw: &str) -> ValidationError {
    ValidationError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    }
}

/// Parses a whole, non-negative quantity from form text.
pub fn parse_quantity(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: i64 = raw.parse().map_err(|_| not_a_number(field, raw))?;
    non_negative(field, value)?;
    Ok(value)
}

/// Parses a price such as `"12"`, `"12.5"` or `"12.50"` into cents.
///
/// At most two decimal places; no exponent or sign.
pub fn parse_price(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if let Some(rest) = raw.strip_prefix('-') {
        if rest.parse::<f64>().is_ok() {
            return Err(ValidationError::Negative {
                field: field.to_string(),
            });
        }
        return Err(not_a_number(field, raw));
    }

    let (major, minor) = raw.split_once('.').unwrap_or((raw, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (major.is_empty() && minor.is_empty()) || !all_digits(major) || !all_digits(minor) {
        return Err(not_a_number(field, raw));
    }

    if minor.len() > 2 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "at most two decimal places".to_string(),
        });
    }

    let too_large = || ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX / 100,
    };

    let major: i64 = if major.is_empty() {
        0
    } else {
        major.parse().map_err(|_| too_large())?
    };
    let minor: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().map_err(|_| not_a_number(field, raw))? * 10,
        _ => minor.parse().map_err(|_| not_a_number(field, raw))?,
    };

    major
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(minor))
        .ok_or_else(too_large)
}

/// Parses an average daily sales figure such as `"2.5"`.
pub fn parse_daily_sales(raw: &str) -> ValidationResult<f64> {
    let field = "average daily sales";
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: f64 = raw.parse().map_err(|_| not_a_number(field, raw))?;
    validate_avg_daily_sales(value)?;
    Ok(value)
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use storesense_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
