//! # Domain Types
//!
//! The StoreSense data model.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  1     * ┌──────────────────┐                      │
//! │  │   StoreType     │─────────►│  DefaultProduct  │  read-only templates │
//! │  │  id, name       │          │  price, sales,   │                      │
//! │  └────────▲────────┘          │  starter_stock   │                      │
//! │           │ 0..1              └──────────────────┘                      │
//! │  ┌────────┴────────┐  1     * ┌──────────────────┐                      │
//! │  │     Store       │─────────►│      Item        │  tenant data         │
//! │  │  owner_id       │          │  stock, price,   │                      │
//! │  │  region         │          │  avg_daily_sales │                      │
//! │  └─────────────────┘          └──────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is keyed by a UUID v4 string. `Store::owner_id` is the tenant
//! boundary: an item is only reachable through a store its user owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Store Type
// =============================================================================

/// A store category (e.g. "Pharmacy") selecting a default starter catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StoreType {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Default Product
// =============================================================================

/// A template item belonging to one store type.
///
/// Never mutated by tenant actions; importing copies its fields into a fresh
/// [`Item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct DefaultProduct {
    pub id: String,
    pub store_type_id: String,
    pub name: String,
    /// Unit price in cents.
    pub price_cents: i64,
    pub avg_daily_sales: f64,
    /// Stock an imported item starts with.
    pub starter_stock: i64,
}

impl DefaultProduct {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Store
// =============================================================================

/// A store owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Store {
    pub id: String,
    /// Tenant key. Operations by any other user are rejected.
    pub owner_id: String,
    pub name: String,
    pub region: Option<String>,
    /// Without a store type no starter catalog is imported.
    pub store_type_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Checks whether `user_id` owns this store.
    #[inline]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Rejects the operation unless `user_id` owns this store.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use storesense_core::{CoreError, Store};
    ///
    /// let store = Store {
    ///     id: "s1".into(),
    ///     owner_id: "alice".into(),
    ///     name: "Corner Shop".into(),
    ///     region: None,
    ///     store_type_id: None,
    ///     created_at: Utc::now(),
    /// };
    ///
    /// assert!(store.ensure_owned_by("alice").is_ok());
    /// assert!(matches!(
    ///     store.ensure_owned_by("mallory"),
    ///     Err(CoreError::AccessDenied { .. })
    /// ));
    /// ```
    pub fn ensure_owned_by(&self, user_id: &str) -> CoreResult<()> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(CoreError::access_denied(&self.id, user_id))
        }
    }
}

/// Fields for a store about to be created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewStore {
    pub name: String,
    pub region: Option<String>,
    pub store_type_id: Option<String>,
}

// =============================================================================
// Item
// =============================================================================

/// An inventory line belonging to exactly one store.
///
/// ## Lifecycle
/// ```text
/// Created ──► Active (stock / price / sales edits) ──► Deleted
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub store_id: String,
    pub name: String,
    /// Units on hand, never negative.
    pub stock: i64,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Average units sold per day; zero means the item is not moving.
    pub avg_daily_sales: f64,
    /// Overrides the policy's default low-stock threshold.
    pub low_stock_threshold: Option<i64>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Applies a partial edit in place. Validation happens beforehand.
    pub fn apply(&mut self, update: &ItemUpdate) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(price_cents) = update.price_cents {
            self.price_cents = price_cents;
        }
        if let Some(avg_daily_sales) = update.avg_daily_sales {
            self.avg_daily_sales = avg_daily_sales;
        }
        if let Some(threshold) = update.low_stock_threshold {
            self.low_stock_threshold = threshold;
        }
    }
}

/// Fields for an item about to be created, by hand or by catalog import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    pub stock: i64,
    pub price_cents: i64,
    pub avg_daily_sales: f64,
    pub low_stock_threshold: Option<i64>,
}

impl From<&DefaultProduct> for NewItem {
    fn from(template: &DefaultProduct) -> Self {
        NewItem {
            name: template.name.clone(),
            stock: template.starter_stock,
            price_cents: template.price_cents,
            avg_daily_sales: template.avg_daily_sales,
            low_stock_threshold: None,
        }
    }
}

/// A partial edit of an item. `None` leaves the field untouched.
///
/// `low_stock_threshold: Some(None)` clears the override so the policy
/// default applies again. In JSON that is an explicit `null`; a missing
/// key leaves the threshold alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub avg_daily_sales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub low_stock_threshold: Option<Option<i64>>,
}

impl ItemUpdate {
    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.stock.is_none()
            && self.price_cents.is_none()
            && self.avg_daily_sales.is_none()
            && self.low_stock_threshold.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
