//! # storesense-core: Pure Inventory Logic for StoreSense
//!
//! This crate turns raw item records into restocking signals and knows how a
//! new store is seeded from the default catalog. Everything here is a pure
//! function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StoreSense Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Web layer (outside this workspace)              │   │
//! │  │        Register ──► Dashboard ──► Search ──► Edit item          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            storesense-db (repositories + services)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storesense-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ forecast │  │ catalog  │  │  search  │  │  validation  │   │   │
//! │  │   │ metrics  │  │ templates│  │ suggest  │  │    rules     │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Data model (StoreType, DefaultProduct, Store, Item)
//! - [`money`] - Money type with integer arithmetic
//! - [`forecast`] - Days-to-sell-out, reorder amount, low-stock flag, value
//! - [`catalog`] - Static default catalog and import planning
//! - [`search`] - Case-insensitive item search with catalog suggestions
//! - [`validation`] - Input validation before anything reaches the forecast
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storesense_core::forecast::{compute_item_metrics, ForecastInput, ForecastPolicy};
//! use storesense_core::Money;
//!
//! let input = ForecastInput::new(10, Money::from_cents(1000), 2.0);
//! let metrics = compute_item_metrics(&input, &ForecastPolicy::default());
//!
//! assert_eq!(metrics.days_to_sell_out, Some(5.0));
//! assert_eq!(metrics.reorder_amount, 4);
//! assert!(metrics.low_stock);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod forecast;
pub mod money;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use forecast::{ForecastPolicy, ItemForecast, ItemMetrics};
pub use money::Money;
pub use search::SearchOutcome;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Low-stock threshold applied when an item carries none of its own.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Days of projected demand a reorder has to cover.
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;

/// Days of demand below which stock counts as low regardless of threshold.
pub const DEFAULT_COVER_DAYS: f64 = 3.0;

/// Maximum length of item, store and product names.
pub const MAX_NAME_LENGTH: usize = 200;
