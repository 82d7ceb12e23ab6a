//! # storesense-db: Database Layer for StoreSense
//!
//! Persistence and tenant-facing services for StoreSense. SQLite through
//! sqlx, with the forecast and catalog rules coming from `storesense-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StoreSense Data Flow                             │
//! │                                                                         │
//! │  Web handler (dashboard, search, register)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storesense-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   service     │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │               │    │               │    │  (embedded)  │   │   │
//! │  │   │ ownership     │───►│ CatalogRepo   │    │              │   │   │
//! │  │   │ seeding       │    │ StoreRepo     │    │ 001_initial  │   │   │
//! │  │   │ dashboard     │    │ ItemRepo      │    │ _schema.sql  │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (STORESENSE_DB_PATH, default ./storesense.db)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`config`] - Environment configuration
//! - [`repository`] - Catalog, store and item repositories
//! - [`service`] - Ownership-checked operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storesense_db::{service, Database, StoreSenseConfig};
//!
//! let config = StoreSenseConfig::load()?;
//! let db = Database::new(config.db_config()).await?;
//! service::catalog::seed_catalog(&db).await?;
//!
//! let dash = service::inventory::dashboard(&db, user_id, store_id, &config.forecast_policy()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, StoreSenseConfig};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::item::ItemRepository;
pub use repository::store::StoreRepository;

pub use service::catalog::SeedOutcome;
pub use service::inventory::Dashboard;
