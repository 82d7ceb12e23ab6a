//! # Service Layer
//!
//! Tenant-facing operations. Every function takes the [`Database`] handle
//! and the acting user's id explicitly; nothing is cached between calls.
//!
//! ## Ownership Check
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  service::inventory::dashboard(&db, "alice", store_id, &policy)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  owned_store()                                                          │
//! │   ├── store missing           → CoreError::StoreNotFound                │
//! │   ├── store.owner_id ≠ alice  → CoreError::AccessDenied                 │
//! │   └── ok                      → continue with repositories              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storesense_core (forecast / search / plan_import)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`catalog`] - catalog seeding and default-product import
//! - [`stores`] - store creation and registration
//! - [`inventory`] - item edits, search and the dashboard

pub mod catalog;
pub mod inventory;
pub mod stores;

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use storesense_core::{CoreError, Store};

/// Loads a store and checks that `owner_id` owns it.
pub(crate) async fn owned_store(db: &Database, owner_id: &str, store_id: &str) -> DbResult<Store> {
    let store = db
        .stores()
        .get_by_id(store_id)
        .await?
        .ok_or_else(|| CoreError::StoreNotFound(store_id.to_string()))?;

    if let Err(err) = store.ensure_owned_by(owner_id) {
        debug!(store_id = %store_id, owner_id = %owner_id, "Rejected cross-tenant access");
        return Err(err.into());
    }

    Ok(store)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::pool::{Database, DbConfig};
    use crate::service::catalog::seed_catalog;
    use crate::service::stores::create_store;
    use storesense_core::{NewStore, Store};

    /// Fresh in-memory database with the default catalog seeded.
    pub async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_catalog(&db).await.unwrap();
        db
    }

    /// Creates a store of the named catalog type (or untyped) without importing.
    pub async fn store_of_type(db: &Database, owner: &str, type_name: Option<&str>) -> Store {
        let store_type_id = match type_name {
            Some(name) => Some(
                db.catalog()
                    .find_store_type_by_name(name)
                    .await
                    .unwrap()
                    .unwrap()
                    .id,
            ),
            None => None,
        };

        create_store(
            db,
            owner,
            &NewStore {
                name: format!("{owner}'s shop"),
                region: None,
                store_type_id,
            },
        )
        .await
        .unwrap()
    }
}
