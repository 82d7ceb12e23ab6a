//! # Catalog Seeding and Import
//!
//! `seed_catalog` runs at every process start and writes the static catalog
//! only into an empty database. `import_defaults` / `import_one` copy
//! default products into a tenant's store as ordinary items.
//!
//! Imports are not deduplicated: importing twice gives two copies.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::DbResult;
use crate::pool::Database;
use crate::service::owned_store;
use storesense_core::catalog::{default_catalog, plan_import};
use storesense_core::{CoreError, Item, NewItem};

/// What [`seed_catalog`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum SeedOutcome {
    /// Store types already existed; nothing was written.
    AlreadySeeded,
    Seeded {
        store_types: usize,
        default_products: usize,
    },
}

/// Populates the catalog if, and only if, it has no store type yet.
///
/// Safe to call on every start, including from several processes at once:
/// the count check and the inserts run under one write lock, so exactly one
/// caller seeds and the others report `AlreadySeeded`. Duplicate names left
/// by older databases are logged, not repaired.
pub async fn seed_catalog(db: &Database) -> DbResult<SeedOutcome> {
    let catalog = db.catalog();

    match catalog.seed_if_empty(default_catalog()).await? {
        Some(counts) => {
            info!(
                store_types = counts.store_types,
                default_products = counts.default_products,
                "Catalog seeded"
            );
            Ok(SeedOutcome::Seeded {
                store_types: counts.store_types,
                default_products: counts.default_products,
            })
        }
        None => {
            let duplicates = catalog.duplicate_store_type_names().await?;
            if !duplicates.is_empty() {
                warn!(?duplicates, "Catalog contains duplicate store types");
            }
            debug!("Catalog already seeded");
            Ok(SeedOutcome::AlreadySeeded)
        }
    }
}

/// Copies every default product of the store's type into the store.
///
/// A store without a type gets nothing and no error. Returns the items
/// created, in catalog order.
pub async fn import_defaults(db: &Database, owner_id: &str, store_id: &str) -> DbResult<Vec<Item>> {
    let store = owned_store(db, owner_id, store_id).await?;

    let Some(store_type_id) = store.store_type_id.as_deref() else {
        warn!(store_id = %store.id, "Import requested for a store without a store type");
        return Ok(Vec::new());
    };

    let defaults = db.catalog().list_default_products(store_type_id).await?;
    let planned = plan_import(&store, &defaults);
    let created = db.items().insert_many(&store.id, &planned).await?;

    info!(
        store_id = %store.id,
        store_type_id = %store_type_id,
        count = created.len(),
        "Default products imported"
    );

    Ok(created)
}

/// Copies a single default product into the store.
///
/// Any template may be imported, including one suggested from another
/// store type when the store has none of its own.
pub async fn import_one(
    db: &Database,
    owner_id: &str,
    store_id: &str,
    default_product_id: &str,
) -> DbResult<Item> {
    let store = owned_store(db, owner_id, store_id).await?;

    let template = db
        .catalog()
        .get_default_product(default_product_id)
        .await?
        .ok_or_else(|| CoreError::DefaultProductNotFound(default_product_id.to_string()))?;

    let item = db.items().insert(&store.id, &NewItem::from(&template)).await?;

    info!(store_id = %store.id, item_id = %item.id, name = %item.name, "Default product imported");
    Ok(item)
}

// =============================================================================
// Unit Tests
// =============================================================================
