//! # Store Management
//!
//! Creating stores for a tenant, with or without the registration import.

use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use crate::service::catalog::import_defaults;
use storesense_core::catalog::find_store_type_template;
use storesense_core::validation::validate_new_store;
use storesense_core::{CoreError, Item, NewStore, Store, StoreType};

/// Creates a store owned by `owner_id`.
///
/// ## Returns
/// * `Err(Validation)` - bad name, region or store type id
/// * `Err(StoreTypeNotFound)` - the store type is not in the catalog
pub async fn create_store(db: &Database, owner_id: &str, fields: &NewStore) -> DbResult<Store> {
    validate_new_store(fields)?;

    if let Some(store_type_id) = fields.store_type_id.as_deref() {
        if db.catalog().get_store_type(store_type_id).await?.is_none() {
            return Err(CoreError::StoreTypeNotFound(store_type_id.to_string()).into());
        }
    }

    let store = db.stores().insert(owner_id, fields).await?;

    info!(store_id = %store.id, owner_id = %owner_id, "Store created");
    Ok(store)
}

/// Registration flow: creates the store, then imports its type's defaults.
///
/// The two steps are separate writes. If the import fails the store is kept
/// and the import can be retried with [`import_defaults`].
pub async fn register_store(
    db: &Database,
    owner_id: &str,
    fields: &NewStore,
) -> DbResult<(Store, Vec<Item>)> {
    let store = create_store(db, owner_id, fields).await?;
    let items = import_defaults(db, owner_id, &store.id).await?;
    Ok((store, items))
}

/// Resolves a store type by name, ignoring case and surrounding spaces.
///
/// ## Returns
/// * `Err(StoreTypeNotFound)` - no catalog row carries that name
pub async fn store_type_named(db: &Database, name: &str) -> DbResult<StoreType> {
    // Prefer the static catalog's spelling when it knows the name
    let lookup = find_store_type_template(name)
        .map(|template| template.name)
        .unwrap_or(name);

    db.catalog()
        .find_store_type_by_name(lookup)
        .await?
        .ok_or_else(|| CoreError::StoreTypeNotFound(name.trim().to_string()).into())
}

/// Stores owned by `owner_id`, oldest first.
pub async fn list_stores(db: &Database, owner_id: &str) -> DbResult<Vec<Store>> {
    db.stores().list_by_owner(owner_id).await
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::catalog::generate_id;
    use crate::service::testing::seeded_db;

    #[tokio::test]
    async fn test_register_store_imports_defaults() {
        let db = seeded_db().await;
        let pharmacy = db
            .catalog()
            .find_store_type_by_name("Pharmacy")
            .await
            .unwrap()
            .unwrap();

        let (store, items) = register_store(
            &db,
            "alice",
            &NewStore {
                name: "Corner Chemist".to_string(),
                region: Some("North".to_string()),
                store_type_id: Some(pharmacy.id.clone()),
            },
        )
        .await
        .unwrap();

        assert_eq!(store.owner_id, "alice");
        assert_eq!(store.store_type_id, Some(pharmacy.id));
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| item.store_id == store.id));
    }

    #[tokio::test]
    async fn test_register_untyped_store() {
        let db = seeded_db().await;

        let (store, items) = register_store(
            &db,
            "alice",
            &NewStore {
                name: "Pop-up".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(store.store_type_id.is_none());
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_create_store_rejects_unknown_type() {
        let db = seeded_db().await;

        let err = create_store(
            &db,
            "alice",
            &NewStore {
                name: "Ghost".to_string(),
                region: None,
                store_type_id: Some(generate_id()),
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_not_found());
        assert!(list_stores(&db, "alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_type_named() {
        let db = seeded_db().await;

        let bakery = store_type_named(&db, " bakery ").await.unwrap();
        assert_eq!(bakery.name, "Bakery");

        let err = store_type_named(&db, "Aquarium").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Aquarium"));
    }

    #[tokio::test]
    async fn test_create_store_validates_name() {
        let db = seeded_db().await;

        let err = create_store(&db, "alice", &NewStore::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_list_stores_is_per_owner() {
        let db = seeded_db().await;

        for (owner, name) in [("alice", "A1"), ("bob", "B1"), ("alice", "A2")] {
            create_store(
                &db,
                owner,
                &NewStore {
                    name: name.to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        let names: Vec<String> = list_stores(&db, "alice")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["A1", "A2"]);
        assert_eq!(list_stores(&db, "bob").await.unwrap().len(), 1);
        assert!(list_stores(&db, "carol").await.unwrap().is_empty());
    }
}
