//! # Store Repository
//!
//! Database operations for tenant stores. Ownership is not enforced here;
//! the service layer checks `owner_id` before touching a store's data.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::catalog::generate_id;
use storesense_core::{NewStore, Store};

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Lists the stores a user owns, oldest first.
    pub async fn list_by_owner(&self, owner_id: &str) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT id, owner_id, name, region, store_type_id, created_at
            FROM stores
            WHERE owner_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Gets a store by id, whoever owns it.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            SELECT id, owner_id, name, region, store_type_id, created_at
            FROM stores
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Inserts a new store for `owner_id`.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - unknown store type
    pub async fn insert(&self, owner_id: &str, fields: &NewStore) -> DbResult<Store> {
        let store = Store {
            id: generate_id(),
            owner_id: owner_id.to_string(),
            name: fields.name.trim().to_string(),
            region: fields
                .region
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            store_type_id: fields.store_type_id.clone(),
            created_at: Utc::now(),
        };

        debug!(owner_id = %owner_id, name = %store.name, "Inserting store");

        sqlx::query(
            r#"
            INSERT INTO stores (id, owner_id, name, region, store_type_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&store.id)
        .bind(&store.owner_id)
        .bind(&store.name)
        .bind(&store.region)
        .bind(&store.store_type_id)
        .bind(store.created_at)
        .execute(&self.pool)
        .await?;

        Ok(store)
    }
}
