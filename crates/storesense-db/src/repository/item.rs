//! # Item Repository
//!
//! Database operations for store items.
//!
//! ## Key Operations
//! - List a store's items in insertion order (the order dashboards show)
//! - Insert one item, or a batch inside one transaction (catalog import)
//! - Update / delete by id
//!
//! Items are hard-deleted; nothing references them.

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::catalog::generate_id;
use storesense_core::{Item, NewItem};

/// Repository for item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.items();
///
/// let items = repo.list_by_store(&store.id).await?;
/// let item = repo.insert(&store.id, &new_item).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists a store's items in insertion order.
    pub async fn list_by_store(&self, store_id: &str) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT
                id, store_id, name, stock, price_cents, avg_daily_sales,
                low_stock_threshold, created_at, updated_at
            FROM items
            WHERE store_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(store_id = %store_id, count = items.len(), "Listed items");
        Ok(items)
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT
                id, store_id, name, stock, price_cents, avg_daily_sales,
                low_stock_threshold, created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item into `store_id`.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - store doesn't exist
    pub async fn insert(&self, store_id: &str, fields: &NewItem) -> DbResult<Item> {
        let item = build_item(store_id, fields, Utc::now());
        insert_row(&self.pool, &item).await?;
        Ok(item)
    }

    /// Inserts a batch of items in one transaction; all or nothing.
    pub async fn insert_many(&self, store_id: &str, batch: &[NewItem]) -> DbResult<Vec<Item>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(batch.len());

        for fields in batch {
            let item = build_item(store_id, fields, now);
            insert_row(&mut *tx, &item).await?;
            created.push(item);
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(store_id = %store_id, count = created.len(), "Inserted item batch");
        Ok(created)
    }

    /// Saves an edited item and bumps `updated_at`.
    ///
    /// The item's `store_id` is never changed.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn update(&self, item: &Item) -> DbResult<Item> {
        debug!(id = %item.id, "Updating item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                stock = ?3,
                price_cents = ?4,
                avg_daily_sales = ?5,
                low_stock_threshold = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.stock)
        .bind(item.price_cents)
        .bind(item.avg_daily_sales)
        .bind(item.low_stock_threshold)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", &item.id));
        }

        Ok(Item {
            updated_at: now,
            ..item.clone()
        })
    }

    /// Deletes an item.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    pub async fn count_by_store(&self, store_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE store_id = ?1")
            .bind(store_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn build_item(store_id: &str, fields: &NewItem, now: DateTime<Utc>) -> Item {
    Item {
        id: generate_id(),
        store_id: store_id.to_string(),
        name: fields.name.trim().to_string(),
        stock: fields.stock,
        price_cents: fields.price_cents,
        avg_daily_sales: fields.avg_daily_sales,
        low_stock_threshold: fields.low_stock_threshold,
        created_at: now,
        updated_at: now,
    }
}

async fn insert_row<'e, E>(executor: E, item: &Item) -> DbResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    debug!(store_id = %item.store_id, name = %item.name, "Inserting item");

    sqlx::query(
        r#"
        INSERT INTO items (
            id, store_id, name, stock, price_cents, avg_daily_sales,
            low_stock_threshold, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&item.id)
    .bind(&item.store_id)
    .bind(&item.name)
    .bind(item.stock)
    .bind(item.price_cents)
    .bind(item.avg_daily_sales)
    .bind(item.low_stock_threshold)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use storesense_core::{NewStore, Store};

    async fn setup() -> (Database, Store) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db
            .stores()
            .insert(
                "alice",
                &NewStore {
                    name: "Main".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        (db, store)
    }

    fn new_item(name: &str, stock: i64) -> NewItem {
        NewItem {
            name: name.to_string(),
            stock,
            price_cents: 250,
            avg_daily_sales: 1.5,
            low_stock_threshold: None,
        }
    }

    #[tokio::test]
    async fn test_insert_get_list() {
        let (db, store) = setup().await;
        let items = db.items();

        let rice = items.insert(&store.id, &new_item("Rice", 10)).await.unwrap();
        items.insert(&store.id, &new_item("Beans", 0)).await.unwrap();

        let fetched = items.get_by_id(&rice.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Rice");
        assert_eq!(fetched.stock, 10);
        assert_eq!(fetched.avg_daily_sales, 1.5);
        assert_eq!(fetched.low_stock_threshold, None);

        let names: Vec<String> = items
            .list_by_store(&store.id)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Rice", "Beans"]);
    }

    #[tokio::test]
    async fn test_insert_many_is_atomic() {
        let (db, store) = setup().await;
        let items = db.items();

        let created = items
            .insert_many(&store.id, &[new_item("A", 1), new_item("B", 2)])
            .await
            .unwrap();
        assert_eq!(created.len(), 2);

        // Negative stock trips the CHECK constraint on the second row
        let result = items
            .insert_many(&store.id, &[new_item("C", 1), new_item("D", -1)])
            .await;
        assert!(result.is_err());
        assert_eq!(items.count_by_store(&store.id).await.unwrap(), 2);

        assert!(items.insert_many(&store.id, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, store) = setup().await;
        let items = db.items();

        let mut item = items.insert(&store.id, &new_item("Milk", 4)).await.unwrap();
        item.stock = 40;
        item.low_stock_threshold = Some(12);
        items.update(&item).await.unwrap();

        let fetched = items.get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 40);
        assert_eq!(fetched.low_stock_threshold, Some(12));

        items.delete(&item.id).await.unwrap();
        assert!(items.get_by_id(&item.id).await.unwrap().is_none());

        let err = items.delete(&item.id).await.unwrap_err();
        assert!(err.is_not_found());
        let err = items.update(&item).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_item_requires_existing_store() {
        let (db, _) = setup().await;
        let err = db
            .items()
            .insert("no-such-store", &new_item("Stray", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
