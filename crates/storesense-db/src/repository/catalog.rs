//! # Catalog Repository
//!
//! Store types and their default products. Written once by the seeder,
//! read by imports and search suggestions.
//!
//! ## Tables
//! ```text
//! store_types (id, name, created_at)
//!      │ 1
//!      │
//!      │ *
//! default_products (id, store_type_id, name, price_cents,
//!                   avg_daily_sales, starter_stock)
//! ```

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use storesense_core::catalog::StoreTypeTemplate;
use storesense_core::{DefaultProduct, StoreType};

/// Row counts written by [`CatalogRepository::seed_if_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededCounts {
    pub store_types: usize,
    pub default_products: usize,
}

/// Repository for catalog reference data.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists all store types in insertion order.
    pub async fn list_store_types(&self) -> DbResult<Vec<StoreType>> {
        let store_types =
            sqlx::query_as::<_, StoreType>("SELECT id, name FROM store_types ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        Ok(store_types)
    }

    /// Gets a store type by id.
    pub async fn get_store_type(&self, id: &str) -> DbResult<Option<StoreType>> {
        let store_type =
            sqlx::query_as::<_, StoreType>("SELECT id, name FROM store_types WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(store_type)
    }

    /// Finds a store type by name, ignoring ASCII case.
    ///
    /// If a seeding race left duplicates, the oldest row wins.
    pub async fn find_store_type_by_name(&self, name: &str) -> DbResult<Option<StoreType>> {
        let store_type = sqlx::query_as::<_, StoreType>(
            r#"
            SELECT id, name
            FROM store_types
            WHERE name = ?1 COLLATE NOCASE
            ORDER BY rowid
            LIMIT 1
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(store_type)
    }

    /// Inserts a store type with a fresh id.
    pub async fn insert_store_type(&self, name: &str) -> DbResult<StoreType> {
        let store_type = StoreType {
            id: generate_id(),
            name: name.trim().to_string(),
        };
        insert_store_type_row(&self.pool, &store_type).await?;
        Ok(store_type)
    }

    /// Inserts a default product (id should be generated beforehand).
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - store type doesn't exist
    pub async fn insert_default_product(&self, product: &DefaultProduct) -> DbResult<DefaultProduct> {
        insert_default_product_row(&self.pool, product).await?;
        Ok(product.clone())
    }

    /// Lists the default products of one store type, in insertion order.
    pub async fn list_default_products(&self, store_type_id: &str) -> DbResult<Vec<DefaultProduct>> {
        let products = sqlx::query_as::<_, DefaultProduct>(
            r#"
            SELECT id, store_type_id, name, price_cents, avg_daily_sales, starter_stock
            FROM default_products
            WHERE store_type_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(store_type_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(store_type_id = %store_type_id, count = products.len(), "Listed default products");
        Ok(products)
    }

    /// Lists every default product across all store types.
    pub async fn list_all_default_products(&self) -> DbResult<Vec<DefaultProduct>> {
        let products = sqlx::query_as::<_, DefaultProduct>(
            r#"
            SELECT id, store_type_id, name, price_cents, avg_daily_sales, starter_stock
            FROM default_products
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a default product by id.
    pub async fn get_default_product(&self, id: &str) -> DbResult<Option<DefaultProduct>> {
        let product = sqlx::query_as::<_, DefaultProduct>(
            r#"
            SELECT id, store_type_id, name, price_cents, avg_daily_sales, starter_stock
            FROM default_products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn count_store_types(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store_types")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_default_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM default_products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Store type names that appear more than once.
    ///
    /// Non-empty only after two processes seeded an empty database at the
    /// same moment.
    pub async fn duplicate_store_type_names(&self) -> DbResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name
            FROM store_types
            GROUP BY name COLLATE NOCASE
            HAVING COUNT(*) > 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    /// Inserts every template if, and only if, no store type exists yet.
    ///
    /// Runs under `BEGIN IMMEDIATE`, so the write lock is taken before the
    /// count is read. A concurrent seeder waits on the busy timeout, then
    /// sees the committed rows and returns `None`.
    pub async fn seed_if_empty(
        &self,
        templates: &[StoreTypeTemplate],
    ) -> DbResult<Option<SeededCounts>> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        match seed_rows(&mut *conn, templates).await {
            Ok(Some(counts)) => {
                sqlx::query("COMMIT")
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
                Ok(Some(counts))
            }
            Ok(None) => {
                sqlx::query("ROLLBACK").execute(&mut *conn).await?;
                Ok(None)
            }
            Err(err) => {
                if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
                    warn!(error = %rollback, "Rollback after failed seed did not complete");
                }
                Err(err)
            }
        }
    }
}

async fn seed_rows(
    conn: &mut SqliteConnection,
    templates: &[StoreTypeTemplate],
) -> DbResult<Option<SeededCounts>> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store_types")
        .fetch_one(&mut *conn)
        .await?;

    if existing > 0 {
        debug!(existing, "Catalog already populated");
        return Ok(None);
    }

    let mut counts = SeededCounts {
        store_types: 0,
        default_products: 0,
    };

    for template in templates {
        let store_type = StoreType {
            id: generate_id(),
            name: template.name.to_string(),
        };
        insert_store_type_row(&mut *conn, &store_type).await?;
        counts.store_types += 1;

        for product in template.products {
            let default_product = DefaultProduct {
                id: generate_id(),
                store_type_id: store_type.id.clone(),
                name: product.name.to_string(),
                price_cents: product.price_cents,
                avg_daily_sales: product.avg_daily_sales,
                starter_stock: product.starter_stock,
            };
            insert_default_product_row(&mut *conn, &default_product).await?;
            counts.default_products += 1;
        }
    }

    Ok(Some(counts))
}

async fn insert_store_type_row<'e, E>(executor: E, store_type: &StoreType) -> DbResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    debug!(name = %store_type.name, "Inserting store type");

    sqlx::query("INSERT INTO store_types (id, name, created_at) VALUES (?1, ?2, ?3)")
        .bind(&store_type.id)
        .bind(&store_type.name)
        .bind(Utc::now())
        .execute(executor)
        .await?;

    Ok(())
}

async fn insert_default_product_row<'e, E>(executor: E, product: &DefaultProduct) -> DbResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO default_products (
            id, store_type_id, name, price_cents, avg_daily_sales, starter_stock
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&product.id)
    .bind(&product.store_type_id)
    .bind(&product.name)
    .bind(product.price_cents)
    .bind(product.avg_daily_sales)
    .bind(product.starter_stock)
    .execute(executor)
    .await?;

    Ok(())
}

/// Generates a new UUID v4 identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
