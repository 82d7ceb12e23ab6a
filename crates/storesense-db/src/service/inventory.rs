//! # Inventory Operations
//!
//! Item edits, search with catalog suggestions, and the store dashboard.
//! Every operation resolves the store through the ownership check first.
//!
//! ## Search Flow
//! ```text
//! search(&db, owner, store_id, "oil")
//!      │
//!      ▼
//! store items whose name contains "oil" (case-insensitive)
//!      │
//!      ├── some match, or query empty ──► items, no suggestions
//!      │
//!      ▼ none
//! default products containing "oil"
//!   (store's own type if set, else every type) ──► suggestions
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::DbResult;
use crate::pool::Database;
use crate::service::owned_store;
use storesense_core::forecast::{forecast_items, summarize, InventorySummary};
use storesense_core::search::search_items;
use storesense_core::validation::{validate_item_update, validate_new_item};
use storesense_core::{
    CoreError, ForecastPolicy, Item, ItemForecast, ItemUpdate, NewItem, SearchOutcome, Store,
};

/// Everything a store's dashboard page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dashboard {
    pub store: Store,
    /// One row per item, in insertion order.
    pub rows: Vec<ItemForecast>,
    pub summary: InventorySummary,
}

impl Dashboard {
    /// Rows flagged as low on stock.
    pub fn low_stock(&self) -> impl Iterator<Item = &ItemForecast> {
        self.rows.iter().filter(|row| row.metrics.low_stock)
    }
}

/// Builds the dashboard for one of the owner's stores.
pub async fn dashboard(
    db: &Database,
    owner_id: &str,
    store_id: &str,
    policy: &ForecastPolicy,
) -> DbResult<Dashboard> {
    let store = owned_store(db, owner_id, store_id).await?;
    let items = db.items().list_by_store(&store.id).await?;

    let rows = forecast_items(items, policy);
    let summary = summarize(&rows);

    debug!(
        store_id = %store.id,
        items = summary.item_count,
        low_stock = summary.low_stock_count,
        "Dashboard computed"
    );

    Ok(Dashboard {
        store,
        rows,
        summary,
    })
}

/// Searches a store's items by name, falling back to catalog suggestions.
///
/// The query is matched as typed; an empty query lists every item.
pub async fn search(
    db: &Database,
    owner_id: &str,
    store_id: &str,
    query: &str,
) -> DbResult<SearchOutcome> {
    let store = owned_store(db, owner_id, store_id).await?;
    let items = db.items().list_by_store(&store.id).await?;

    let store_type_id = store.store_type_id.as_deref();
    let catalog = db.catalog();
    let outcome = search_items(items, query, store_type_id, || async move {
        match store_type_id {
            Some(id) => catalog.list_default_products(id).await,
            None => catalog.list_all_default_products().await,
        }
    })
    .await?;

    if outcome.has_suggestions() {
        debug!(
            store_id = %store.id,
            query = %query,
            suggestions = outcome.suggestions.len(),
            "No item matched, returning suggestions"
        );
    }

    Ok(outcome)
}

/// Adds a hand-entered item to one of the owner's stores.
pub async fn add_item(
    db: &Database,
    owner_id: &str,
    store_id: &str,
    fields: &NewItem,
) -> DbResult<Item> {
    validate_new_item(fields)?;
    let store = owned_store(db, owner_id, store_id).await?;

    let item = db.items().insert(&store.id, fields).await?;
    info!(store_id = %store.id, item_id = %item.id, "Item added");
    Ok(item)
}

/// Applies a partial edit to an item in one of the owner's stores.
///
/// An empty update returns the item unchanged without writing.
pub async fn update_item(
    db: &Database,
    owner_id: &str,
    item_id: &str,
    update: &ItemUpdate,
) -> DbResult<Item> {
    validate_item_update(update)?;

    let mut item = owned_item(db, owner_id, item_id).await?;
    if update.is_empty() {
        return Ok(item);
    }

    item.apply(update);
    let item = db.items().update(&item).await?;

    debug!(item_id = %item.id, stock = item.stock, "Item updated");
    Ok(item)
}

/// Deletes an item from one of the owner's stores.
pub async fn delete_item(db: &Database, owner_id: &str, item_id: &str) -> DbResult<()> {
    let item = owned_item(db, owner_id, item_id).await?;
    db.items().delete(&item.id).await?;

    info!(store_id = %item.store_id, item_id = %item.id, "Item deleted");
    Ok(())
}

async fn owned_item(db: &Database, owner_id: &str, item_id: &str) -> DbResult<Item> {
    let item = db
        .items()
        .get_by_id(item_id)
        .await?
        .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

    owned_store(db, owner_id, &item.store_id).await?;
    Ok(item)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::catalog::import_defaults;
    use crate::service::testing::{seeded_db, store_of_type};
    use storesense_core::Money;

    fn new_item(name: &str, stock: i64) -> NewItem {
        NewItem {
            name: name.to_string(),
            stock,
            price_cents: 100,
            avg_daily_sales: 1.0,
            low_stock_threshold: None,
        }
    }

    #[tokio::test]
    async fn test_supermarket_dashboard() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", Some("Supermarket")).await;
        import_defaults(&db, "alice", &store.id).await.unwrap();

        let dash = dashboard(&db, "alice", &store.id, &ForecastPolicy::default())
            .await
            .unwrap();

        assert_eq!(dash.store.id, store.id);
        assert_eq!(dash.summary.item_count, 5);
        assert_eq!(dash.summary.total_units, 220);
        assert_eq!(dash.summary.total_value, Money::from_cents(97_120));

        // Bread Loaf: 40 on hand, 10/day over 7 days needs 30 more
        let low: Vec<&str> = dash.low_stock().map(|row| row.item.name.as_str()).collect();
        assert_eq!(low, vec!["Bread Loaf"]);
        assert_eq!(dash.summary.low_stock_count, 1);

        let rice = &dash.rows[0];
        assert_eq!(rice.item.name, "Rice 5kg");
        assert_eq!(rice.metrics.days_to_sell_out, Some(10.0));
        assert_eq!(rice.metrics.reorder_amount, 0);
    }

    #[tokio::test]
    async fn test_dashboard_policy_lead_time() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", Some("Supermarket")).await;
        import_defaults(&db, "alice", &store.id).await.unwrap();

        let policy = ForecastPolicy::default().with_lead_time_days(14);
        let dash = dashboard(&db, "alice", &store.id, &policy).await.unwrap();

        // Rice: 4/day × 14 = 56 needed, 40 on hand
        assert_eq!(dash.rows[0].metrics.reorder_amount, 16);
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", None).await;

        let dash = dashboard(&db, "alice", &store.id, &ForecastPolicy::default())
            .await
            .unwrap();
        assert!(dash.rows.is_empty());
        assert_eq!(dash.summary, InventorySummary::default());
    }

    #[tokio::test]
    async fn test_dashboard_rejects_other_tenant() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", None).await;

        let err = dashboard(&db, "mallory", &store.id, &ForecastPolicy::default())
            .await
            .unwrap_err();
        assert!(err.is_access_denied());
    }

    #[tokio::test]
    async fn test_search_empty_query_lists_everything() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", Some("Supermarket")).await;
        import_defaults(&db, "alice", &store.id).await.unwrap();

        let outcome = search(&db, "alice", &store.id, "").await.unwrap();
        assert_eq!(outcome.items.len(), 5);
        assert_eq!(outcome.items[0].name, "Rice 5kg");
        assert!(!outcome.has_suggestions());
    }

    #[tokio::test]
    async fn test_search_matches_the_query_as_typed() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", Some("Supermarket")).await;
        import_defaults(&db, "alice", &store.id).await.unwrap();

        let outcome = search(&db, "alice", &store.id, " rice").await.unwrap();
        assert!(outcome.items.is_empty());
        assert!(outcome.suggestions.is_empty());

        let outcome = search(&db, "alice", &store.id, "   ").await.unwrap();
        assert!(outcome.items.is_empty());

        let outcome = search(&db, "alice", &store.id, "oil 1").await.unwrap();
        assert_eq!(outcome.items.len(), 1);

        let long = "rice".repeat(50);
        let outcome = search(&db, "alice", &store.id, &long).await.unwrap();
        assert!(outcome.items.is_empty());
    }

    #[tokio::test]
    async fn test_search_matches_case_insensitively() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", Some("Supermarket")).await;
        import_defaults(&db, "alice", &store.id).await.unwrap();

        let outcome = search(&db, "alice", &store.id, "MILK").await.unwrap();
        let names: Vec<&str> = outcome.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk 1L"]);
        assert!(outcome.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_match_or_suggestion() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", Some("Supermarket")).await;
        import_defaults(&db, "alice", &store.id).await.unwrap();

        let outcome = search(&db, "alice", &store.id, "zzz").await.unwrap();
        assert!(outcome.items.is_empty());
        assert!(outcome.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_search_suggestions_follow_store_type() {
        let db = seeded_db().await;

        let supermarket = store_of_type(&db, "alice", Some("Supermarket")).await;
        let outcome = search(&db, "alice", &supermarket.id, "oil").await.unwrap();
        assert!(outcome.items.is_empty());
        let names: Vec<&str> = outcome.suggestions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cooking Oil 1L"]);

        let pharmacy = store_of_type(&db, "alice", Some("Pharmacy")).await;
        let outcome = search(&db, "alice", &pharmacy.id, "oil").await.unwrap();
        assert!(outcome.suggestions.is_empty());

        let untyped = store_of_type(&db, "alice", None).await;
        let outcome = search(&db, "alice", &untyped.id, "loaf").await.unwrap();
        let names: Vec<&str> = outcome.suggestions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bread Loaf", "Sourdough Loaf"]);
    }

    #[tokio::test]
    async fn test_search_rejects_other_tenant() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", None).await;

        let err = search(&db, "mallory", &store.id, "").await.unwrap_err();
        assert!(err.is_access_denied());
    }

    #[tokio::test]
    async fn test_item_lifecycle() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", None).await;

        let item = add_item(&db, "alice", &store.id, &new_item("Tea", 3)).await.unwrap();

        let updated = update_item(
            &db,
            "alice",
            &item.id,
            &ItemUpdate {
                stock: Some(30),
                low_stock_threshold: Some(Some(10)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.stock, 30);
        assert_eq!(updated.low_stock_threshold, Some(10));
        assert_eq!(updated.name, "Tea");

        let unchanged = update_item(&db, "alice", &item.id, &ItemUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged.stock, 30);

        let clear: ItemUpdate = serde_json::from_str(r#"{"low_stock_threshold": null}"#).unwrap();
        let cleared = update_item(&db, "alice", &item.id, &clear).await.unwrap();
        assert_eq!(cleared.low_stock_threshold, None);
        let stored = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stored.low_stock_threshold, None);
        assert_eq!(stored.stock, 30);

        delete_item(&db, "alice", &item.id).await.unwrap();
        let err = delete_item(&db, "alice", &item.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_item_edits_are_validated() {
        let db = seeded_db().await;
        let store = store_of_type(&db, "alice", None).await;

        let err = add_item(&db, "alice", &store.id, &new_item("Tea", -1))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let item = add_item(&db, "alice", &store.id, &new_item("Tea", 1)).await.unwrap();
        let err = update_item(
            &db,
            "alice",
            &item.id,
            &ItemUpdate {
                price_cents: Some(-5),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_cross_tenant_item_access_is_rejected() {
        let db = seeded_db().await;
        let alice_store = store_of_type(&db, "alice", None).await;
        let item = add_item(&db, "alice", &alice_store.id, &new_item("Tea", 5))
            .await
            .unwrap();

        let err = add_item(&db, "mallory", &alice_store.id, &new_item("Spam", 1))
            .await
            .unwrap_err();
        assert!(err.is_access_denied());

        let err = update_item(
            &db,
            "mallory",
            &item.id,
            &ItemUpdate {
                stock: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_access_denied());

        let err = delete_item(&db, "mallory", &item.id).await.unwrap_err();
        assert!(err.is_access_denied());

        let still_there = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(still_there.stock, 5);
    }
}
