//! # Inventory Search
//!
//! Case-insensitive substring search over a store's items, with a fallback
//! to the default catalog when nothing the store owns matches.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  query = ""        ──► every item, repository order, no suggestions    │
//! │                                                                         │
//! │  query = "milk"    ──► items whose name contains "milk" (any case)     │
//! │                            │                                            │
//! │                            ├── some match ──► items, no suggestions    │
//! │                            │                                            │
//! │                            └── none       ──► suggestions: default     │
//! │                                               products containing      │
//! │                                               "milk" (store's type if  │
//! │                                               set, otherwise all)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Suggestions are previews only. Turning one into an owned item is a
//! separate import.

use serde::{Deserialize, Serialize};
use std::future::Future;
use ts_rs::TS;

use crate::types::{DefaultProduct, Item};

/// Result of a store search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchOutcome {
    pub items: Vec<Item>,
    pub suggestions: Vec<DefaultProduct>,
}

impl SearchOutcome {
    /// True when the store had no match and suggestions were looked up.
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

/// Case-insensitive substring match. An empty needle matches everything.
///
/// The query is used as given: surrounding whitespace is part of the needle.
///
/// ## Example
/// ```rust
/// use storesense_core::search::name_matches;
///
/// assert!(name_matches("Coca-Cola 330ml", "COLA"));
/// assert!(name_matches("Crème Brûlée", "BRÛLÉE"));
/// assert!(!name_matches("Pepsi", "cola"));
/// assert!(!name_matches("Rice 5kg", " rice"));
/// ```
pub fn name_matches(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Keeps the items whose name contains `query`, in their original order.
pub fn filter_items(items: Vec<Item>, query: &str) -> Vec<Item> {
    if query.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| name_matches(&item.name, query))
        .collect()
}

/// Default products matching `query`, restricted to `store_type_id` if set.
///
/// An empty query never produces suggestions.
pub fn suggest(
    defaults: Vec<DefaultProduct>,
    query: &str,
    store_type_id: Option<&str>,
) -> Vec<DefaultProduct> {
    if query.is_empty() {
        return Vec::new();
    }
    defaults
        .into_iter()
        .filter(|template| store_type_id.map_or(true, |id| template.store_type_id == id))
        .filter(|template| name_matches(&template.name, query))
        .collect()
}

/// Runs the full search.
///
/// `load_defaults` is only awaited when the query is non-empty and no item
/// matched, so callers can defer the catalog lookup. Its error is returned
/// unchanged.
pub async fn search_items<F, Fut, E>(
    items: Vec<Item>,
    query: &str,
    store_type_id: Option<&str>,
    load_defaults: F,
) -> Result<SearchOutcome, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<DefaultProduct>, E>>,
{
    let items = filter_items(items, query);

    if !items.is_empty() || query.is_empty() {
        return Ok(SearchOutcome {
            items,
            suggestions: Vec::new(),
        });
    }

    let defaults = load_defaults().await?;
    Ok(SearchOutcome {
        items,
        suggestions: suggest(defaults, query, store_type_id),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
