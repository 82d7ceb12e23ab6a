//! # Default Catalog
//!
//! Static reference data: the store types a user can pick at registration
//! and the starter products each one brings.
//!
//! ## Seeding Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Process start                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DEFAULT_CATALOG ──► seed_catalog() (storesense-db, once)               │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                 store_types + default_products rows                    │
//! │                                                                         │
//! │  Store registered with type "Supermarket"                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_import(store, defaults) ← THIS MODULE                             │
//! │       │   one NewItem per DefaultProduct, starter_stock → stock         │
//! │       ▼                                                                 │
//! │  items rows in the new store                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{DefaultProduct, NewItem, Store};

// =============================================================================
// Templates
// =============================================================================

/// A starter product before it has a database identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductTemplate {
    pub name: &'static str,
    pub price_cents: i64,
    pub avg_daily_sales: f64,
    pub starter_stock: i64,
}

/// A store type with its starter products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreTypeTemplate {
    pub name: &'static str,
    pub products: &'static [ProductTemplate],
}

const fn product(
    name: &'static str,
    price_cents: i64,
    avg_daily_sales: f64,
    starter_stock: i64,
) -> ProductTemplate {
    ProductTemplate {
        name,
        price_cents,
        avg_daily_sales,
        starter_stock,
    }
}

/// The catalog inserted on first start.
pub const DEFAULT_CATALOG: &[StoreTypeTemplate] = &[
    StoreTypeTemplate {
        name: "Supermarket",
        products: &[
            product("Rice 5kg", 1250, 4.0, 40),
            product("Cooking Oil 1L", 499, 3.0, 30),
            product("Sugar 1kg", 225, 5.0, 50),
            product("Milk 1L", 149, 8.0, 60),
            product("Bread Loaf", 299, 10.0, 40),
        ],
    },
    StoreTypeTemplate {
        name: "Pharmacy",
        products: &[
            product("Paracetamol 500mg", 350, 6.0, 80),
            product("Hand Sanitizer", 450, 2.0, 25),
            product("Bandages Pack", 275, 1.5, 30),
            product("Vitamin C Tablets", 899, 1.0, 20),
        ],
    },
    StoreTypeTemplate {
        name: "Electronics",
        products: &[
            product("USB-C Cable", 999, 3.0, 25),
            product("Phone Charger", 1999, 1.5, 15),
            product("AA Batteries 4-Pack", 549, 4.0, 40),
            product("Wired Earphones", 1499, 1.0, 10),
        ],
    },
    StoreTypeTemplate {
        name: "Clothing",
        products: &[
            product("Cotton T-Shirt", 1200, 2.0, 30),
            product("Denim Jeans", 3500, 0.8, 15),
            product("Socks 3-Pack", 799, 3.0, 40),
        ],
    },
    StoreTypeTemplate {
        name: "Bakery",
        products: &[
            product("Croissant", 180, 25.0, 60),
            product("Sourdough Loaf", 650, 8.0, 20),
            product("Birthday Cake", 2800, 0.5, 3),
        ],
    },
];

/// Returns the static catalog.
#[inline]
pub fn default_catalog() -> &'static [StoreTypeTemplate] {
    DEFAULT_CATALOG
}

/// Finds a store type template by name, ignoring case and surrounding space.
///
/// ## Example
/// ```rust
/// use storesense_core::catalog::find_store_type_template;
///
/// let supermarket = find_store_type_template(" supermarket ").unwrap();
/// assert_eq!(supermarket.products.len(), 5);
/// assert!(find_store_type_template("Aquarium").is_none());
/// ```
pub fn find_store_type_template(name: &str) -> Option<&'static StoreTypeTemplate> {
    let name = name.trim();
    DEFAULT_CATALOG
        .iter()
        .find(|template| template.name.eq_ignore_ascii_case(name))
}

/// Number of default products across the whole static catalog.
pub fn default_product_count() -> usize {
    DEFAULT_CATALOG.iter().map(|t| t.products.len()).sum()
}

// =============================================================================
// Import planning
// =============================================================================

/// Plans the items an import creates in `store`.
///
/// One [`NewItem`] per template, in template order. Templates of another
/// store type are skipped, and a store without a type gets nothing. Repeated
/// imports are not deduplicated: each call plans a fresh copy.
pub fn plan_import(store: &Store, defaults: &[DefaultProduct]) -> Vec<NewItem> {
    let Some(store_type_id) = store.store_type_id.as_deref() else {
        return Vec::new();
    };

    defaults
        .iter()
        .filter(|template| template.store_type_id == store_type_id)
        .map(NewItem::from)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_new_item, validate_product_name};
    use chrono::Utc;
    use std::collections::HashSet;

    fn store(store_type_id: Option<&str>) -> Store {
        Store {
            id: "store-1".to_string(),
            owner_id: "user-1".to_string(),
            name: "Corner Shop".to_string(),
            region: None,
            store_type_id: store_type_id.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn defaults_for(store_type_id: &str, template: &StoreTypeTemplate) -> Vec<DefaultProduct> {
        template
            .products
            .iter()
            .enumerate()
            .map(|(i, p)| DefaultProduct {
                id: format!("{store_type_id}-{i}"),
                store_type_id: store_type_id.to_string(),
                name: p.name.to_string(),
                price_cents: p.price_cents,
                avg_daily_sales: p.avg_daily_sales,
                starter_stock: p.starter_stock,
            })
            .collect()
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<String> = DEFAULT_CATALOG
            .iter()
            .map(|t| t.name.to_lowercase())
            .collect();
        assert_eq!(names.len(), DEFAULT_CATALOG.len());
    }

    #[test]
    fn test_catalog_templates_are_valid_items() {
        for store_type in DEFAULT_CATALOG {
            assert!(!store_type.products.is_empty(), "{}", store_type.name);
            for p in store_type.products {
                validate_product_name(p.name).unwrap();
                let item = NewItem {
                    name: p.name.to_string(),
                    stock: p.starter_stock,
                    price_cents: p.price_cents,
                    avg_daily_sales: p.avg_daily_sales,
                    low_stock_threshold: None,
                };
                validate_new_item(&item).unwrap();
            }
        }
    }

    #[test]
    fn test_supermarket_has_five_products() {
        let supermarket = find_store_type_template("Supermarket").unwrap();
        assert_eq!(supermarket.products.len(), 5);
        assert_eq!(default_product_count(), 5 + 4 + 4 + 3 + 3);
    }

    #[test]
    fn test_plan_import_copies_templates() {
        let supermarket = find_store_type_template("Supermarket").unwrap();
        let defaults = defaults_for("st-super", supermarket);

        let planned = plan_import(&store(Some("st-super")), &defaults);

        assert_eq!(planned.len(), 5);
        for (item, template) in planned.iter().zip(&defaults) {
            assert_eq!(item.name, template.name);
            assert_eq!(item.stock, template.starter_stock);
            assert_eq!(item.price_cents, template.price_cents);
            assert_eq!(item.avg_daily_sales, template.avg_daily_sales);
        }
    }

    #[test]
    fn test_plan_import_without_store_type_is_empty() {
        let supermarket = find_store_type_template("Supermarket").unwrap();
        let defaults = defaults_for("st-super", supermarket);

        assert!(plan_import(&store(None), &defaults).is_empty());
    }

    #[test]
    fn test_plan_import_ignores_other_types() {
        let pharmacy = find_store_type_template("pharmacy").unwrap();
        let defaults = defaults_for("st-pharma", pharmacy);

        assert!(plan_import(&store(Some("st-super")), &defaults).is_empty());
    }

    #[test]
    fn test_plan_import_repeats_without_dedup() {
        let bakery = find_store_type_template("Bakery").unwrap();
        let defaults = defaults_for("st-bakery", bakery);
        let target = store(Some("st-bakery"));

        let first = plan_import(&target, &defaults);
        let second = plan_import(&target, &defaults);
        assert_eq!(first, second);
        assert_eq!(first.len() + second.len(), 6);
    }
}
