//! # Repository Module
//!
//! SQL lives here and nowhere else. Repositories do not check ownership;
//! see [`crate::service`].
//!
//! ## Available Repositories
//!
//! - [`CatalogRepository`](catalog::CatalogRepository) - Store types and default products
//! - [`StoreRepository`](store::StoreRepository) - Tenant stores
//! - [`ItemRepository`](item::ItemRepository) - Store items

pub mod catalog;
pub mod item;
pub mod store;
