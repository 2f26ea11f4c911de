//! Integration tests for Basket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p basket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `wishlist_scoping` - migration, identity switches and hydration
//! - `cart_persistence` - cart quantity rules against the file backend
//! - `fail_soft` - corrupt payloads and unavailable or full storage
//!
//! Shared fixtures live here so every test file builds products and stored
//! payloads the same way.

use std::rc::Rc;

use basket_core::{LocalStorage, MemoryBackend, Price, Product};

/// Shared in-memory storage, cloneable into several collections.
pub type SharedStorage = Rc<LocalStorage<MemoryBackend>>;

/// Fresh, empty in-memory storage.
#[must_use]
pub fn memory_storage() -> SharedStorage {
    Rc::new(LocalStorage::new(MemoryBackend::new()))
}

/// A product with a predictable name and a price in cents.
#[must_use]
pub fn product(id: &str, cents: i64) -> Product {
    Product::new(id, format!("Product {id}"), Price::from_cents(cents), "test")
}

/// JSON array of `products`, as the wishlist persists it.
#[must_use]
pub fn wishlist_json(products: &[Product]) -> String {
    serde_json::to_string(products).unwrap_or_default()
}

/// Ids of `products` in order.
#[must_use]
pub fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}
