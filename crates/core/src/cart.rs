//! Cart facade.
//!
//! Unlike the wishlist, adding a product already in the cart bumps its
//! quantity. [`Cart::update`] sets an absolute quantity and removes the line
//! when the quantity drops to zero or below.

use crate::collection::{CollectionKind, CollectionStore, Flush, Phase, Transition};
use crate::error::Result;
use crate::identity::{Identity, IdentityResolver};
use crate::keys::Namespace;
use crate::signal::SubscriptionId;
use crate::storage::StorageAdapter;
use crate::types::{CartLine, Price, Product, ProductId};

/// Cart rules: add increments quantity of an existing line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartKind;

impl CollectionKind for CartKind {
    type Item = CartLine;
    type Input = Product;

    const NAME: &'static str = "cart";

    fn id(item: &CartLine) -> &ProductId {
        &item.id
    }

    fn is_valid(item: &CartLine) -> bool {
        item.is_valid()
    }

    fn accepts(product: &Product) -> bool {
        product.is_valid()
    }

    fn insert(items: &mut Vec<CartLine>, product: Product) {
        match items.iter_mut().find(|line| line.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => items.push(CartLine::single(&product)),
        }
    }
}

/// Shopping cart of the current shopper.
#[derive(Debug)]
pub struct Cart<S> {
    store: CollectionStore<CartKind, S>,
}

impl<S: StorageAdapter> Cart<S> {
    /// Cart persisted under `cart-<scope>`.
    pub fn new(storage: S) -> Self {
        Self {
            store: CollectionStore::new(storage),
        }
    }

    /// Cart persisted under `<namespace>-<scope>`.
    pub fn with_namespace(namespace: impl Into<Namespace>, storage: S) -> Self {
        Self {
            store: CollectionStore::with_namespace(namespace.into(), storage),
        }
    }

    /// See [`CollectionStore::sync_identity`].
    pub fn sync_identity(&mut self, identity: &Identity) -> Transition {
        self.store.sync_identity(identity)
    }

    /// See [`CollectionStore::refresh`].
    pub fn refresh<R: IdentityResolver + ?Sized>(&mut self, resolver: &R) -> Transition {
        self.store.refresh(resolver)
    }

    /// See [`CollectionStore::flush`].
    pub fn flush(&mut self) -> Flush {
        self.store.flush()
    }

    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        self.store.items()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items().iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of every line's price times quantity, capped at `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items().iter().map(CartLine::line_total).sum()
    }

    /// Quantity of `id` in the cart, zero if absent.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.store.get(id).map_or(0, |line| line.quantity)
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotHydrated` while identity is loading and
    /// `StoreError::InvalidItem` for a product that would not survive a
    /// reload.
    pub fn add(&mut self, product: Product) -> Result<()> {
        self.store.insert(product)
    }

    /// Set the quantity of `id` exactly. Zero or less removes the line;
    /// ids not in the cart are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotHydrated` while identity is loading.
    pub fn update(&mut self, id: &ProductId, quantity: i64) -> Result<()> {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            tracing::debug!(%id, quantity, "clamping oversized quantity");
            return self.set_quantity(id, u32::MAX);
        };
        if quantity == 0 {
            return self.remove(id);
        }
        self.set_quantity(id, quantity)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotHydrated` while identity is loading.
    pub fn remove(&mut self, id: &ProductId) -> Result<()> {
        self.store.remove(id)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotHydrated` while identity is loading.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&[CartLine]) + 'static) -> SubscriptionId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase {
        self.store.phase()
    }

    #[must_use]
    pub const fn store(&self) -> &CollectionStore<CartKind, S> {
        &self.store
    }

    fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> Result<()> {
        self.store.mutate(|lines| {
            if let Some(line) = lines.iter_mut().find(|line| &line.id == id) {
                line.quantity = quantity;
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use crate::error::StoreError;
    use crate::storage::{LocalStorage, MemoryBackend};

    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, "Thing", Price::from_cents(cents), "misc")
    }

    fn guest_cart() -> Cart<LocalStorage<MemoryBackend>> {
        let mut cart = Cart::new(LocalStorage::new(MemoryBackend::new()));
        cart.sync_identity(&Identity::Guest);
        cart
    }

    #[test]
    fn test_add_twice_increments() {
        let mut cart = guest_cart();
        cart.add(product("x", 100)).unwrap();
        cart.add(product("x", 100)).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity(&ProductId::new("x")), 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_update_sets_absolute_quantity() {
        let mut cart = guest_cart();
        cart.add(product("x", 100)).unwrap();
        cart.update(&ProductId::new("x"), 7).unwrap();
        assert_eq!(cart.quantity(&ProductId::new("x")), 7);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = guest_cart();
        cart.add(product("x", 100)).unwrap();
        cart.add(product("y", 100)).unwrap();

        cart.update(&ProductId::new("x"), 0).unwrap();
        cart.update(&ProductId::new("y"), -3).unwrap();

        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_ignored() {
        let mut cart = guest_cart();
        cart.update(&ProductId::new("nope"), 4).unwrap();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_update_clamps_huge_quantity() {
        let mut cart = guest_cart();
        cart.add(product("x", 100)).unwrap();
        cart.update(&ProductId::new("x"), i64::MAX).unwrap();
        assert_eq!(cart.quantity(&ProductId::new("x")), u32::MAX);
    }

    #[test]
    fn test_total() {
        let mut cart = guest_cart();
        cart.add(product("a", 250)).unwrap();
        cart.add(product("a", 250)).unwrap();
        cart.add(product("b", 1000)).unwrap();

        assert_eq!(cart.total(), Price::from_cents(1500));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_persisted_layout() {
        let mut cart = guest_cart();
        cart.add(product("a", 250).with_image("/a.png")).unwrap();

        let raw = cart.store().storage().get("cart-guest").unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "id": "a", "name": "Thing", "price": 2.5, "image": "/a.png", "quantity": 1 }
            ])
        );
    }

    #[test]
    fn test_add_before_hydration_fails() {
        let mut cart = Cart::new(LocalStorage::new(MemoryBackend::new()));
        assert!(cart.add(product("a", 100)).is_err());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_total_of_overflowing_stored_line_saturates() {
        let backend = MemoryBackend::new();
        backend.insert(
            "cart-guest",
            r#"[{"id":"a","name":"A","price":7e28,"image":null,"quantity":2}]"#,
        );
        let mut cart = Cart::new(LocalStorage::new(backend));
        cart.sync_identity(&Identity::Guest);

        assert_eq!(cart.quantity(&ProductId::new("a")), 2);
        assert_eq!(cart.total(), Price::new(Decimal::MAX));
    }

    #[test]
    fn test_total_after_huge_update_saturates() {
        let mut cart = guest_cart();
        let pricey = Product::new("x", "Thing", Price::new(Decimal::MAX), "misc");
        cart.add(pricey).unwrap();
        cart.add(product("y", 100)).unwrap();
        cart.update(&ProductId::new("x"), i64::MAX).unwrap();

        assert_eq!(cart.total(), Price::new(Decimal::MAX));
    }

    #[test]
    fn test_invalid_product_is_not_added() {
        let mut cart = guest_cart();
        assert_eq!(cart.add(product("a", -100)), Err(StoreError::InvalidItem));
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.store().storage().get("cart-guest"), None);
    }
}
