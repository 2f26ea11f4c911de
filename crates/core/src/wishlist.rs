//! Wishlist facade.
//!
//! Adding a product that is already saved is a no-op; order is the order in
//! which products were first saved.

use crate::collection::{CollectionKind, CollectionStore, Flush, Phase, Transition};
use crate::error::Result;
use crate::identity::{Identity, IdentityResolver};
use crate::keys::Namespace;
use crate::signal::SubscriptionId;
use crate::storage::StorageAdapter;
use crate::types::{Product, ProductId};

/// Wishlist rules: strictly idempotent add.
#[derive(Debug, Clone, Copy, Default)]
pub struct WishlistKind;

impl CollectionKind for WishlistKind {
    type Item = Product;
    type Input = Product;

    const NAME: &'static str = "wishlist";

    fn id(item: &Product) -> &ProductId {
        &item.id
    }

    fn is_valid(item: &Product) -> bool {
        item.is_valid()
    }

    fn accepts(product: &Product) -> bool {
        product.is_valid()
    }

    fn insert(items: &mut Vec<Product>, product: Product) {
        if !items.iter().any(|existing| existing.id == product.id) {
            items.push(product);
        }
    }
}

/// Saved-for-later products of the current shopper.
#[derive(Debug)]
pub struct Wishlist<S> {
    store: CollectionStore<WishlistKind, S>,
}

impl<S: StorageAdapter> Wishlist<S> {
    /// Wishlist persisted under `wishlist-<scope>`.
    pub fn new(storage: S) -> Self {
        Self {
            store: CollectionStore::new(storage),
        }
    }

    /// Wishlist persisted under `<namespace>-<scope>`.
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
    pub fn items(&self) -> &[Product] {
        self.store.items()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_member(&self, id: &ProductId) -> bool {
        self.store.contains(id)
    }

    /// Save `product`; already-saved products are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotHydrated` while identity is loading and
    /// `StoreError::InvalidItem` for a product that would not survive a
    /// reload.
    pub fn add(&mut self, product: Product) -> Result<()> {
        self.store.insert(product)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotHydrated` while identity is loading.
    pub fn remove(&mut self, id: &ProductId) -> Result<()> {
        self.store.remove(id)
    }

    /// Add `product` if absent, remove it if present. Returns whether it is
    /// saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotHydrated` while identity is loading.
    pub fn toggle(&mut self, product: Product) -> Result<bool> {
        if self.is_member(&product.id) {
            self.remove(&product.id)?;
            Ok(false)
        } else {
            self.add(product)?;
            Ok(true)
        }
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotHydrated` while identity is loading.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&[Product]) + 'static) -> SubscriptionId {
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
    pub const fn store(&self) -> &CollectionStore<WishlistKind, S> {
        &self.store
    }
}
