//! Basket Core - identity-scoped wishlist and cart state.
//!
//! Storefront clients keep the shopper's wishlist and cart on the device.
//! This crate owns that state: it scopes persisted collections to the
//! signed-in user (or guest), moves pre-scoping data into the right key once,
//! and keeps memory and storage in sync as the shopper and the collections
//! change.
//!
//! # Architecture
//!
//! Everything runs on one logical thread. Identity changes are applied with a
//! single synchronous call, so a collection is always fully hydrated for the
//! new identity before any later mutation touches it. Storage is reached only
//! through the fail-soft [`storage::StorageAdapter`] capability; storage
//! problems are logged and never reach callers.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, products and cart lines
//! - [`identity`] - the current shopper and an observable auth cell
//! - [`keys`] - mapping identities to storage keys
//! - [`storage`] - fail-soft adapter plus memory and file backends
//! - [`migration`] - one-time move of legacy unscoped entries
//! - [`collection`] - the hydrate/mutate/persist state machine
//! - [`wishlist`], [`cart`] - facades exposed to UI code
//! - [`signal`] - explicit subscribe/unsubscribe change notification

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod collection;
pub mod error;
pub mod identity;
pub mod keys;
pub mod migration;
pub mod signal;
pub mod storage;
pub mod types;
pub mod wishlist;

pub use cart::Cart;
pub use collection::{CollectionStore, Flush, Phase, Transition};
pub use error::StoreError;
pub use identity::{AuthState, Identity, IdentityResolver};
pub use storage::{FileBackend, LocalStorage, MemoryBackend, StorageAdapter};
pub use types::*;
pub use wishlist::Wishlist;
