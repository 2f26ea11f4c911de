//! Identity-scoped collection state machine.
//!
//! A [`CollectionStore`] owns one ordered, id-unique list (a wishlist or a
//! cart) and the storage key it persists to.
//!
//! ```text
//!                 sync_identity(resolved)            flush()
//! Uninitialized ─────────────────────────▶ Hydrating ───────▶ Ready
//!                                             │  mutation        │
//!                                             └──────────────────┤
//!                   sync_identity(other identity)                │
//!                 Hydrating ◀────────────────────────────────────┘
//! ```
//!
//! - Hydration replaces the in-memory list wholesale from storage, after the
//!   one-time legacy migration, and leaves the store in `Hydrating`.
//! - `flush()` is the host's "persist whatever is on screen" hook. The first
//!   flush after a hydration is skipped: it would only write back what was
//!   just read, or worse, a view rendered before the hydration landed.
//! - Mutations always persist, including no-op ones, and move the store to
//!   `Ready`.

mod hydrate;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::identity::{Identity, IdentityResolver};
use crate::keys::{Namespace, StorageKey};
use crate::migration::{LegacyMigration, MigrationOutcome};
use crate::signal::{Listeners, SubscriptionId};
use crate::storage::StorageAdapter;
use crate::types::ProductId;

pub use hydrate::{Decoded, decode};

/// Per-collection rules: entry type, validation and insertion semantics.
pub trait CollectionKind {
    /// Entry as held in memory and persisted.
    type Item: Clone + Serialize + DeserializeOwned;
    /// What callers hand to [`CollectionStore::insert`].
    type Input;

    /// Default namespace (and legacy key) for this collection.
    const NAME: &'static str;

    fn id(item: &Self::Item) -> &ProductId;

    /// Minimal schema check for entries read back from storage.
    fn is_valid(item: &Self::Item) -> bool;

    /// Same check for new input; anything rejected here would be dropped on
    /// the next hydration.
    fn accepts(input: &Self::Input) -> bool;

    /// Apply an add. The list is unique by id before and must stay so after.
    fn insert(items: &mut Vec<Self::Item>, input: Self::Input);
}

/// Lifecycle of a store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Identity has never resolved; nothing has been read.
    #[default]
    Uninitialized,
    /// Just hydrated for `scope`; the next flush is skipped.
    Hydrating { scope: Identity, key: StorageKey },
    /// Hydrated for `scope`; every flush and mutation persists.
    Ready { scope: Identity, key: StorageKey },
}

impl Phase {
    /// Identity the store is currently hydrated for.
    #[must_use]
    pub const fn scope(&self) -> Option<&Identity> {
        match self {
            Self::Uninitialized => None,
            Self::Hydrating { scope, .. } | Self::Ready { scope, .. } => Some(scope),
        }
    }

    /// Key the store currently persists to.
    #[must_use]
    pub const fn key(&self) -> Option<&StorageKey> {
        match self {
            Self::Uninitialized => None,
            Self::Hydrating { key, .. } | Self::Ready { key, .. } => Some(key),
        }
    }
}

/// Result of feeding an identity to [`CollectionStore::sync_identity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Identity is still loading; nothing happened.
    Pending,
    /// Already hydrated for this identity.
    Unchanged,
    /// State replaced from storage.
    Hydrated {
        key: StorageKey,
        migration: MigrationOutcome,
        loaded: usize,
        dropped: usize,
        corrupt: bool,
    },
}

/// Result of [`CollectionStore::flush`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// Nothing to write: the store has not been hydrated.
    NotHydrated,
    /// The post-hydration flush was skipped.
    Skipped,
    /// State written to storage.
    Written,
    /// The write was attempted and the storage adapter rejected it.
    Failed,
}

/// In-memory collection bound to the storage key of the current identity.
pub struct CollectionStore<K: CollectionKind, S> {
    namespace: Namespace,
    storage: S,
    migration: LegacyMigration,
    phase: Phase,
    items: Vec<K::Item>,
    listeners: Listeners<[K::Item]>,
}

impl<K: CollectionKind, S: StorageAdapter> CollectionStore<K, S> {
    /// Store under the collection's default namespace.
    pub fn new(storage: S) -> Self {
        Self::with_namespace(Namespace::new(K::NAME), storage)
    }

    /// Store under a custom namespace.
    pub fn with_namespace(namespace: Namespace, storage: S) -> Self {
        Self {
            namespace,
            storage,
            migration: LegacyMigration::new(),
            phase: Phase::Uninitialized,
            items: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        !matches!(self.phase, Phase::Uninitialized)
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[K::Item] {
        &self.items
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entry with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&K::Item> {
        self.items.iter().find(|item| K::id(item) == id)
    }

    /// Whether an entry with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Be notified with the full list after every hydration and mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&[K::Item]) + 'static) -> SubscriptionId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Poll `resolver` and apply the result.
    pub fn refresh<R>(&mut self, resolver: &R) -> Transition
    where
        R: IdentityResolver + ?Sized,
    {
        self.sync_identity(&resolver.identity())
    }

    /// Rebind the store to `identity`.
    ///
    /// `Loading` is a no-op. A resolved identity different from the one the
    /// store is hydrated for runs the legacy migration (first time only),
    /// then replaces the in-memory list with what is stored under the new
    /// key. Both happen before this returns, so no mutation can land against
    /// the old scope once the new identity has been seen.
    #[tracing::instrument(skip(self), fields(namespace = %self.namespace))]
    pub fn sync_identity(&mut self, identity: &Identity) -> Transition {
        let Some(key) = self.namespace.key(identity) else {
            return Transition::Pending;
        };
        if self.phase.scope() == Some(identity) {
            return Transition::Unchanged;
        }

        let migration = self.migration.run(&self.storage, &self.namespace, &key);

        let (items, dropped, corrupt) = match self.storage.get(key.as_str()) {
            None => (Vec::new(), 0, false),
            Some(raw) => match decode::<K>(&raw) {
                Ok(Decoded { items, dropped }) => (items, dropped, false),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "discarding corrupt collection");
                    self.storage.remove(key.as_str());
                    (Vec::new(), 0, true)
                }
            },
        };

        let loaded = items.len();
        tracing::debug!(key = %key, loaded, dropped, "hydrated collection");

        self.items = items;
        self.phase = Phase::Hydrating {
            scope: identity.clone(),
            key: key.clone(),
        };
        self.listeners.emit(&self.items);

        Transition::Hydrated {
            key,
            migration,
            loaded,
            dropped,
            corrupt,
        }
    }

    /// Persist the current list, honouring the post-hydration skip.
    pub fn flush(&mut self) -> Flush {
        match &self.phase {
            Phase::Uninitialized => Flush::NotHydrated,
            Phase::Hydrating { scope, key } => {
                tracing::debug!(key = %key, "skipping first write after hydration");
                self.phase = Phase::Ready {
                    scope: scope.clone(),
                    key: key.clone(),
                };
                Flush::Skipped
            }
            Phase::Ready { key, .. } => {
                if self.write(key) {
                    Flush::Written
                } else {
                    Flush::Failed
                }
            }
        }
    }

    /// Add `input` following the collection's insertion rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotHydrated`] while identity is loading, and
    /// [`StoreError::InvalidItem`] if `input` fails the collection's schema
    /// check. Neither touches memory or storage.
    pub fn insert(&mut self, input: K::Input) -> Result<()> {
        if !self.is_hydrated() {
            return Err(StoreError::NotHydrated);
        }
        if !K::accepts(&input) {
            tracing::warn!(namespace = %self.namespace, "rejecting invalid {} entry", K::NAME);
            return Err(StoreError::InvalidItem);
        }
        self.mutate(|items| K::insert(items, input))
    }

    /// Remove the entry with `id`; absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotHydrated`] while identity is loading.
    pub fn remove(&mut self, id: &ProductId) -> Result<()> {
        self.mutate(|items| items.retain(|item| K::id(item) != id))
    }

    /// Empty the collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotHydrated`] while identity is loading.
    pub fn clear(&mut self) -> Result<()> {
        self.mutate(Vec::clear)
    }

    /// Apply `change` to the list, then persist and notify.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotHydrated`] while identity is loading.
    pub fn mutate(&mut self, change: impl FnOnce(&mut Vec<K::Item>)) -> Result<()> {
        let (scope, key) = match &self.phase {
            Phase::Uninitialized => return Err(StoreError::NotHydrated),
            Phase::Hydrating { scope, key } | Phase::Ready { scope, key } => {
                (scope.clone(), key.clone())
            }
        };

        change(&mut self.items);
        self.write(&key);
        self.phase = Phase::Ready { scope, key };
        self.listeners.emit(&self.items);
        Ok(())
    }

    fn write(&self, key: &StorageKey) -> bool {
        match serde_json::to_string(&self.items) {
            Ok(json) => self.storage.set(key.as_str(), &json),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to encode collection");
                false
            }
        }
    }
}

impl<K: CollectionKind, S> core::fmt::Debug for CollectionStore<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("namespace", &self.namespace)
            .field("phase", &self.phase)
            .field("len", &self.items.len())
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
