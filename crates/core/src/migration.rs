//! One-time move of legacy unscoped entries into scoped keys.
//!
//! Before collections were scoped per identity they lived under the bare
//! namespace key (`wishlist`). On the first identity resolution the legacy
//! value is copied into the newly scoped key, unless that key already holds
//! data, and the legacy key is deleted either way.

use crate::keys::{Namespace, StorageKey};
use crate::storage::StorageAdapter;

/// What a migration attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Migration already ran for this store.
    AlreadyRan,
    /// No legacy entry existed.
    NothingToMigrate,
    /// Legacy value copied into the scoped key, legacy key removed.
    Copied,
    /// Scoped key already had data; legacy key removed without copying.
    Discarded,
}

/// Runs at most once per instance.
#[derive(Debug, Default)]
pub struct LegacyMigration {
    ran: bool,
}

impl LegacyMigration {
    #[must_use]
    pub const fn new() -> Self {
        Self { ran: false }
    }

    /// Whether [`LegacyMigration::run`] has been called.
    #[must_use]
    pub const fn has_run(&self) -> bool {
        self.ran
    }

    /// Migrate `namespace`'s legacy entry into `destination`.
    ///
    /// Must run before the destination key is read for hydration.
    pub fn run<S>(
        &mut self,
        storage: &S,
        namespace: &Namespace,
        destination: &StorageKey,
    ) -> MigrationOutcome
    where
        S: StorageAdapter + ?Sized,
    {
        if self.ran {
            return MigrationOutcome::AlreadyRan;
        }
        self.ran = true;

        let legacy = namespace.legacy_key();
        let Some(value) = storage.get(legacy.as_str()) else {
            return MigrationOutcome::NothingToMigrate;
        };

        let destination_empty = storage
            .get(destination.as_str())
            .is_none_or(|existing| existing.is_empty());

        let outcome = if destination_empty {
            storage.set(destination.as_str(), &value);
            MigrationOutcome::Copied
        } else {
            MigrationOutcome::Discarded
        };

        storage.remove(legacy.as_str());
        tracing::debug!(
            from = %legacy,
            to = %destination,
            ?outcome,
            "migrated legacy collection"
        );
        outcome
    }
}
