//! Key-value persistence.
//!
//! Two layers:
//!
//! - [`StorageBackend`] - a raw, fallible store ([`MemoryBackend`],
//!   [`FileBackend`]). Every call hits the underlying store; nothing is cached.
//! - [`StorageAdapter`] - the fail-soft capability the collections consume.
//!   [`LocalStorage`] wraps any backend, logs failures and degrades them to
//!   "absent" / `false`, so a full disk or a disabled store never reaches the
//!   caller.
//!
//! Tests substitute a [`MemoryBackend`] for the real store.

mod file;
mod memory;

use std::rc::Rc;

use thiserror::Error;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Default per-store quota, matching what browsers give local storage.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Errors raised by raw storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store cannot be used in the current context.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the store's quota.
    #[error("quota exceeded writing {key}: need {needed} bytes, limit {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// Underlying file I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a valid key-value document.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Raw key-value store. Errors are returned, not swallowed.
pub trait StorageBackend {
    /// Read the value at `key`, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unavailable or over quota.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Fail-soft key-value capability consumed by collections.
///
/// Implementations never propagate errors: a failed read is `None`, a failed
/// write or delete is `false`.
pub trait StorageAdapter {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

impl<T: StorageAdapter + ?Sized> StorageAdapter for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}

impl<T: StorageAdapter + ?Sized> StorageAdapter for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}

/// Fail-soft adapter over a [`StorageBackend`].
#[derive(Debug, Default)]
pub struct LocalStorage<B> {
    backend: B,
}

impl<B: StorageBackend> LocalStorage<B> {
    /// Wrap `backend`.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the wrapped backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> StorageAdapter for LocalStorage<B> {
    fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, treating as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage write failed, ignoring");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage delete failed, ignoring");
                false
            }
        }
    }
}
