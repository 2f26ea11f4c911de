//! In-memory backend, used as the injectable fake in tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::{StorageBackend, StorageError};

/// Map-backed store with an optional byte quota and an availability switch.
///
/// Quota accounting counts key and value bytes of every entry, like browser
/// local storage does.
#[derive(Debug)]
pub struct MemoryBackend {
    entries: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
    available: Cell<bool>,
}

impl MemoryBackend {
    /// An empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            quota: None,
            available: Cell::new(true),
        }
    }

    /// An empty store limited to `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Simulate the store being disabled (or re-enabled).
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Seed an entry directly, bypassing quota and availability.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Read an entry directly, bypassing availability.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Snapshot of all stored keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StorageError::Unavailable("memory store disabled".to_owned()))
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        let mut entries = self.entries.borrow_mut();

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    limit,
                });
            }
        }

        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
