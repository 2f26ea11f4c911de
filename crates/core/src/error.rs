//! Errors surfaced to facade callers.
//!
//! Storage failures never appear here; they are absorbed by
//! [`LocalStorage`](crate::storage::LocalStorage). A caller only sees a
//! mutation attempted before auth has resolved, or an entry that would not
//! survive a reload.

use thiserror::Error;

/// Why a collection operation was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Identity is still loading; the collection has not been hydrated yet.
    #[error("collection is not hydrated yet (identity still loading)")]
    NotHydrated,
    /// The entry fails the schema check applied on hydration (empty id,
    /// blank name or negative price).
    #[error("entry rejected: it needs an id, a name and a non-negative price")]
    InvalidItem,
}

/// Result type alias for [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
