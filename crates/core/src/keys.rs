//! Identity-scoped storage keys.
//!
//! A collection named `wishlist` lives under `wishlist-guest` for guests and
//! `wishlist-<user id>` for signed-in users. The bare namespace is the legacy,
//! pre-scoping key.

use core::fmt;

use crate::identity::Identity;

/// Scope suffix used for guests.
pub const GUEST_SCOPE: &str = "guest";

/// A fully built storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Key prefix owned by one collection (e.g. `wishlist`, `cart`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self(namespace.into())
    }

    /// Returns the namespace as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The unscoped key written before collections were per-identity.
    #[must_use]
    pub fn legacy_key(&self) -> StorageKey {
        StorageKey(self.0.clone())
    }

    /// Build the key for `identity`.
    ///
    /// Returns `None` for [`Identity::Loading`]: callers must wait for auth
    /// to resolve before touching storage.
    #[must_use]
    pub fn key(&self, identity: &Identity) -> Option<StorageKey> {
        let scope = match identity {
            Identity::Loading => return None,
            Identity::Guest => GUEST_SCOPE,
            Identity::User(id) => id.as_str(),
        };
        Some(StorageKey(format!("{}-{scope}", self.0)))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(namespace: &str) -> Self {
        Self::new(namespace)
    }
}

impl From<String> for Namespace {
    fn from(namespace: String) -> Self {
        Self(namespace)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_key() {
        let ns = Namespace::new("wishlist");
        assert_eq!(ns.key(&Identity::Guest).unwrap().as_str(), "wishlist-guest");
    }

    #[test]
    fn test_user_key() {
        let ns = Namespace::new("cart");
        assert_eq!(ns.key(&Identity::user("u1")).unwrap().as_str(), "cart-u1");
    }

    #[test]
    fn test_loading_has_no_key() {
        assert!(Namespace::new("cart").key(&Identity::Loading).is_none());
    }

    #[test]
    fn test_legacy_key_is_bare_namespace() {
        assert_eq!(Namespace::new("wishlist").legacy_key().as_str(), "wishlist");
    }

    #[test]
    fn test_key_is_deterministic() {
        let ns = Namespace::new("wishlist");
        assert_eq!(ns.key(&Identity::user("a")), ns.key(&Identity::user("a")));
        assert_ne!(ns.key(&Identity::user("a")), ns.key(&Identity::user("b")));
    }
}
