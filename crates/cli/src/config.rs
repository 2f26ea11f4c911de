//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BASKET_STORAGE_PATH` - Storage file (default: `.basket/storage.json`)
//! - `BASKET_STORAGE_QUOTA` - Storage quota in bytes (default: 5242880)
//! - `BASKET_WISHLIST_NAMESPACE` - Wishlist key namespace (default: `wishlist`)
//! - `BASKET_CART_NAMESPACE` - Cart key namespace (default: `cart`)
//! - `BASKET_USER` - Signed-in user id; unset means guest

use std::path::PathBuf;

use basket_core::UserId;
use basket_core::storage::DEFAULT_QUOTA_BYTES;
use thiserror::Error;

const DEFAULT_STORAGE_PATH: &str = ".basket/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Basket CLI configuration.
#[derive(Debug, Clone)]
pub struct BasketConfig {
    /// File backing the key-value store
    pub storage_path: PathBuf,
    /// Maximum bytes of keys and values the store may hold
    pub storage_quota: usize,
    /// Namespace for wishlist keys
    pub wishlist_namespace: String,
    /// Namespace for cart keys
    pub cart_namespace: String,
    /// Signed-in user, `None` for a guest
    pub user: Option<UserId>,
}

impl BasketConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_path = lookup("BASKET_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        let storage_quota = match lookup("BASKET_STORAGE_QUOTA") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar("BASKET_STORAGE_QUOTA".to_string(), e.to_string())
            })?,
            None => DEFAULT_QUOTA_BYTES,
        };

        let wishlist_namespace = non_empty(lookup("BASKET_WISHLIST_NAMESPACE"))
            .unwrap_or_else(|| "wishlist".to_string());
        let cart_namespace =
            non_empty(lookup("BASKET_CART_NAMESPACE")).unwrap_or_else(|| "cart".to_string());
        let user = non_empty(lookup("BASKET_USER")).map(UserId::from);

        Ok(Self {
            storage_path,
            storage_quota,
            wishlist_namespace,
            cart_namespace,
            user,
        })
    }
}

/// Treat blank values the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<BasketConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        BasketConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(config.storage_quota, DEFAULT_QUOTA_BYTES);
        assert_eq!(config.wishlist_namespace, "wishlist");
        assert_eq!(config.cart_namespace, "cart");
        assert!(config.user.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BASKET_STORAGE_PATH", "/tmp/b.json"),
            ("BASKET_STORAGE_QUOTA", "1024"),
            ("BASKET_CART_NAMESPACE", "bag"),
            ("BASKET_USER", "u1"),
        ])
        .unwrap();
        assert_eq!(config.storage_path, PathBuf::from("/tmp/b.json"));
        assert_eq!(config.storage_quota, 1024);
        assert_eq!(config.cart_namespace, "bag");
        assert_eq!(config.user, Some(UserId::new("u1")));
    }

    #[test]
    fn test_blank_user_is_guest() {
        let config = load(&[("BASKET_USER", "  ")]).unwrap();
        assert!(config.user.is_none());
    }

    #[test]
    fn test_invalid_quota() {
        let err = load(&[("BASKET_STORAGE_QUOTA", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "BASKET_STORAGE_QUOTA"));
    }
}
