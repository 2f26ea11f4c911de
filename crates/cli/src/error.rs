//! CLI error type.

use basket_core::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
