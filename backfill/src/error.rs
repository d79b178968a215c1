//! Backfill error types

use shared::ProviderFailure;
use thiserror::Error;

/// Result type for backfill operations
pub type BackfillResult<T> = Result<T, BackfillError>;

/// Backfill error types
#[derive(Error, Debug)]
pub enum BackfillError {
    #[error("Missing required configuration: {}", .missing.join(", "))]
    ConfigError { missing: Vec<String> },

    #[error("Connectivity check failed: {services} unreachable")]
    ConnectivityError { services: String },

    #[error("Record {id} not found in store")]
    NotFound { id: i64 },

    #[error("Store request failed: {message}")]
    StoreError { message: String },

    #[error("Provider request failed: {reason}")]
    ProviderError { reason: ProviderFailure },
}
