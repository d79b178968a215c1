//! Backfill trait definitions for dependency injection

use async_trait::async_trait;

use crate::error::BackfillResult;
use shared::{BackfillConfig, CatalogRecord, ProviderFailure};

/// Error when required configuration values are missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredKeyMissing {
    pub missing: Vec<String>,
    pub message: String,
}

/// Configuration source abstraction for dependency injection
#[mockall::automock]
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Load the full configuration, collecting every missing key
    async fn load(&self) -> Result<BackfillConfig, RequiredKeyMissing>;
}

/// Record store trait with read and conditional update operations
#[mockall::automock]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Set endpoint and access key for subsequent requests
    async fn configure(&self, endpoint: &str, access_key: &str) -> BackfillResult<()>;

    /// Issue a minimal read to confirm connectivity
    async fn test_reachable(&self) -> bool;

    /// Fetch all records ordered by identifier ascending
    async fn fetch_all(&self) -> BackfillResult<Vec<CatalogRecord>>;

    /// Fetch records whose image reference is absent
    async fn fetch_missing_image(&self) -> BackfillResult<Vec<CatalogRecord>>;

    /// Fetch a single record by identifier
    async fn fetch_one(&self, id: i64) -> BackfillResult<CatalogRecord>;

    /// Write a new image reference unless one exists and overwrite was not requested
    async fn update_image(&self, id: i64, url: &str, force_overwrite: bool) -> BackfillResult<bool>;
}

/// Image provider trait exposing text-to-image generation
#[mockall::automock]
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Set the API key for subsequent requests
    async fn configure(&self, api_key: &str) -> BackfillResult<()>;

    /// Probe provider reachability with an authenticated metadata read
    async fn test_reachable(&self) -> bool;

    /// Request exactly one high-resolution image for the prompt
    async fn generate_image(&self, prompt: &str) -> Result<String, ProviderFailure>;
}
