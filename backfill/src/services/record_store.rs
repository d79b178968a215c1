//! Production record store client
//!
//! Thin adapter over the store's PostgREST-style tabular interface:
//! filtered selects, an ordered select, and a conditional update by
//! identifier with the updated row echoed back. The endpoint and access
//! key are injected after construction so the client can be built before
//! configuration is loaded.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::error::{BackfillError, BackfillResult};
use crate::traits::RecordStore;
use shared::CatalogRecord;

/// Table holding the catalog records
const RECORDS_TABLE: &str = "vehicles";

/// Configured endpoint and credentials for the store
#[derive(Clone)]
struct StoreEndpoint {
    table_url: Url,
    access_key: String,
}

/// Real record store client speaking the store's REST protocol
pub struct RealRecordStore {
    client: reqwest::Client,
    endpoint: RwLock<Option<StoreEndpoint>>,
}

impl RealRecordStore {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: RwLock::new(None),
        }
    }

    async fn endpoint(&self) -> BackfillResult<StoreEndpoint> {
        self.endpoint
            .read()
            .await
            .clone()
            .ok_or_else(|| BackfillError::StoreError {
                message: "Record store client is not configured".to_string(),
            })
    }

    fn request(&self, method: Method, endpoint: &StoreEndpoint) -> reqwest::RequestBuilder {
        self.client
            .request(method, endpoint.table_url.clone())
            .header("apikey", &endpoint.access_key)
            .header("Authorization", format!("Bearer {}", endpoint.access_key))
    }

    /// Run a filtered select and deserialize the matching rows
    async fn fetch_with_query(&self, query: &[(&str, &str)]) -> BackfillResult<Vec<CatalogRecord>> {
        let endpoint = self.endpoint().await?;

        let response = self
            .request(Method::GET, &endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| BackfillError::StoreError { message: e.to_string() })?;

        if !response.status().is_success() {
            return Err(BackfillError::StoreError {
                message: format!("store returned HTTP {}", response.status()),
            });
        }

        response
            .json::<Vec<CatalogRecord>>()
            .await
            .map_err(|e| BackfillError::StoreError {
                message: format!("Failed to parse store response: {e}"),
            })
    }
}

impl Default for RealRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for RealRecordStore {
    async fn configure(&self, endpoint: &str, access_key: &str) -> BackfillResult<()> {
        let base = Url::parse(endpoint).map_err(|e| BackfillError::StoreError {
            message: format!("Invalid store endpoint {endpoint}: {e}"),
        })?;
        let table_url = base
            .join(&format!("rest/v1/{RECORDS_TABLE}"))
            .map_err(|e| BackfillError::StoreError {
                message: format!("Invalid store endpoint {endpoint}: {e}"),
            })?;

        let mut current = self.endpoint.write().await;
        *current = Some(StoreEndpoint {
            table_url,
            access_key: access_key.to_string(),
        });
        Ok(())
    }

    async fn test_reachable(&self) -> bool {
        let endpoint = match self.endpoint().await {
            Ok(endpoint) => endpoint,
            Err(_) => return false,
        };

        // Minimal read: one identifier, one row
        let result = self
            .request(Method::GET, &endpoint)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    "Record store returned HTTP {} during reachability check",
                    response.status()
                );
                false
            }
            Err(e) => {
                warn!("Record store unreachable: {e}");
                false
            }
        }
    }

    async fn fetch_all(&self) -> BackfillResult<Vec<CatalogRecord>> {
        self.fetch_with_query(&[("select", "*"), ("order", "id.asc")]).await
    }

    async fn fetch_missing_image(&self) -> BackfillResult<Vec<CatalogRecord>> {
        self.fetch_with_query(&[("select", "*"), ("image_url", "is.null")]).await
    }

    async fn fetch_one(&self, id: i64) -> BackfillResult<CatalogRecord> {
        let id_filter = format!("eq.{id}");
        let records = self
            .fetch_with_query(&[("select", "*"), ("id", id_filter.as_str())])
            .await?;

        records.into_iter().next().ok_or(BackfillError::NotFound { id })
    }

    async fn update_image(&self, id: i64, url: &str, force_overwrite: bool) -> BackfillResult<bool> {
        // Cooperative existence check; a sequential single-threaded caller
        // is assumed, so read-then-write is not guarded further.
        let current = self.fetch_one(id).await?;
        if current.has_image() && !force_overwrite {
            debug!("Record {id} already has an image, skipping update");
            return Ok(false);
        }

        let endpoint = self.endpoint().await?;
        let id_filter = format!("eq.{id}");
        let body = serde_json::json!({
            "image_url": url,
            "updated_at": Utc::now().to_rfc3339(),
        });

        let response = self
            .request(Method::PATCH, &endpoint)
            .query(&[("id", id_filter.as_str())])
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| BackfillError::StoreError { message: e.to_string() })?;

        if !response.status().is_success() {
            return Err(BackfillError::StoreError {
                message: format!("store update for record {id} returned HTTP {}", response.status()),
            });
        }

        // The updated rows are echoed back; an empty set means nothing matched
        let updated: Vec<CatalogRecord> =
            response.json().await.map_err(|e| BackfillError::StoreError {
                message: format!("Failed to parse store response: {e}"),
            })?;

        if updated.is_empty() {
            return Err(BackfillError::NotFound { id });
        }

        Ok(true)
    }
}
