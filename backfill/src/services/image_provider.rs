//! Production image provider client for the OpenAI Images API
//!
//! Requests exactly one high-resolution image per call at a fixed
//! quality/style/size configuration and returns the hosted image URL.
//! Provider errors are propagated unchanged to the caller; retries are
//! the caller's concern.

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::BackfillResult;
use crate::traits::ImageProvider;
use shared::ProviderFailure;

const OPENAI_API_BASE: &str = "https://api.openai.com";

/// Fixed generation parameters: one vivid high-detail 1024x1024 image
const IMAGE_MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";
const IMAGE_QUALITY: &str = "hd";
const IMAGE_STYLE: &str = "vivid";

/// Real image provider client backed by the OpenAI Images API
pub struct RealImageProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: RwLock<Option<String>>,
}

impl RealImageProvider {
    pub fn new() -> Self {
        Self::with_base_url(OPENAI_API_BASE)
    }

    /// Create a provider client against a custom API base (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: RwLock::new(None),
        }
    }

    async fn api_key(&self) -> Result<String, ProviderFailure> {
        self.api_key
            .read()
            .await
            .clone()
            .ok_or(ProviderFailure::AuthenticationFailed)
    }

    fn classify_status(status: StatusCode, body: &str) -> ProviderFailure {
        match status.as_u16() {
            401 => ProviderFailure::AuthenticationFailed,
            429 if body.contains("insufficient_quota") => ProviderFailure::QuotaExceeded,
            429 => ProviderFailure::RateLimitExceeded,
            400 if body.contains("content_policy_violation") => {
                ProviderFailure::ContentPolicyViolation
            }
            400 => ProviderFailure::InvalidRequest(truncate_body(body)),
            503 => ProviderFailure::ServiceUnavailable,
            _ => ProviderFailure::ServerError(status.to_string()),
        }
    }
}

impl Default for RealImageProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Bound error bodies carried into diagnostics
fn truncate_body(body: &str) -> String {
    let mut end = body.len().min(500);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    if end < body.len() {
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[async_trait]
impl ImageProvider for RealImageProvider {
    async fn configure(&self, api_key: &str) -> BackfillResult<()> {
        let mut current = self.api_key.write().await;
        *current = Some(api_key.to_string());
        Ok(())
    }

    async fn test_reachable(&self) -> bool {
        let api_key = match self.api_key().await {
            Ok(api_key) => api_key,
            Err(_) => return false,
        };

        let url = format!("{}/v1/models", self.base_url);
        let result = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(
                    "Image provider returned HTTP {} during reachability check",
                    response.status()
                );
                false
            }
            Err(e) => {
                warn!("Image provider unreachable: {e}");
                false
            }
        }
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, ProviderFailure> {
        let api_key = self.api_key().await?;

        let request_body = serde_json::json!({
            "model": IMAGE_MODEL,
            "prompt": prompt,
            "n": 1,
            "size": IMAGE_SIZE,
            "quality": IMAGE_QUALITY,
            "style": IMAGE_STYLE,
        });

        let url = format!("{}/v1/images/generations", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ProviderFailure::NetworkError(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderFailure::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::classify_status(status, &response_text));
        }

        let response_json: serde_json::Value = serde_json::from_str(&response_text)
            .map_err(|e| ProviderFailure::InvalidRequest(format!("Failed to parse response: {e}")))?;

        let image_url = response_json
            .get("data")
            .and_then(|data| data.get(0))
            .and_then(|item| item.get("url"))
            .and_then(|url| url.as_str())
            .ok_or_else(|| {
                ProviderFailure::InvalidRequest(format!(
                    "No image URL in response. Body: {}",
                    truncate_body(&response_text)
                ))
            })?;

        Ok(image_url.to_string())
    }
}
