//! Core shared types for the catalog image backfill

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::SharedError;

/// Unique identifier for a single backfill run
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entity with a category label and an optional image reference
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: i64,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogRecord {
    /// Whether a non-empty image reference is present
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Process-wide configuration, read-only after load
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackfillConfig {
    pub store_url: String,
    pub store_key: String,
    pub provider_key: String,
}

/// Candidate selection policy for a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Only records without an image reference; existing images are kept
    Incremental,
    /// All records; existing images are overwritten
    Full,
}

impl RunMode {
    pub fn from_string(s: &str) -> Result<Self, SharedError> {
        match s.to_ascii_lowercase().as_str() {
            "incremental" => Ok(RunMode::Incremental),
            "full" => Ok(RunMode::Full),
            _ => Err(SharedError::InvalidRunMode { input: s.to_string() }),
        }
    }

    /// Whether existing image references may be overwritten in this mode
    pub fn force_overwrite(&self) -> bool {
        matches!(self, RunMode::Full)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Incremental => write!(f, "incremental"),
            RunMode::Full => write!(f, "full"),
        }
    }
}

/// Typed result of processing one candidate record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordOutcome {
    /// A new image was generated and persisted
    Generated { id: i64, url: String },
    /// The record already had an image and overwrite was not requested
    Skipped { id: i64 },
    /// Generation or persistence failed; the batch continued past it
    Failed { id: i64, reason: String },
}

impl RecordOutcome {
    pub fn id(&self) -> i64 {
        match self {
            RecordOutcome::Generated { id, .. }
            | RecordOutcome::Skipped { id }
            | RecordOutcome::Failed { id, .. } => *id,
        }
    }
}

/// Ordered per-record outcomes of a run, with derived tallies
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcomes: Vec<RecordOutcome>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn generated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Generated { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Failed { .. }))
            .count()
    }
}

/// Failure reported by the image provider API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderFailure {
    /// Authentication failed (invalid API key)
    AuthenticationFailed,
    /// Rate limit exceeded
    RateLimitExceeded,
    /// Request quota exhausted
    QuotaExceeded,
    /// Invalid request format or parameters
    InvalidRequest(String),
    /// Prompt rejected by the provider's content policy
    ContentPolicyViolation,
    /// Network/connection error
    NetworkError(String),
    /// Server error from provider
    ServerError(String),
    /// Service temporarily unavailable
    ServiceUnavailable,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderFailure::AuthenticationFailed => write!(f, "authentication failed"),
            ProviderFailure::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ProviderFailure::QuotaExceeded => write!(f, "quota exceeded"),
            ProviderFailure::InvalidRequest(detail) => write!(f, "invalid request: {detail}"),
            ProviderFailure::ContentPolicyViolation => write!(f, "content policy violation"),
            ProviderFailure::NetworkError(detail) => write!(f, "network error: {detail}"),
            ProviderFailure::ServerError(detail) => write!(f, "server error: {detail}"),
            ProviderFailure::ServiceUnavailable => write!(f, "service unavailable"),
        }
    }
}
