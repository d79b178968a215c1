//! Production configuration loading implementation
//!
//! This module reads the required endpoints and secrets from the
//! environment. Every required value must be present and non-empty before
//! any network activity starts; all missing names are collected so a
//! single failed run reports the full set of problems.
//!
//! ## Configuration Sources
//! Values are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values.
//!
//! ## Required Keys
//! - `SUPABASE_URL`: record store endpoint
//! - `SUPABASE_SERVICE_ROLE_KEY`: record store access key
//! - `OPENAI_API_KEY`: image provider access key

use async_trait::async_trait;

use crate::traits::{ConfigSource, RequiredKeyMissing};
use shared::BackfillConfig;

/// Real configuration source using environment variables
pub struct RealConfigSource;

impl RealConfigSource {
    /// Record store endpoint variable
    pub const STORE_URL_KEY: &'static str = "SUPABASE_URL";

    /// Record store access key variable
    pub const STORE_KEY_KEY: &'static str = "SUPABASE_SERVICE_ROLE_KEY";

    /// Image provider access key variable
    pub const PROVIDER_KEY_KEY: &'static str = "OPENAI_API_KEY";

    pub fn new() -> Self {
        Self
    }

    /// Initialize environment by loading .env file if present
    ///
    /// Safe to call multiple times; already-set variables are never
    /// overwritten and a missing .env file is silently ignored.
    fn init_env() {
        let _ = dotenvy::dotenv();
    }

    /// Read one variable, treating empty and whitespace-only values as absent
    fn read_key(name: &str) -> Option<String> {
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Some(value),
            _ => None,
        }
    }
}

impl Default for RealConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigSource for RealConfigSource {
    async fn load(&self) -> Result<BackfillConfig, RequiredKeyMissing> {
        Self::init_env();

        let store_url = Self::read_key(Self::STORE_URL_KEY);
        let store_key = Self::read_key(Self::STORE_KEY_KEY);
        let provider_key = Self::read_key(Self::PROVIDER_KEY_KEY);

        // Collect every missing name before failing, for better diagnostics
        let mut missing = Vec::new();
        if store_url.is_none() {
            missing.push(Self::STORE_URL_KEY.to_string());
        }
        if store_key.is_none() {
            missing.push(Self::STORE_KEY_KEY.to_string());
        }
        if provider_key.is_none() {
            missing.push(Self::PROVIDER_KEY_KEY.to_string());
        }

        if !missing.is_empty() {
            return Err(RequiredKeyMissing {
                message: format!(
                    "Missing required configuration: {}. These values must be set as environment variables.",
                    missing.join(", ")
                ),
                missing,
            });
        }

        println!(
            "Configuration validated: {}, {}, {}",
            Self::STORE_URL_KEY,
            Self::STORE_KEY_KEY,
            Self::PROVIDER_KEY_KEY
        );

        Ok(BackfillConfig {
            store_url: store_url.unwrap_or_default(),
            store_key: store_key.unwrap_or_default(),
            provider_key: provider_key.unwrap_or_default(),
        })
    }
}
