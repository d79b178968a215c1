//! Test fixtures and data for backfill tests
//!
//! This module provides consistent test data used across the test suites.

use chrono::{TimeZone, Utc};

use shared::{BackfillConfig, CatalogRecord};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Standard configuration values
    pub const STORE_URL: &'static str = "https://catalog.example.supabase.co";
    pub const STORE_KEY: &'static str = "test-store-key";
    pub const PROVIDER_KEY: &'static str = "test-provider-key";

    /// Fully-populated configuration
    pub fn config() -> BackfillConfig {
        BackfillConfig {
            store_url: Self::STORE_URL.to_string(),
            store_key: Self::STORE_KEY.to_string(),
            provider_key: Self::PROVIDER_KEY.to_string(),
        }
    }

    /// Build a catalog record with a fixed timestamp
    pub fn record(id: i64, category: &str, image_url: Option<&str>) -> CatalogRecord {
        CatalogRecord {
            id,
            category: category.to_string(),
            image_url: image_url.map(String::from),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    /// Mixed seed catalog: one record missing an image, one with
    pub fn seed_records() -> Vec<CatalogRecord> {
        vec![
            Self::record(1, "sedan", None),
            Self::record(2, "truck", Some("http://x/2.png")),
        ]
    }

    /// The incremental candidate set for the seed catalog
    pub fn missing_image_records() -> Vec<CatalogRecord> {
        vec![Self::record(1, "sedan", None)]
    }

    /// Deterministic generated-image URL for a record
    pub fn generated_url(id: i64) -> String {
        format!("https://images.example.com/{id}.png")
    }
}
