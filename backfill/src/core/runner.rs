//! Backfill run orchestration with dependency injection
//!
//! The runner sequences a single run: preflight configuration, a
//! connectivity check against both remote services, candidate selection,
//! the paced per-record generate-and-persist fold, and the completion
//! report. Per-record failures are isolated; preflight and connectivity
//! failures abort the run.

use std::time::Duration;

use tracing::{info, warn};

use crate::core::prompt::build_prompt;
use crate::error::{BackfillError, BackfillResult};
use crate::traits::{ConfigSource, ImageProvider, RecordStore};
use shared::logging::{log_progress, log_success};
use shared::{BackfillConfig, CatalogRecord, RecordOutcome, RunMode, RunSummary};

/// Default delay between provider calls
pub const DEFAULT_PACING: Duration = Duration::from_secs(2);

/// Backfill runner with dependency injection
pub struct Backfill<C, S, P>
where
    C: ConfigSource,
    S: RecordStore,
    P: ImageProvider,
{
    config_source: C,
    store: S,
    provider: P,
    mode: RunMode,
    pacing: Duration,
}

impl<C, S, P> Backfill<C, S, P>
where
    C: ConfigSource,
    S: RecordStore,
    P: ImageProvider,
{
    /// Create a new runner over the injected services
    pub fn new(config_source: C, store: S, provider: P, mode: RunMode) -> Self {
        Self {
            config_source,
            store,
            provider,
            mode,
            pacing: DEFAULT_PACING,
        }
    }

    /// Override the inter-record delay
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Execute one full backfill run
    pub async fn run(&self) -> BackfillResult<RunSummary> {
        let config = self.preflight().await?;
        self.store.configure(&config.store_url, &config.store_key).await?;
        self.provider.configure(&config.provider_key).await?;

        self.check_connectivity().await?;

        let candidates = self.select_candidates().await?;
        if candidates.is_empty() {
            log_success("No candidate records, nothing to do");
            return Ok(RunSummary::new());
        }
        log_progress(
            "Selection",
            &format!("{} candidate record(s) in {} mode", candidates.len(), self.mode),
        );

        let summary = self.process_candidates(&candidates).await;
        self.report(&summary).await;

        Ok(summary)
    }

    /// Load configuration before any network activity
    async fn preflight(&self) -> BackfillResult<BackfillConfig> {
        self.config_source
            .load()
            .await
            .map_err(|e| BackfillError::ConfigError { missing: e.missing })
    }

    /// Probe both remote services so the diagnostic names every failure
    async fn check_connectivity(&self) -> BackfillResult<()> {
        let mut unreachable = Vec::new();
        if !self.store.test_reachable().await {
            unreachable.push("record store");
        }
        if !self.provider.test_reachable().await {
            unreachable.push("image provider");
        }

        if unreachable.is_empty() {
            log_success("Connectivity checks passed");
            Ok(())
        } else {
            Err(BackfillError::ConnectivityError {
                services: unreachable.join(", "),
            })
        }
    }

    async fn select_candidates(&self) -> BackfillResult<Vec<CatalogRecord>> {
        match self.mode {
            RunMode::Incremental => self.store.fetch_missing_image().await,
            RunMode::Full => self.store.fetch_all().await,
        }
    }

    /// Fold over the candidates, producing one outcome per record.
    ///
    /// Failures are isolated: a bad record never aborts the batch.
    async fn process_candidates(&self, candidates: &[CatalogRecord]) -> RunSummary {
        let mut summary = RunSummary::new();
        let force_overwrite = self.mode.force_overwrite();

        for (index, record) in candidates.iter().enumerate() {
            let outcome = self.process_record(record, force_overwrite).await;
            summary.push(outcome);

            // Fixed delay between provider calls, none after the last record
            if index + 1 < candidates.len() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        summary
    }

    async fn process_record(&self, record: &CatalogRecord, force_overwrite: bool) -> RecordOutcome {
        log_progress(
            "Generating",
            &format!("record {} ({})", record.id, record.category),
        );

        let prompt = build_prompt(&record.category);
        let url = match self.provider.generate_image(&prompt).await {
            Ok(url) => url,
            Err(failure) => {
                let err = BackfillError::ProviderError { reason: failure };
                warn!(
                    "Image generation failed for record {} ({}): {}",
                    record.id, record.category, err
                );
                return RecordOutcome::Failed {
                    id: record.id,
                    reason: err.to_string(),
                };
            }
        };

        match self.store.update_image(record.id, &url, force_overwrite).await {
            Ok(true) => {
                info!("Stored image for record {} ({})", record.id, record.category);
                RecordOutcome::Generated { id: record.id, url }
            }
            Ok(false) => {
                info!(
                    "Record {} ({}) already has an image, skipped",
                    record.id, record.category
                );
                RecordOutcome::Skipped { id: record.id }
            }
            Err(e) => {
                warn!(
                    "Store update failed for record {} ({}): {}",
                    record.id, record.category, e
                );
                RecordOutcome::Failed {
                    id: record.id,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Narrate the outcome tallies and the final catalog state.
    ///
    /// Read-only; a failure here never fails the run.
    async fn report(&self, summary: &RunSummary) {
        log_success(&format!(
            "Run complete: {} generated, {} skipped, {} failed",
            summary.generated_count(),
            summary.skipped_count(),
            summary.failed_count()
        ));

        match self.store.fetch_all().await {
            Ok(records) => {
                for record in &records {
                    match record.image_url.as_deref() {
                        Some(url) if !url.is_empty() => {
                            info!("  record {} ({}): Generated {}", record.id, record.category, url);
                        }
                        _ => {
                            info!("  record {} ({}): Missing image", record.id, record.category);
                        }
                    }
                }
            }
            Err(e) => warn!("Could not fetch final catalog state: {e}"),
        }
    }
}
