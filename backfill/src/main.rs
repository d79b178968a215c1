//! Backfill binary entry point

use std::time::Duration;

use clap::Parser;

use backfill::services::{RealConfigSource, RealImageProvider, RealRecordStore};
use backfill::Backfill;
use shared::logging::{init_tracing, log_error, log_startup, log_success};
use shared::{RunId, RunMode, RunSummary};

#[derive(Parser)]
#[command(name = "backfill")]
#[command(about = "Generates catalog images and persists them to the record store")]
struct Args {
    /// Run mode: "incremental" fills only missing images, "full" regenerates all
    #[arg(long, default_value = "incremental")]
    mode: String,

    /// Delay between provider calls, in seconds
    #[arg(long, default_value_t = 2)]
    pacing_secs: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing();

    let run_id = RunId::new();
    log_startup(&format!("catalog image backfill (run {run_id})"));

    // Failures are narrated, never re-thrown: the process exits 0 on all paths
    match execute(args).await {
        Ok(summary) => {
            log_success(&format!(
                "Backfill finished: {} generated, {} skipped, {} failed",
                summary.generated_count(),
                summary.skipped_count(),
                summary.failed_count()
            ));
        }
        Err(e) => log_error("Backfill run", &e),
    }
}

async fn execute(args: Args) -> anyhow::Result<RunSummary> {
    let mode = RunMode::from_string(&args.mode)?;

    // Create service implementations
    let config_source = RealConfigSource::new();
    let store = RealRecordStore::new();
    let provider = RealImageProvider::new();

    // Create runner with dependency injection
    let backfill = Backfill::new(config_source, store, provider, mode)
        .with_pacing(Duration::from_secs(args.pacing_secs));

    Ok(backfill.run().await?)
}
