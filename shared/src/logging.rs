//! Shared logging utilities for consistent run narration

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Initialize tracing subscriber with the default log level
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Initialize tracing subscriber with an explicit base log level
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let base_level = log_level.unwrap_or("info");
    let env_filter = format!("backfill={base_level},shared={base_level},reqwest=warn");

    fmt()
        .with_env_filter(EnvFilter::new(&env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(timestamp = %format_timestamp(), "🚀 Starting {}", details);
}

/// Contextual logging helper for error conditions
pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    error!(
        timestamp = %format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(message: &str) {
    info!(timestamp = %format_timestamp(), "✅ {}", message);
}

/// Contextual logging helper for progress updates
pub fn log_progress(action: &str, details: &str) {
    info!(timestamp = %format_timestamp(), "📋 {}: {}", action, details);
}
