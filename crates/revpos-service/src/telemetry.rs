//! # Telemetry
//!
//! Tracing subscriber initialization for whatever hosts the service.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages
//! - `RUST_LOG=revpos=trace` - Show trace for revpos crates only
//! - Default: INFO overall, DEBUG for revpos crates, WARN for sqlx

use tracing_subscriber::EnvFilter;

/// Initializes structured logging.
///
/// ## Usage
/// Call once at startup. Calling again is a no-op (the embedding host and a
/// test harness may both try), so `try_init` failures are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,revpos=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
