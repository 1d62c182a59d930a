//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Install the process-wide `tracing` subscriber.
///
/// Honours `RUST_LOG`; falls back to `kariyer=debug`. Returns quietly if a
/// subscriber is already installed.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "kariyer=debug".into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .try_init();
}
