//! Logging configuration for sqleval.
//!
//! Logs go to stderr so the evaluation report on stdout stays clean
//! and pipeable.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging.
///
/// Respects `RUST_LOG`; defaults to `info`. Safe to call more than once
/// (later calls are no-ops), which keeps integration tests simple.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
