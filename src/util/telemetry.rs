//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "lotkeeper=info";

/// Initialize tracing. Users can install their own subscriber; this helper
/// installs an env-filtered fmt subscriber if none is set, falling back to
/// `default_filter` when `RUST_LOG` is absent or unparsable.
pub fn init_tracing(default_filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
