//! Tracing subscriber setup

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Install a compact fmt subscriber writing to stderr.
///
/// Respects `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. Calling it again
/// after a subscriber is installed does nothing.
pub fn init_logging() {
    init_logging_with(DEFAULT_FILTER);
}

/// Same as [`init_logging`] with a caller-chosen fallback filter.
pub fn init_logging_with(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}
