//! Process-wide tracing setup for binaries and integration harnesses.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Honors `RUST_LOG`, defaulting to
/// `info`. Repeated calls are no-ops, so tests can call it freely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
