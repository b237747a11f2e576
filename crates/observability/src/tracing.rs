//! Tracing/logging initialization.
//!
//! Enough for structured logs out of the mutation pipeline; layering,
//! correlation IDs, and exporters can grow here later.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// The mutation crate logs at `debug` by default, everything else at `info`;
/// `RUST_LOG` overrides both. Safe to call multiple times (subsequent calls
/// are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shopforge_mutations=debug,info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
