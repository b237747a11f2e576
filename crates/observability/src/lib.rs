//! Shared observability setup (tracing + structured logs).
//!
//! The mutation pipeline logs through `tracing`; binaries and integration
//! tests call [`init`] once at startup and get JSON logs on stderr.

/// Initialize process-wide observability.
///
/// Safe to call multiple times; subsequent calls become no-ops, so every
/// integration test can call it without coordination.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
