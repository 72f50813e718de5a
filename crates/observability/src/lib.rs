//! Tracing and logging setup shared by stockbatch binaries and tests.

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; returns `true` only for the call that
/// installed the subscriber.
pub fn init() -> bool {
    tracing::init()
}

/// Tracing configuration (filters, layers).
pub mod tracing;
