//! Tracing setup for tests.
//!
//! Fixtures, mocks and timing helpers emit `tracing` events at `debug` and
//! `trace` level. Call [`init_test_tracing`] at the top of a test to see
//! them; output goes through the test harness so it is only shown for
//! failing tests.
//!
//! ```rust
//! testkit_support::logging::init_test_tracing();
//! testkit_support::logging::init_test_tracing(); // later calls are no-ops
//! ```

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a test-friendly fmt subscriber.
///
/// Honours `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. Does nothing if a
/// global subscriber is already installed.
pub fn init_test_tracing() {
    init_test_tracing_with(DEFAULT_FILTER);
}

/// Like [`init_test_tracing`] with a different fallback filter.
pub fn init_test_tracing_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_test_tracing();
        init_test_tracing_with("debug");
        tracing::debug!("still works after repeated init");
    }
}
