#![cfg(test)]

//! Unified test logging initialization.
//!
//! One-time, race-safe tracing setup for unit tests. The level is read from
//! `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: Once = Once::new();

/// Initialize structured logging for tests. Safe to call multiple times.
pub fn init() {
    INITIALIZED.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
