//! Diagnostics via `tracing`.
//!
//! The library only emits events: `debug` when an ETA cannot be estimated,
//! `warn` when a unit drops out of a snapshot, `info` for almanac batches.
//! Binaries and demos call [`init`] to see them.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are ignored.
///
/// # Example
/// ```bash
/// RUST_LOG=vedic_clock=debug cargo run --example calculation
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
