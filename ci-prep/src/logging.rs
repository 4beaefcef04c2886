//! Diagnostic tracing for the generator.
//!
//! Tracing goes to stderr and is controlled by `RUST_LOG`. stdout carries
//! only the product messages (`Compiling for ...`, `Selecting tests ...`),
//! so CI logs stay identical regardless of the filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=ci_prep=debug ci-prep
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
