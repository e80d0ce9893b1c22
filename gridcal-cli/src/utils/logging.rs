//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays clean for the calendar output. Level comes
/// from `RUST_LOG`, defaulting to warnings only.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
