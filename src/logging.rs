//! Tracing setup for the binaries.
//!
//! Output always goes to stderr: the MCP server speaks JSON-RPC on stdout and the CLI
//! prints its results there.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info";

/// Filter from `RUST_LOG`, or `default` when it is unset or unparsable.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber. Calling it twice is harmless; the second call is
/// ignored.
pub fn init(default: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
