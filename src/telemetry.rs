//! Telemetry initialization.
//!
//! Controlled by `GITLET_LOG` (same syntax as `RUST_LOG`): unset falls back
//! to the configured [`crate::config::LogConfig::level`] floor (`"warn"` by
//! default). Spans and events go to stderr so they never corrupt the stdout
//! output the CLI's printed results rely on.

use tracing_subscriber::EnvFilter;

/// Initialize the global `tracing` subscriber.
///
/// `default_level` is the filter used when `GITLET_LOG` is unset or
/// unparsable; pass the repository's configured [`crate::config::LogConfig`]
/// floor here.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env("GITLET_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_owned()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
