//! Logging initialization for deep-plan.
//!
//! Logs always go to stderr; stdout is reserved for the JSON report.

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `--verbose` nor `RUST_LOG` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the filter directive: `--verbose` forces debug, then `RUST_LOG`,
/// then the default.
pub fn filter_directive(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Initialize the stderr subscriber.
///
/// # Arguments
/// * `verbose` - Log at debug level regardless of `RUST_LOG`
pub fn init_logging(verbose: bool) -> Result<()> {
    let directive = filter_directive(verbose, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow!("Invalid log filter '{directive}': {e}"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
