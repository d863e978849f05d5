//! Tracing subscriber setup

use crate::config::LoggingConfig;
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter directive for our own crate; dependencies stay at `warn`
fn filter_directive(level: &str) -> String {
    format!("warn,weather_checker={level}")
}

/// Install the global subscriber, writing to stderr.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` wins over the
/// configured level.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new(filter_directive("debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
