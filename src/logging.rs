//! Logging setup for the stackgen CLI.
//!
//! Logs go to stderr so stdout stays usable for `--list` and `--dry-run` output.

use crate::error::{Result, StackgenError};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maps `-q` / `-v` flags to a level: quiet is errors only, default is warnings,
/// each `-v` adds one level up to trace.
pub fn level_for(quiet: bool, verbose: u8) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides `level` when set.
///
/// # Errors
///
/// Returns `StackgenError::Logging` if the filter is invalid or a subscriber
/// is already installed.
pub fn init_logging(level: Level) -> Result<()> {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(filter) if !filter.is_empty() => EnvFilter::try_new(filter),
        _ => EnvFilter::try_new(level.as_str().to_lowercase()),
    }
    .map_err(|e| StackgenError::Logging(format!("invalid log filter: {e}")))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::env::var_os("NO_COLOR").is_none());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| StackgenError::Logging(e.to_string()))
}
