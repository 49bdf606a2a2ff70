//! Tracing infrastructure.
//!
//! Structured, async-aware logging built on `tracing` and
//! `tracing-subscriber`. The configured level acts as the default filter;
//! `RUST_LOG` overrides it when set, so a deployed recorder can be turned
//! verbose without touching its configuration file.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{RecError, RecResult};

/// Initialize the global tracing subscriber.
///
/// `default_level` is one of `trace`, `debug`, `info`, `warn`, `error`.
/// Returns an error if the level does not parse or a subscriber is already
/// installed.
pub fn init(default_level: &str) -> RecResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| RecError::Configuration(format!("invalid log filter: {e}")))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .map_err(|e| RecError::Configuration(format!("failed to install subscriber: {e}")))?;

    Ok(())
}
