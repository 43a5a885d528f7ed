//! Tracing setup for the server binary
//!
//! stdout carries the MCP stream, so log output always goes to stderr.

use anyhow::{Result, bail};
use std::io;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Parse a log level name
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => bail!(
            "Invalid log level '{}'. Valid options are: trace, debug, info, warn, error",
            other
        ),
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies.
pub fn init(default_level: &str) -> Result<()> {
    let level = parse_log_level(default_level)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()?;
    Ok(())
}
