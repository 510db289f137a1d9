//! Logging utilities for check_prometheus components.
//!
//! Monitoring plugins own standard output, so every subscriber set up here
//! writes to standard error. Plugin runners often fold stderr into the
//! plugin output, so an unconfigured run only logs errors and never emits
//! ANSI colours into a pipe.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default level when neither RUST_LOG nor a configured level is present.
pub const DEFAULT_LEVEL: &str = "error";

fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LEVEL)))
}

/// Initialize tracing with sensible defaults.
///
/// RUST_LOG takes precedence over `level`.
pub fn init(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(env_filter(level))
        .init();
}

/// Initialize tracing with JSON formatting (useful for structured logging).
pub fn init_json(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .with(env_filter(level))
        .init();
}
