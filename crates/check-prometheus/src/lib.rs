//! check_prometheus - monitoring plugin for Prometheus servers
//!
//! Queries the health or readiness endpoint of a Prometheus server and
//! reports the result in the Nagios/Icinga plugin format.
//!
//! # Components
//!
//! - **cli**: command line flags and the `health` subcommand
//! - **config**: optional YAML configuration, merged with the flags
//! - **command**: probe, translate and render the plugin output
//!
//! Only `main` terminates the process, through [`promhealth::PluginExit`].

pub mod cli;
pub mod command;
pub mod config;

pub use cli::{Cli, Commands, HealthArgs};
pub use command::{HealthOptions, execute, run_health};
pub use config::{Config, ConfigError, LoggingSettings};

/// Install the stderr tracing subscriber for the configured level and format
pub fn init_logging(settings: &LoggingSettings, verbose: bool) {
    let level = if verbose {
        Some("debug")
    } else {
        settings.level.as_deref()
    };

    match settings.format.as_deref() {
        Some("json") => common::logging::init_json(level),
        _ => common::logging::init(level),
    }
}
