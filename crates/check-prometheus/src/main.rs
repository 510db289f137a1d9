//! check_prometheus binary

use check_prometheus::{Cli, Config, execute, init_logging};
use clap::Parser;
use clap::error::ErrorKind;
use promhealth::PluginExit;

/// Parse arguments; usage errors become UNKNOWN instead of clap's exit code 2
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or("invalid arguments")
                .trim_start_matches("error: ");
            PluginExit::fatal(message).exit()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = parse_args();

    // Can't use tracing yet - the log level comes from the config file
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => PluginExit::fatal(common::Error::from(e)).exit(),
    };

    init_logging(&config.logging, cli.verbose);
    tracing::debug!(command = ?cli.command, "check_prometheus starting");

    match execute(&cli, &config).await {
        Ok(exit) => exit.exit(),
        Err(e) => {
            tracing::debug!(error = %e, "Check aborted");
            PluginExit::fatal(e).exit()
        }
    }
}
