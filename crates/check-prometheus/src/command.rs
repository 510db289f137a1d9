//! The `health` command: probe, translate, optionally add build info.

use crate::cli::{Cli, Commands, HealthArgs};
use crate::config::Config;
use common::Result;
use promhealth::{
    PerfdataList, PluginExit, ProbeKind, PrometheusApi, PrometheusClient, augment, translate,
};
use tracing::{debug, info};

/// What the `health` command should query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthOptions {
    pub kind: ProbeKind,
    pub info: bool,
}

impl From<&HealthArgs> for HealthOptions {
    fn from(args: &HealthArgs) -> Self {
        Self {
            kind: args.probe_kind(),
            info: args.info,
        }
    }
}

/// Run the health or ready check against `api`.
///
/// A probe that got any HTTP response yields a [`PluginExit`] with perfdata.
/// Transport errors and build-info failures are returned as errors and abort
/// the check; the probe result is not salvaged.
pub async fn run_health<A>(api: &A, opts: HealthOptions) -> Result<PluginExit>
where
    A: PrometheusApi + ?Sized,
{
    let probe = api.probe(opts.kind).await?;
    let status_code = probe.status_code;

    let mut status = translate(probe);

    if opts.info {
        let build_info = api.build_info().await?;
        debug!(version = %build_info.version, "Build info retrieved");
        status.output = augment(status.output, &build_info);
    }

    let perfdata = PerfdataList::for_status(&status, status_code);

    info!(
        kind = %opts.kind,
        status = status_code,
        level = %status.level,
        "Check completed"
    );

    Ok(PluginExit::from_status(status, &perfdata))
}

/// Resolve configuration, connect and dispatch the selected subcommand
pub async fn execute(cli: &Cli, config: &Config) -> Result<PluginExit> {
    let client_config = config.client_config(cli)?;
    let client = PrometheusClient::new(&client_config)?;

    match &cli.command {
        Commands::Health(args) => run_health(&client, args.into()).await,
    }
}
