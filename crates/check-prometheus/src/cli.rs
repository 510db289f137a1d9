//! Command line definition

use clap::{Args, Parser, Subcommand};
use promhealth::ProbeKind;
use std::path::PathBuf;

/// Checks different aspects of a Prometheus server
#[derive(Debug, Parser)]
#[command(name = "check_prometheus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Hostname of the Prometheus server
    #[arg(short = 'H', long, global = true)]
    pub hostname: Option<String>,

    /// Port of the Prometheus server
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// URL path prefix of the Prometheus server
    #[arg(short = 'U', long = "url", global = true)]
    pub path_prefix: Option<String>,

    /// Use a HTTPS connection
    #[arg(short, long, global = true)]
    pub secure: bool,

    /// Skip the verification of the server's TLS certificate
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Bearer token for authentication
    #[arg(short, long, global = true, env = "CHECK_PROMETHEUS_BEARER", hide_env_values = true)]
    pub bearer: Option<String>,

    /// Basic auth credentials, as user:password
    #[arg(
        short,
        long,
        global = true,
        env = "CHECK_PROMETHEUS_BASICAUTH",
        hide_env_values = true
    )]
    pub user: Option<String>,

    /// Path to a PEM bundle of trusted CAs
    #[arg(long, global = true)]
    pub ca_file: Option<PathBuf>,

    /// Path to a PEM client certificate
    #[arg(long, global = true)]
    pub cert_file: Option<PathBuf>,

    /// Path to the PEM private key of --cert-file
    #[arg(long, global = true)]
    pub key_file: Option<PathBuf>,

    /// Additional request header, can be repeated
    #[arg(long = "header", value_name = "NAME: VALUE", global = true)]
    pub headers: Vec<String>,

    /// Timeout for requests, in seconds
    #[arg(short, long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Checks the health or readiness status of the Prometheus server
    ///
    /// Health: the endpoint always returns 200 while Prometheus is up.
    /// Ready: the endpoint returns 200 once Prometheus can serve queries.
    Health(HealthArgs),
}

#[derive(Debug, Clone, Args)]
pub struct HealthArgs {
    /// Checks the readiness of an endpoint
    #[arg(short, long)]
    pub ready: bool,

    /// Displays various build information properties about the Prometheus server
    #[arg(short, long)]
    pub info: bool,
}

impl HealthArgs {
    pub fn probe_kind(&self) -> ProbeKind {
        if self.ready {
            ProbeKind::Ready
        } else {
            ProbeKind::Health
        }
    }
}

/// Split a `Name: value` header argument
pub fn parse_header(s: &str) -> Option<(String, String)> {
    let (name, value) = s.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
