//! Prometheus health and readiness checks for Nagios/Icinga-style monitoring.
//!
//! This crate turns the answer of a Prometheus `/-/healthy` or `/-/ready`
//! probe into a monitoring plugin result:
//! - an exit level (0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN)
//! - an output line `<LEVEL> - <body>`, optionally followed by build info
//! - a perfdata trailer `|status=<code> output="<text>" statuscode=<http>`
//!
//! # Example
//!
//! ```no_run
//! use promhealth::{ClientConfig, PerfdataList, PluginExit, PrometheusApi, PrometheusClient, translate};
//!
//! # async fn example() -> common::Result<()> {
//! let client = PrometheusClient::new(&ClientConfig::default())?;
//!
//! let probe = client.health().await?;
//! let status_code = probe.status_code;
//! let status = translate(probe);
//! let perfdata = PerfdataList::for_status(&status, status_code);
//!
//! PluginExit::from_status(status, &perfdata).exit();
//! # }
//! ```

pub mod client;
pub mod exit;
pub mod info;
pub mod perfdata;
pub mod translate;
pub mod types;

pub use client::{PrometheusApi, PrometheusClient};
pub use exit::PluginExit;
pub use info::augment;
pub use perfdata::{Perfdata, PerfdataList, PerfdataValue};
pub use translate::{level_for_status, translate};
pub use types::{
    BasicAuth, BuildInfo, ClientConfig, ExitLevel, ProbeKind, ProbeResult, TranslatedStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_level_display() {
        assert_eq!(ExitLevel::Ok.to_string(), "OK");
        assert_eq!(ExitLevel::Warning.to_string(), "WARNING");
        assert_eq!(ExitLevel::Critical.to_string(), "CRITICAL");
        assert_eq!(ExitLevel::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_exit_level_codes() {
        assert_eq!(ExitLevel::Ok.code(), 0);
        assert_eq!(ExitLevel::Warning.code(), 1);
        assert_eq!(ExitLevel::Critical.code(), 2);
        assert_eq!(ExitLevel::Unknown.code(), 3);
    }

    #[test]
    fn test_probe_kind_paths() {
        assert_eq!(ProbeKind::Health.path(), "-/healthy");
        assert_eq!(ProbeKind::Ready.path(), "-/ready");
        assert_eq!(ProbeKind::Ready.expected_phrase(), "Prometheus Server is Ready.");
        assert_eq!(ProbeKind::Health.to_string(), "health");
    }

    #[test]
    fn test_basic_auth_parse() {
        let auth = BasicAuth::parse("username:pass:word").unwrap();
        assert_eq!(auth.username, "username");
        assert_eq!(auth.password, "pass:word");
        assert!(!format!("{:?}", auth).contains("pass:word"));

        assert!(BasicAuth::parse("no-colon").is_none());
        assert!(BasicAuth::parse(":secret").is_none());
    }

    #[test]
    fn test_base_url() {
        let mut config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:9090/");

        config.path_prefix = "prometheus".to_string();
        config.secure = true;
        assert_eq!(config.base_url(), "https://localhost:9090/prometheus/");
    }

    #[test]
    fn test_client_config_humantime_timeout() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"hostname":"prom","port":9091,"path_prefix":"/","secure":false,"insecure":false,
                "basic_auth":null,"bearer":null,"ca_file":null,"cert_file":null,"key_file":null,
                "headers":[],"timeout":"5s"}"#,
        )
        .unwrap();
        assert_eq!(config.timeout, std::time::Duration::from_secs(5));
        assert_eq!(config.port, 9091);
    }
}
