//! Probe and plugin status types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Which Prometheus endpoint a probe queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// `/-/healthy`, always 200 while the process is up
    Health,
    /// `/-/ready`, 200 once the server can answer queries
    Ready,
}

impl ProbeKind {
    /// Request path relative to the server's base URL
    pub fn path(&self) -> &'static str {
        match self {
            ProbeKind::Health => "-/healthy",
            ProbeKind::Ready => "-/ready",
        }
    }

    /// Phrase Prometheus puts in a successful response body
    pub fn expected_phrase(&self) -> &'static str {
        match self {
            ProbeKind::Health => "Prometheus Server is Healthy.",
            ProbeKind::Ready => "Prometheus Server is Ready.",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Health => write!(f, "health"),
            ProbeKind::Ready => write!(f, "ready"),
        }
    }
}

/// HTTP response of a health or ready probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// HTTP status code
    pub status_code: u16,

    /// Response body, untouched
    pub body: String,
}

impl ProbeResult {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}

/// Monitoring plugin exit level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExitLevel {
    Ok,
    /// Reserved: no probe outcome maps here
    Warning,
    Critical,
    Unknown,
}

impl ExitLevel {
    /// Process exit code
    pub fn code(&self) -> i32 {
        match self {
            ExitLevel::Ok => 0,
            ExitLevel::Warning => 1,
            ExitLevel::Critical => 2,
            ExitLevel::Unknown => 3,
        }
    }
}

impl fmt::Display for ExitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitLevel::Ok => write!(f, "OK"),
            ExitLevel::Warning => write!(f, "WARNING"),
            ExitLevel::Critical => write!(f, "CRITICAL"),
            ExitLevel::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Result of translating a probe into plugin semantics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedStatus {
    pub level: ExitLevel,

    /// First line(s) of plugin output, `<LEVEL> - <message>`
    pub output: String,
}

impl TranslatedStatus {
    pub fn new(level: ExitLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            output: format!("{} - {}", level, message.as_ref()),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.level.code()
    }
}

/// Build information reported by `/api/v1/status/buildinfo`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildInfo {
    pub version: String,
    pub revision: String,
    pub branch: String,
    pub build_user: String,
    pub build_date: String,
    pub go_version: String,
}

/// Connection settings for the Prometheus HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Hostname or IP of the Prometheus server
    pub hostname: String,

    /// TCP port
    pub port: u16,

    /// Path prefix in front of the API, e.g. `/prometheus`
    pub path_prefix: String,

    /// Use HTTPS
    pub secure: bool,

    /// Skip TLS certificate verification
    pub insecure: bool,

    /// Basic auth credentials
    pub basic_auth: Option<BasicAuth>,

    /// Bearer token, used when no basic auth is set
    pub bearer: Option<String>,

    /// PEM bundle of additional trusted CAs
    pub ca_file: Option<PathBuf>,

    /// PEM client certificate
    pub cert_file: Option<PathBuf>,

    /// PEM private key for `cert_file`
    pub key_file: Option<PathBuf>,

    /// Extra headers sent with every request
    pub headers: Vec<(String, String)>,

    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: 9090,
            path_prefix: "/".to_string(),
            secure: false,
            insecure: false,
            basic_auth: None,
            bearer: None,
            ca_file: None,
            cert_file: None,
            key_file: None,
            headers: Vec::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Base URL all endpoint paths are joined onto, always ending in `/`
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        let prefix = self.path_prefix.trim_matches('/');

        if prefix.is_empty() {
            format!("{}://{}:{}/", scheme, self.hostname, self.port)
        } else {
            format!("{}://{}:{}/{}/", scheme, self.hostname, self.port, prefix)
        }
    }
}

/// Basic auth credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    /// Parse `user:password`; the password may itself contain `:`
    pub fn parse(s: &str) -> Option<Self> {
        let (username, password) = s.split_once(':')?;
        if username.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
