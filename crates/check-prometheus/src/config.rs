//! Configuration loading and validation for check_prometheus
//!
//! Settings come from an optional YAML file and are overridden by command
//! line flags.

use crate::cli::{Cli, parse_header};
use promhealth::{BasicAuth, ClientConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid credentials: expected user:password")]
    InvalidCredentials,

    #[error("Invalid header {0:?}: expected 'Name: value'")]
    InvalidHeader(String),
}

impl From<ConfigError> for common::Error {
    fn from(err: ConfigError) -> Self {
        common::Error::config(err)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        self.connection.validate()
    }
}

/// Prometheus connection settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ConnectionSettings {
    #[validate(length(min = 1), custom = "validate_hostname")]
    pub hostname: String,

    #[validate(range(min = 1))]
    pub port: u16,

    pub path_prefix: String,

    pub secure: bool,

    pub insecure: bool,

    /// `user:password`
    pub user: Option<String>,

    pub bearer: Option<String>,

    pub ca_file: Option<PathBuf>,

    pub cert_file: Option<PathBuf>,

    pub key_file: Option<PathBuf>,

    pub headers: BTreeMap<String, String>,

    #[serde(with = "humantime_serde")]
    #[validate(custom = "validate_timeout")]
    pub timeout: Duration,
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            hostname: client.hostname,
            port: client.port,
            path_prefix: client.path_prefix,
            secure: client.secure,
            insecure: client.insecure,
            user: None,
            bearer: None,
            ca_file: None,
            cert_file: None,
            key_file: None,
            headers: BTreeMap::new(),
            timeout: client.timeout,
        }
    }
}

// Custom validators

fn validate_hostname(hostname: &str) -> Result<(), ValidationError> {
    if hostname.trim().is_empty() || hostname.contains(char::is_whitespace) {
        return Err(ValidationError::new("hostname_invalid"));
    }
    if hostname.contains("://") || hostname.contains('/') {
        return Err(ValidationError::new("hostname_contains_url"));
    }
    Ok(())
}

fn validate_timeout(timeout: &Duration) -> Result<(), ValidationError> {
    let millis = timeout.as_millis();
    if millis < 1 || millis > 300_000 {
        return Err(ValidationError::new("timeout_out_of_range"));
    }
    Ok(())
}

impl ConnectionSettings {
    /// Override settings with the flags given on the command line
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(hostname) = &cli.hostname {
            self.hostname = hostname.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(prefix) = &cli.path_prefix {
            self.path_prefix = prefix.clone();
        }
        self.secure |= cli.secure;
        self.insecure |= cli.insecure;
        if let Some(user) = &cli.user {
            self.user = Some(user.clone());
        }
        if let Some(bearer) = &cli.bearer {
            self.bearer = Some(bearer.clone());
        }
        if let Some(path) = &cli.ca_file {
            self.ca_file = Some(path.clone());
        }
        if let Some(path) = &cli.cert_file {
            self.cert_file = Some(path.clone());
        }
        if let Some(path) = &cli.key_file {
            self.key_file = Some(path.clone());
        }
        for header in &cli.headers {
            let (name, value) =
                parse_header(header).ok_or_else(|| ConfigError::InvalidHeader(header.clone()))?;
            self.headers.insert(name, value);
        }
        if let Some(secs) = cli.timeout {
            self.timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Validate and convert into the client's connection settings
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        self.validate()?;

        let basic_auth = match &self.user {
            Some(user) => Some(BasicAuth::parse(user).ok_or(ConfigError::InvalidCredentials)?),
            None => None,
        };

        Ok(ClientConfig {
            hostname: self.hostname.clone(),
            port: self.port,
            path_prefix: self.path_prefix.clone(),
            secure: self.secure,
            insecure: self.insecure,
            basic_auth,
            bearer: self.bearer.clone(),
            ca_file: self.ca_file.clone(),
            cert_file: self.cert_file.clone(),
            key_file: self.key_file.clone(),
            headers: self
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            timeout: self.timeout,
        })
    }
}

// Configuration loading implementation

impl Config {
    /// Load configuration from `path`, or from the default search paths
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.is_file() => Err(ConfigError::FileNotFound(path.to_path_buf())),
            Some(path) => Self::load_from_file(path),
            None => match Self::find_config_file() {
                Some(path) => {
                    tracing::debug!("Loading configuration from: {}", path.display());
                    Self::load_from_file(&path)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/check_prometheus/config.yaml")];

        if let Some(home_path) = Self::home_config_path() {
            paths.push(home_path);
        }

        paths.push(PathBuf::from("./check_prometheus.yaml"));

        paths.into_iter().find(|p: &PathBuf| p.is_file())
    }

    /// Get home directory config path
    fn home_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/check_prometheus/config.yaml"))
    }

    /// Merge command line flags and produce the client configuration
    pub fn client_config(&self, cli: &Cli) -> Result<ClientConfig, ConfigError> {
        let mut connection = self.connection.clone();
        connection.apply_cli(cli)?;
        connection.to_client_config()
    }
}
