//! Prometheus HTTP client for the health, ready and buildinfo endpoints.

use crate::types::{BasicAuth, BuildInfo, ClientConfig, ProbeKind, ProbeResult};
use async_trait::async_trait;
use common::{Error, Result, error_chain};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Certificate, Identity, Url};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

const BUILDINFO_PATH: &str = "api/v1/status/buildinfo";

/// Queries a Prometheus server
#[async_trait]
pub trait PrometheusApi: Send + Sync {
    /// Query the health or ready endpoint.
    ///
    /// Any HTTP response is a [`ProbeResult`], whatever its status code. Only
    /// a request that never got a response fails, with [`Error::Transport`].
    async fn probe(&self, kind: ProbeKind) -> Result<ProbeResult>;

    /// Fetch the server's build information.
    async fn build_info(&self) -> Result<BuildInfo>;

    async fn health(&self) -> Result<ProbeResult> {
        self.probe(ProbeKind::Health).await
    }

    async fn ready(&self) -> Result<ProbeResult> {
        self.probe(ProbeKind::Ready).await
    }
}

/// Response envelope of the Prometheus HTTP API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse<T> {
    status: String,
    data: Option<T>,
    error_type: Option<String>,
    error: Option<String>,
}

/// reqwest-backed [`PrometheusApi`]
pub struct PrometheusClient {
    base_url: Url,
    basic_auth: Option<BasicAuth>,
    bearer: Option<String>,
    client: reqwest::Client,
}

impl PrometheusClient {
    /// Build a client for the server described by `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url())
            .map_err(|e| Error::config(format!("invalid server URL {}: {}", config.base_url(), e)))?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("check_prometheus/", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers(&config.headers)?);

        if config.insecure {
            warn!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_file) = &config.ca_file {
            for cert in load_ca_bundle(ca_file)? {
                builder = builder.add_root_certificate(cert);
            }
        }

        match (&config.cert_file, &config.key_file) {
            (Some(cert_file), Some(key_file)) => {
                builder = builder.identity(load_identity(cert_file, key_file)?);
            }
            (Some(_), None) => return Err(Error::config("--cert-file requires --key-file")),
            (None, Some(_)) => return Err(Error::config("--key-file requires --cert-file")),
            (None, None) => {}
        }

        let client = builder.build().map_err(Error::transport)?;
        debug!(url = %base_url, "Prometheus client created");

        Ok(Self {
            base_url,
            basic_auth: config.basic_auth.clone(),
            bearer: config.bearer.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("invalid endpoint path {}: {}", path, e)))
    }

    async fn get(&self, url: Url) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let mut request = self.client.get(url);

        if let Some(auth) = &self.basic_auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        } else if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        request.send().await
    }
}

#[async_trait]
impl PrometheusApi for PrometheusClient {
    async fn probe(&self, kind: ProbeKind) -> Result<ProbeResult> {
        let url = self.url(kind.path())?;

        let response = self.get(url.clone()).await.map_err(|e| {
            debug!(url = %url, error = %e, "Probe request failed");
            Error::transport(e)
        })?;

        let status_code = response.status().as_u16();
        let body = response.bytes().await.map_err(Error::transport)?;
        // Prometheus answers in UTF-8; stray invalid bytes become U+FFFD
        // rather than failing a check that did get a response.
        let body = String::from_utf8_lossy(&body).into_owned();

        debug!(url = %url, kind = %kind, status = status_code, "Probe response received");
        Ok(ProbeResult { status_code, body })
    }

    async fn build_info(&self) -> Result<BuildInfo> {
        let url = self.url(BUILDINFO_PATH)?;

        let response = self.get(url.clone()).await.map_err(|e| {
            debug!(url = %url, error = %e, "Build info request failed");
            Error::info_retrieval(error_chain(&e))
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::info_retrieval(error_chain(&e)))?;

        debug!(url = %url, status = status.as_u16(), "Build info response received");
        decode_build_info(status, &body)
    }
}

fn decode_build_info(status: reqwest::StatusCode, body: &[u8]) -> Result<BuildInfo> {
    let envelope: ApiResponse<BuildInfo> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(Error::info_retrieval(format!(
                "server returned HTTP status {}",
                status
            )));
        }
        Err(e) => {
            return Err(Error::info_retrieval(format!(
                "failed to decode build info: {}",
                e
            )));
        }
    };

    if envelope.status != "success" {
        return Err(Error::info_retrieval(format!(
            "{}: {}",
            envelope.error_type.as_deref().unwrap_or("error"),
            envelope.error.as_deref().unwrap_or("unknown error")
        )));
    }

    if !status.is_success() {
        return Err(Error::info_retrieval(format!(
            "server returned HTTP status {}",
            status
        )));
    }

    envelope
        .data
        .ok_or_else(|| Error::info_retrieval("build info response has no data"))
}

fn default_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();

    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::config(format!("invalid header name {:?}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("invalid value for header {}: {}", name, e)))?;
        map.append(header_name, header_value);
    }

    Ok(map)
}

fn load_ca_bundle(path: &Path) -> Result<Vec<Certificate>> {
    let pem = std::fs::read(path)
        .map_err(|e| Error::config(format!("failed to read CA file {}: {}", path.display(), e)))?;

    Certificate::from_pem_bundle(&pem)
        .map_err(|e| Error::config(format!("invalid CA file {}: {}", path.display(), e)))
}

fn load_identity(cert_file: &Path, key_file: &Path) -> Result<Identity> {
    let mut pem = std::fs::read(cert_file).map_err(|e| {
        Error::config(format!("failed to read certificate {}: {}", cert_file.display(), e))
    })?;
    let key = std::fs::read(key_file)
        .map_err(|e| Error::config(format!("failed to read key {}: {}", key_file.display(), e)))?;

    pem.push(b'\n');
    pem.extend_from_slice(&key);

    Identity::from_pem(&pem).map_err(|e| {
        Error::config(format!(
            "invalid client certificate {} / key {}: {}",
            cert_file.display(),
            key_file.display(),
            e
        ))
    })
}
