//! Integration tests for PrometheusClient against a local HTTP server

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::get;
use common::Error;
use promhealth::{
    BasicAuth, ClientConfig, ExitLevel, PerfdataList, PluginExit, ProbeKind, PrometheusApi,
    PrometheusClient, augment, translate,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

const BUILDINFO: &str = r#"{"status":"success","data":{"version":"2.53.0","revision":"4c35b92","branch":"HEAD","buildUser":"root@7a2d2f9ff2c5","buildDate":"20240616-08:36:48","goVersion":"go1.22.4"}}"#;

/// Base64 of `username:password`
const GOOD_CREDENTIALS: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

/// Helper to serve a router on an ephemeral port
async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn prometheus_router() -> Router {
    Router::new()
        .route("/-/healthy", get(|| async { "Prometheus Server is Healthy." }))
        .route("/-/ready", get(|| async { "Prometheus Server is Ready." }))
        .route("/api/v1/status/buildinfo", get(|| async { BUILDINFO }))
}

fn config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig {
        hostname: addr.ip().to_string(),
        port: addr.port(),
        timeout: Duration::from_secs(2),
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn test_health_probe_ok() {
    let addr = spawn_server(prometheus_router()).await;
    let client = PrometheusClient::new(&config_for(addr)).unwrap();

    let probe = client.health().await.unwrap();
    assert_eq!(probe.status_code, 200);
    assert_eq!(probe.body, "Prometheus Server is Healthy.");

    let status = translate(probe);
    assert_eq!(status.level, ExitLevel::Ok);
    assert_eq!(status.output, "OK - Prometheus Server is Healthy.");
}

#[tokio::test]
async fn test_ready_probe_ok() {
    let addr = spawn_server(prometheus_router()).await;
    let client = PrometheusClient::new(&config_for(addr)).unwrap();

    let probe = client.probe(ProbeKind::Ready).await.unwrap();
    assert_eq!(probe.status_code, 200);
    assert_eq!(probe.body, ProbeKind::Ready.expected_phrase());
}

#[tokio::test]
async fn test_basic_auth_is_sent() {
    let router = Router::new().route(
        "/-/healthy",
        get(|headers: HeaderMap| async move {
            match headers.get(AUTHORIZATION) {
                Some(value) if value == GOOD_CREDENTIALS => {
                    (StatusCode::OK, "Prometheus Server is Healthy.")
                }
                _ => (StatusCode::UNAUTHORIZED, "Access Denied!"),
            }
        }),
    );
    let addr = spawn_server(router).await;

    let mut config = config_for(addr);
    config.basic_auth = BasicAuth::parse("username:password");
    let client = PrometheusClient::new(&config).unwrap();
    let probe = client.health().await.unwrap();
    assert_eq!(probe.status_code, 200);

    config.basic_auth = BasicAuth::parse("wrong:kong");
    let client = PrometheusClient::new(&config).unwrap();
    let probe = client.health().await.unwrap();
    assert_eq!(probe.status_code, 401);

    let status = translate(probe);
    let perfdata = PerfdataList::for_status(&status, 401);
    let exit = PluginExit::from_status(status, &perfdata);
    assert_eq!(exit.exit_code(), 2);
    assert_eq!(
        exit.render(),
        "CRITICAL - Access Denied!\n|status=2 output=\"CRITICAL - Access Denied!\" statuscode=401\n"
    );
}

#[tokio::test]
async fn test_bearer_token_and_headers_are_sent() {
    let router = Router::new().route(
        "/-/ready",
        get(|headers: HeaderMap| async move {
            let bearer_ok = headers
                .get(AUTHORIZATION)
                .is_some_and(|v| v == "Bearer s3cr3t");
            let tenant_ok = headers
                .get("x-scope-orgid")
                .is_some_and(|v| v == "tenant-1");
            if bearer_ok && tenant_ok {
                (StatusCode::OK, "Prometheus Server is Ready.")
            } else {
                (StatusCode::FORBIDDEN, "forbidden")
            }
        }),
    );
    let addr = spawn_server(router).await;

    let mut config = config_for(addr);
    config.bearer = Some("s3cr3t".to_string());
    config.headers = vec![("X-Scope-OrgID".to_string(), "tenant-1".to_string())];
    let client = PrometheusClient::new(&config).unwrap();

    let probe = client.ready().await.unwrap();
    assert_eq!(probe.status_code, 200);
}

#[tokio::test]
async fn test_server_error_body_passthrough() {
    let router = Router::new().route(
        "/-/ready",
        get(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable\nstill replaying WAL",
            )
        }),
    );
    let addr = spawn_server(router).await;
    let client = PrometheusClient::new(&config_for(addr)).unwrap();

    let probe = client.ready().await.unwrap();
    assert_eq!(probe.status_code, 503);

    let status = translate(probe);
    assert_eq!(status.level, ExitLevel::Critical);
    assert_eq!(status.output, "CRITICAL - Service Unavailable\nstill replaying WAL");
}

#[tokio::test]
async fn test_invalid_utf8_body_is_replaced() {
    let router = Router::new().route(
        "/-/healthy",
        get(|| async { (StatusCode::OK, vec![b'u', b'p', 0xff, b'!']) }),
    );
    let addr = spawn_server(router).await;
    let client = PrometheusClient::new(&config_for(addr)).unwrap();

    let probe = client.health().await.unwrap();
    assert_eq!(probe.status_code, 200);
    assert_eq!(probe.body, "up\u{FFFD}!");
}

#[tokio::test]
async fn test_build_info() {
    let addr = spawn_server(prometheus_router()).await;
    let client = PrometheusClient::new(&config_for(addr)).unwrap();

    let info = client.build_info().await.unwrap();
    assert_eq!(info.version, "2.53.0");
    assert_eq!(info.revision, "4c35b92");

    let text = augment("OK - Prometheus Server is Healthy.".to_string(), &info);
    assert!(text.ends_with("BuildUser: root@7a2d2f9ff2c5\nRevision: 4c35b92"));
}

#[tokio::test]
async fn test_build_info_unauthorized() {
    let router = Router::new().route(
        "/api/v1/status/buildinfo",
        get(|| async { (StatusCode::UNAUTHORIZED, "Access Denied!") }),
    );
    let addr = spawn_server(router).await;
    let client = PrometheusClient::new(&config_for(addr)).unwrap();

    let err = client.build_info().await.unwrap_err();
    assert!(matches!(err, Error::InfoRetrieval(_)));
    assert_eq!(err.to_string(), "server returned HTTP status 401 Unauthorized");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Reserve a port, then free it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PrometheusClient::new(&config_for(addr)).unwrap();
    let err = client.health().await.unwrap_err();
    assert!(err.is_transport());

    let exit = PluginExit::fatal(&err);
    assert_eq!(exit.exit_code(), 3);
    assert!(exit.render().starts_with("UNKNOWN - "));
    assert!(exit.render().contains(&format!("127.0.0.1:{}/-/healthy", addr.port())));
    assert!(!exit.render().contains('|'));
}

#[tokio::test]
async fn test_connection_refused_on_build_info() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PrometheusClient::new(&config_for(addr)).unwrap();
    let err = client.build_info().await.unwrap_err();
    assert!(matches!(err, Error::InfoRetrieval(_)));
}
