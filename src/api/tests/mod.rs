use super::*;
use crate::config::{ExportConfig, GitHubConfig};
use crate::github::{GitHubClient, build_http_client};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;


/// Router wired to a mock upstream and a temporary output directory
struct TestApp {
    router: Router,
    upstream: MockServer,
    output_dir: TempDir,
}

fn test_config(upstream: &MockServer, output_dir: &TempDir) -> Config {
    Config {
        github: GitHubConfig {
            base_url: upstream.uri(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
        export: ExportConfig {
            output_dir: output_dir.path().to_path_buf(),
        },
        ..Default::default()
    }
}

fn build_exporter(config: &Config) -> Arc<SearchExporter> {
    let http = build_http_client(&config.github).unwrap();
    let client = GitHubClient::new(http, &config.github);
    Arc::new(SearchExporter::new(
        Arc::new(client),
        config.export.output_dir.clone(),
    ))
}

async fn test_app() -> TestApp {
    test_app_with(|_| {}).await
}

async fn test_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let upstream = MockServer::start().await;
    let output_dir = tempfile::tempdir().unwrap();

    let mut config = test_config(&upstream, &output_dir);
    customize(&mut config);

    let exporter = build_exporter(&config);
    let router = create_router(exporter, Arc::new(config));

    TestApp {
        router,
        upstream,
        output_dir,
    }
}

async fn fetch(router: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

async fn fetch_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = fetch(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn server_starts_and_stops_on_shutdown_signal() {
    let upstream = MockServer::start().await;
    let output_dir = tempfile::tempdir().unwrap();

    let mut config = test_config(&upstream, &output_dir);
    config.server.bind_address = "127.0.0.1:0".parse().unwrap();
    let exporter = build_exporter(&config);

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(start_api_server(exporter, Arc::new(config), async {
        rx.await.ok();
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn server_reports_bind_failure() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let upstream = MockServer::start().await;
    let output_dir = tempfile::tempdir().unwrap();

    let mut config = test_config(&upstream, &output_dir);
    config.server.bind_address = occupied.local_addr().unwrap();
    let exporter = build_exporter(&config);

    let result = start_api_server(exporter, Arc::new(config), std::future::pending()).await;
    assert!(matches!(result, Err(crate::error::Error::Io(_))));
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = test_app().await;

    let request = Request::builder()
        .uri("/api/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn cors_restricts_to_configured_origins() {
    let app = test_app_with(|config| {
        config.server.cors_origins = vec!["https://app.example.com".to_string()];
    })
    .await;

    let allowed = Request::builder()
        .uri("/api/health")
        .header("Origin", "https://app.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://app.example.com")
    );

    let denied = Request::builder()
        .uri("/api/health")
        .header("Origin", "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(denied).await.unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn cors_disabled_sends_no_cors_headers() {
    let app = test_app_with(|config| config.server.cors_enabled = false).await;

    let request = Request::builder()
        .uri("/api/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
