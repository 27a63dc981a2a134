//! Test configuration helpers and a server harness bound to an ephemeral port

use github_repo_search::config::{ExportConfig, GitHubConfig, sanitize_token};
use github_repo_search::{Config, GitHubClient, SearchExporter, api, build_http_client};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Configuration pointing at `base_url` and writing into `output_dir`
pub fn test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        github: GitHubConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
        export: ExportConfig {
            output_dir: output_dir.to_path_buf(),
        },
        ..Default::default()
    }
}

/// Configuration for the real GitHub API, if live tests are enabled
///
/// Live tests run only when `GITHUB_REPO_SEARCH_API_LIVE_TESTS=1`. A token in
/// `GITHUB_REPO_SEARCH_API_GITHUB_TOKEN` is used when present.
pub fn live_config(output_dir: &Path) -> Option<Config> {
    dotenvy::dotenv().ok();

    if std::env::var("GITHUB_REPO_SEARCH_API_LIVE_TESTS").ok().as_deref() != Some("1") {
        return None;
    }

    let mut config = test_config("https://api.github.com", output_dir);
    config.github.timeout = Duration::from_secs(30);
    config.github.token = sanitize_token(
        std::env::var("GITHUB_REPO_SEARCH_API_GITHUB_TOKEN")
            .ok()
            .as_deref(),
    );
    Some(config)
}

/// Exporter backed by a real HTTP client for `config`
pub fn create_exporter(config: &Config) -> Arc<SearchExporter> {
    let http = build_http_client(&config.github).expect("failed to build HTTP client");
    let client = GitHubClient::new(http, &config.github);
    Arc::new(SearchExporter::new(
        Arc::new(client),
        config.export.output_dir.clone(),
    ))
}

/// A running API server; stops when [`TestServer::shutdown`] is called
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    /// Serve the router for `config` on 127.0.0.1 with an OS-assigned port
    pub async fn spawn(config: Config) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no address");

        let exporter = create_exporter(&config);
        let router = api::create_router(exporter, Arc::new(config));

        let (shutdown, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    rx.await.ok();
                })
                .await
        });

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Stop accepting connections and wait for the server task
    pub async fn shutdown(self) {
        self.shutdown.send(()).ok();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not shut down")
            .expect("server task panicked")
            .expect("server returned an error");
    }
}
