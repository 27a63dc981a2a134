//! github-repo-search server binary
//!
//! Configuration comes from an optional `.env` file and
//! `GITHUB_REPO_SEARCH_API_*` environment variables.

use github_repo_search::{
    Config, GitHubClient, SearchExporter, api::start_api_server, build_http_client,
    shutdown_signal,
};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let http = build_http_client(&config.github)?;
    let client = GitHubClient::new(http, &config.github);
    if !client.is_authenticated() {
        tracing::warn!("No GitHub token configured, using the unauthenticated rate limit");
    }

    tracing::info!(
        upstream = %config.github.base_url,
        output_dir = %config.export.output_dir.display(),
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let exporter = Arc::new(SearchExporter::new(
        Arc::new(client),
        config.export.output_dir.clone(),
    ));

    start_api_server(exporter, Arc::new(config), shutdown_signal()).await?;

    Ok(())
}
