//! # github-repo-search
//!
//! REST API that searches GitHub repositories by language, stars and forks,
//! returns a window `[offset, offset + limit)` of the ranked results, and
//! writes that window to a CSV file.
//!
//! ## Layers
//!
//! - [`github`] - upstream gateway: query building, pagination, error classification
//! - [`export`] - runs a search and writes `repositories_<lang>_<limit>_<offset>.csv`
//! - [`api`] - axum router, OpenAPI document, static file serving
//!
//! ## Quick Start
//!
//! ```no_run
//! use github_repo_search::{Config, FetchWindow, GitHubClient, SearchExporter, SearchFilter, build_http_client};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let http = build_http_client(&config.github)?;
//!     let client = GitHubClient::new(http, &config.github);
//!     let exporter = SearchExporter::new(Arc::new(client), config.export.output_dir.clone());
//!
//!     let filter = SearchFilter {
//!         stars_min: 1000,
//!         ..SearchFilter::for_language("rust")
//!     };
//!     let outcome = exporter
//!         .search_and_export(&filter, FetchWindow::new(25, 0)?)
//!         .await?;
//!
//!     println!("wrote {} repositories to {}", outcome.count, outcome.filepath.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Search-and-export orchestration
pub mod export;
/// GitHub search gateway
pub mod github;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{Config, LogLevel};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use export::SearchExporter;
pub use github::{GitHubClient, SearchBackend, build_http_client, build_query};
pub use types::{
    ExportOutcome, FetchWindow, PageRequest, RepositoryRecord, SearchFilter, SearchPage,
    SortField, SortOrder,
};

/// Resolve once the process is asked to stop
///
/// Pass to [`api::start_api_server`] for graceful shutdown.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

/// Resolve once the process is asked to stop (Ctrl+C)
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
