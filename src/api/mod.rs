//! REST API server module
//!
//! Exposes repository search with CSV export, health, and OpenAPI
//! documentation over HTTP.

use crate::export::SearchExporter;
use crate::{Config, Result};
use axum::{Router, http::HeaderValue, response::Redirect, routing::get};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Path Swagger UI is mounted at
pub const DOCS_PATH: &str = "/api/docs";

/// Create the API router with all route definitions
///
/// # Routes
///
/// - `GET /api/repositories/search` - Search and export to CSV
/// - `GET /api/health` - Health check
/// - `GET /api/openapi.json` - OpenAPI specification
/// - `GET /api/docs` - Swagger UI (if enabled); `/` and `/docs` redirect here
/// - `GET /static/<file>` - Generated CSV files
pub fn create_router(exporter: Arc<SearchExporter>, config: Arc<Config>) -> Router {
    let output_dir = exporter.output_dir().to_path_buf();
    let state = AppState::new(exporter, config.clone());

    let router = Router::new()
        .route(
            "/api/repositories/search",
            get(routes::search_repositories),
        )
        .route("/api/health", get(routes::health_check));

    // Swagger UI serves the document itself at /api/openapi.json
    let router = if config.server.swagger_ui {
        router
            .merge(SwaggerUi::new(DOCS_PATH).url("/api/openapi.json", ApiDoc::openapi()))
            .route("/", get(|| async { Redirect::temporary(DOCS_PATH) }))
            .route("/docs", get(|| async { Redirect::temporary(DOCS_PATH) }))
    } else {
        router.route("/api/openapi.json", get(routes::openapi_spec))
    };

    let router = router
        .nest_service("/static", ServeDir::new(output_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.server.cors_enabled {
        router.layer(build_cors_layer(&config.server.cors_origins))
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// `"*"` (or an empty list) allows any origin; otherwise only the listed
/// origins that parse as header values are allowed.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Serve the API on the configured bind address until `shutdown` resolves
///
/// In-flight requests are allowed to finish once `shutdown` completes.
///
/// # Example
///
/// ```no_run
/// use github_repo_search::{Config, GitHubClient, SearchExporter, build_http_client, shutdown_signal};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::load()?);
/// let http = build_http_client(&config.github)?;
/// let client = GitHubClient::new(http, &config.github);
/// let exporter = Arc::new(SearchExporter::new(Arc::new(client), config.export.output_dir.clone()));
///
/// github_repo_search::api::start_api_server(exporter, config, shutdown_signal()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server<F>(
    exporter: Arc<SearchExporter>,
    config: Arc<Config>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.server.bind_address;

    tracing::info!(
        address = %bind_address,
        "Starting API server"
    );

    let app = create_router(exporter, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %listener.local_addr().map_err(crate::error::Error::Io)?,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
