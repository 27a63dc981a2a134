//! Repository search handler

use super::{MAX_LIMIT, SearchQuery, SearchResponse};
use crate::api::AppState;
use crate::error::{Error, Result};
use crate::types::{FetchWindow, SearchFilter};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

/// GET /repositories/search - Search GitHub and export the results to CSV
#[utoipa::path(
    get,
    path = "/api/repositories/search",
    tag = "repositories",
    params(
        ("lang" = String, Query, description = "Language filter (e.g. python, javascript, go)"),
        ("limit" = Option<usize>, Query, description = "Number of repositories to return (1-1000, default 10)"),
        ("offset" = Option<usize>, Query, description = "Number of repositories to skip (default 0)"),
        ("stars_min" = Option<u64>, Query, description = "Minimum number of stars"),
        ("stars_max" = Option<u64>, Query, description = "Maximum number of stars (unbounded if omitted)"),
        ("forks_min" = Option<u64>, Query, description = "Minimum number of forks"),
        ("forks_max" = Option<u64>, Query, description = "Maximum number of forks (unbounded if omitted)"),
        ("sort" = Option<crate::types::SortField>, Query, description = "Sort field (default stars)"),
        ("order" = Option<crate::types::SortOrder>, Query, description = "Sort direction (default desc)")
    ),
    responses(
        (status = 200, description = "Repositories found and written to repositories_{lang}_{limit}_{offset}.csv", body = SearchResponse),
        (status = 422, description = "Invalid query parameters", body = crate::error::ApiError),
        (status = 429, description = "GitHub API rate limit exceeded", body = crate::error::ApiError),
        (status = 502, description = "GitHub API error", body = crate::error::ApiError),
        (status = 500, description = "Failed to write the export file", body = crate::error::ApiError)
    )
)]
pub async fn search_repositories(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>> {
    let Query(query) = query?;

    if query.limit == 0 || query.limit > MAX_LIMIT {
        return Err(Error::Validation(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {}",
            query.limit
        )));
    }

    let window = FetchWindow::new(query.limit, query.offset)?;
    let filter = SearchFilter {
        language: query.lang,
        stars_min: query.stars_min,
        stars_max: query.stars_max,
        forks_min: query.forks_min,
        forks_max: query.forks_max,
        sort: query.sort,
        order: query.order,
    };

    let outcome = state.exporter.search_and_export(&filter, window).await?;

    Ok(Json(SearchResponse {
        count: outcome.count,
        filename: outcome.filename,
        filepath: outcome.filepath.display().to_string(),
        repositories: outcome.repositories,
    }))
}
