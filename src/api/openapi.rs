//! OpenAPI documentation and schema generation

use utoipa::OpenApi;

/// OpenAPI documentation for the repository search API
///
/// Served at `/api/openapi.json`; browsable at `/api/docs` when Swagger UI
/// is enabled.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "github-repo-search REST API",
        version = "0.1.0",
        description = "Search GitHub repositories by language, stars and forks, and export the results to CSV",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        crate::api::routes::search_repositories,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        crate::types::SortField,
        crate::types::SortOrder,
        crate::types::RepositoryRecord,
        crate::api::routes::SearchResponse,
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "repositories", description = "Repository search and CSV export"),
        (name = "system", description = "Health and API documentation")
    )
)]
pub struct ApiDoc;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| *p == "/api/repositories/search"));
        assert!(paths.iter().any(|p| *p == "/api/health"));
        assert!(paths.iter().any(|p| *p == "/api/openapi.json"));
    }

    #[test]
    fn search_parameters_are_documented() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let params = json["paths"]["/api/repositories/search"]["get"]["parameters"]
            .as_array()
            .unwrap();
        let names: Vec<&str> = params.iter().filter_map(|p| p["name"].as_str()).collect();

        for expected in [
            "lang",
            "limit",
            "offset",
            "stars_min",
            "stars_max",
            "forks_min",
            "forks_max",
            "sort",
            "order",
        ] {
            assert!(names.contains(&expected), "missing parameter {expected}");
        }
    }

    #[test]
    fn schemas_are_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.unwrap().schemas;
        assert!(schemas.contains_key("SearchResponse"));
        assert!(schemas.contains_key("RepositoryRecord"));
        assert!(schemas.contains_key("ApiError"));
    }
}
