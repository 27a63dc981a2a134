//! Upstream response fixtures

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One search item in the upstream's format; index `i` drives every field
pub fn repo_item(i: usize) -> Value {
    json!({
        "id": 1_000_000 + i,
        "name": format!("repo-{i}"),
        "full_name": format!("acme/repo-{i}"),
        "description": if i % 4 == 0 { Value::Null } else { json!(format!("Repository {i}, for testing")) },
        "html_url": format!("https://github.com/acme/repo-{i}"),
        "size": 10 * i,
        "stargazers_count": 100_000 - i,
        "forks_count": i % 50,
        "open_issues_count": i % 7,
        "language": "Rust",
        "license": if i % 3 == 0 { Value::Null } else { json!({"key": "mit", "name": "MIT License", "spdx_id": "MIT"}) }
    })
}

/// Search response body for results `range` out of `total_count`
pub fn search_page(total_count: usize, range: std::ops::Range<usize>) -> Value {
    json!({
        "total_count": total_count,
        "incomplete_results": false,
        "items": range.map(repo_item).collect::<Vec<_>>(),
    })
}

/// Serve an upstream holding `total` results in 100-anchored pages
///
/// Mounts one mock per `(page, per_page)` pair, each expected exactly once
/// and answering with the items that page holds.
pub async fn mount_ranked_results(server: &MockServer, total: usize, per_page: &[(usize, usize)]) {
    for &(page, size) in per_page {
        let start = (page - 1) * 100;
        let end = (start + size).min(total);
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("page", page.to_string()))
            .and(query_param("per_page", size.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(search_page(total, start.min(end)..end)),
            )
            .expect(1)
            .mount(server)
            .await;
    }
}

/// Respond to every search with `status` and a JSON `message`
pub async fn mount_failure(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "message": message,
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(server)
        .await;
}
