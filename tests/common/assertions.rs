//! Custom test assertions for integration tests

use github_repo_search::export::CSV_HEADERS;
use serde_json::Value;
use std::path::Path;

/// Read an export file and return its data rows, checking the header
pub fn read_export(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path)
        .unwrap_or_else(|e| panic!("cannot open export {}: {e}", path.display()));

    let headers = reader.headers().expect("export has no header").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        CSV_HEADERS.to_vec(),
        "unexpected CSV header in {}",
        path.display()
    );

    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .expect("malformed CSV row")
}

/// Assert an API error body carries `code`
pub fn assert_error_code(body: &Value, code: &str) {
    assert_eq!(
        body["error"]["code"].as_str(),
        Some(code),
        "unexpected error body: {body}"
    );
    assert!(
        body["error"]["message"].as_str().is_some_and(|m| !m.is_empty()),
        "error body has no message: {body}"
    );
}

/// Assert `names` are `repo-<first>`, `repo-<first + 1>`, ...
pub fn assert_contiguous(names: &[String], first: usize) {
    for (i, name) in names.iter().enumerate() {
        assert_eq!(name, &format!("repo-{}", first + i), "gap at position {i}");
    }
}
