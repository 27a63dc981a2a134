//! Upstream response classification and parsing

use crate::error::{Error, Result};
use crate::types::SearchPage;

const AUTHENTICATION_FAILED: &str = "GitHub API authentication failed. \
     Either remove GITHUB_REPO_SEARCH_API_GITHUB_TOKEN from .env file \
     or provide a valid Personal Access Token from \
     https://github.com/settings/tokens";

const RATE_LIMIT_EXCEEDED: &str = "GitHub API rate limit exceeded. \
     Please try again later or use authentication token.";

/// Map an upstream status and body onto the error taxonomy
///
/// - `401` is [`Error::Authentication`]
/// - `403` whose message mentions "rate limit" (any case) is [`Error::RateLimit`]
/// - any other status `>= 400` is [`Error::Upstream`]
/// - everything else is success
pub fn classify_response(status: u16, body: &str) -> Result<()> {
    match status {
        401 => Err(Error::Authentication {
            message: AUTHENTICATION_FAILED.to_string(),
        }),
        403 if mentions_rate_limit(body) => Err(Error::RateLimit {
            message: RATE_LIMIT_EXCEEDED.to_string(),
        }),
        s if s >= 400 => Err(Error::Upstream {
            status: Some(s),
            body: body.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Checks the JSON `message` field, or the raw body when it is not JSON
fn mentions_rate_limit(body: &str) -> bool {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string());
    message.to_lowercase().contains("rate limit")
}

/// Classify the response, then decode it as a search page
///
/// A success status with a body that is not JSON is reported as
/// [`Error::Upstream`] carrying the status.
pub fn parse_search_page(status: u16, body: &str) -> Result<SearchPage> {
    classify_response(status, body)?;

    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse GitHub search response");
        Error::Upstream {
            status: Some(status),
            body: format!("invalid search response: {e}"),
        }
    })
}
