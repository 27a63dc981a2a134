//! Error types for github-repo-search
//!
//! This module provides error handling for the library, including:
//! - The upstream failure taxonomy (authentication, rate limit, generic upstream)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for github-repo-search operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for github-repo-search
///
/// The three upstream variants are the classified outcomes of a failed
/// search page request. Everything the upstream does wrong that is neither
/// an authentication failure nor a rate limit collapses into [`Error::Upstream`].
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream rejected the configured credential (HTTP 401)
    #[error("{message}")]
    Authentication {
        /// Guidance on how to fix the credential
        message: String,
    },

    /// The upstream rate limit was exceeded (HTTP 403 mentioning "rate limit")
    #[error("{message}")]
    RateLimit {
        /// Human-readable description of the limit
        message: String,
    },

    /// Any other upstream failure, including transport errors and timeouts
    #[error("GitHub API error: {}", describe_upstream(*status, body))]
    Upstream {
        /// HTTP status returned by the upstream, `None` when no response arrived
        status: Option<u16>,
        /// Raw response body, or the transport error description
        body: String,
    },

    /// Invalid request parameters
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "github_base_url")
        key: Option<String>,
    },

    /// I/O error (creating the output directory, writing the CSV file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

fn describe_upstream(status: Option<u16>, body: &str) -> String {
    match status {
        Some(403) => format!("forbidden: {body}"),
        Some(code) => format!("{code} - {body}"),
        None => body.to_string(),
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        let body = if error.is_timeout() {
            format!("request timed out: {error}")
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            format!("request failed: {error}")
        };

        Error::Upstream {
            status: error.status().map(|s| s.as_u16()),
            body,
        }
    }
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "rate_limit_exceeded",
///     "message": "GitHub API rate limit exceeded. Please try again later or use authentication token."
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "rate_limit_exceeded", "validation_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 422 Unprocessable Entity - invalid query parameters
            Error::Validation(_) => 422,

            // 429 Too Many Requests - upstream quota exhausted
            Error::RateLimit { .. } => 429,

            // 502 Bad Gateway - upstream refused or failed
            Error::Authentication { .. } => 502,
            Error::Upstream { .. } => 502,

            // 500 Internal Server Error - server-side issues
            Error::Config { .. } => 500,
            Error::Io(_) => 500,
            Error::Csv(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Authentication { .. } => "upstream_authentication_failed",
            Error::RateLimit { .. } => "rate_limit_exceeded",
            Error::Upstream { .. } => "upstream_error",
            Error::Validation(_) => "validation_error",
            Error::Config { .. } => "config_error",
            Error::Io(_) => "io_error",
            Error::Csv(_) => "csv_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Upstream {
                status: Some(status),
                ..
            } => Some(serde_json::json!({
                "upstream_status": status,
            })),
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
