//! Route handlers for the REST API
//!
//! - [`repositories`]: search and CSV export
//! - [`system`]: health and OpenAPI

use crate::types::{RepositoryRecord, SortField, SortOrder};
use serde::{Deserialize, Serialize};

mod repositories;
mod system;

pub use repositories::*;
pub use system::*;

/// Largest `limit` accepted by the search endpoint
pub const MAX_LIMIT: usize = 1000;

fn default_limit() -> usize {
    10
}

/// Query parameters for GET /api/repositories/search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Language filter (required)
    pub lang: String,
    /// Number of repositories to return, 1..=1000 (default: 10)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of repositories to skip (default: 0)
    #[serde(default)]
    pub offset: usize,
    /// Minimum stars (default: 0)
    #[serde(default)]
    pub stars_min: u64,
    /// Maximum stars (unbounded when absent)
    pub stars_max: Option<u64>,
    /// Minimum forks (default: 0)
    #[serde(default)]
    pub forks_min: u64,
    /// Maximum forks (unbounded when absent)
    pub forks_max: Option<u64>,
    /// Sort field (default: stars)
    #[serde(default)]
    pub sort: SortField,
    /// Sort direction (default: desc)
    #[serde(default)]
    pub order: SortOrder,
}

/// Response for GET /api/repositories/search
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchResponse {
    /// Number of repositories returned
    pub count: usize,
    /// Name of the generated CSV file
    pub filename: String,
    /// Path of the generated CSV file
    pub filepath: String,
    /// Repositories in upstream order
    pub repositories: Vec<RepositoryRecord>,
}
