//! Core types for repository search and export

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use utoipa::ToSchema;

/// Field the upstream orders search results by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    /// Number of stargazers
    #[default]
    Stars,
    /// Number of forks
    Forks,
    /// Number of issues labelled "help wanted"
    HelpWantedIssues,
    /// Last update time
    Updated,
}

impl SortField {
    /// Value sent in the upstream `sort` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Stars => "stars",
            SortField::Forks => "forks",
            SortField::HelpWantedIssues => "help-wanted-issues",
            SortField::Updated => "updated",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl SortOrder {
    /// Value sent in the upstream `order` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured search criteria
///
/// Turned into a single GitHub search query string by
/// [`build_query`](crate::github::build_query).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchFilter {
    /// Primary language (e.g. "rust", "python")
    pub language: String,
    /// Minimum number of stars (0 = no lower bound)
    #[serde(default)]
    pub stars_min: u64,
    /// Maximum number of stars (None = unbounded)
    #[serde(default)]
    pub stars_max: Option<u64>,
    /// Minimum number of forks (0 = no lower bound)
    #[serde(default)]
    pub forks_min: u64,
    /// Maximum number of forks (None = unbounded)
    #[serde(default)]
    pub forks_max: Option<u64>,
    /// Sort field
    #[serde(default)]
    pub sort: SortField,
    /// Sort direction
    #[serde(default)]
    pub order: SortOrder,
}

impl SearchFilter {
    /// Filter on language only, with default ranges and ordering
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            stars_min: 0,
            stars_max: None,
            forks_min: 0,
            forks_max: None,
            sort: SortField::default(),
            order: SortOrder::default(),
        }
    }

    /// Reject filters the upstream cannot answer meaningfully
    ///
    /// A blank language or an inverted range (`max < min`) is a
    /// [`Error::Validation`].
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(Error::Validation("lang must not be empty".into()));
        }
        check_range("stars", self.stars_min, self.stars_max)?;
        check_range("forks", self.forks_min, self.forks_max)?;
        Ok(())
    }
}

fn check_range(name: &str, min: u64, max: Option<u64>) -> Result<()> {
    match max {
        Some(max) if max < min => Err(Error::Validation(format!(
            "{name}_max ({max}) must be greater than or equal to {name}_min ({min})"
        ))),
        _ => Ok(()),
    }
}

/// The slice `[offset, offset + limit)` of the upstream's ordered results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    limit: usize,
    offset: usize,
}

impl FetchWindow {
    /// Create a window; `limit` must be at least 1
    pub fn new(limit: usize, offset: usize) -> Result<Self> {
        if limit == 0 {
            return Err(Error::Validation("limit must be at least 1".into()));
        }
        Ok(Self { limit, offset })
    }

    /// Maximum number of records to return
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of leading records to skip
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// One upstream page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// GitHub search query (`q`)
    pub query: String,
    /// Sort field (`sort`)
    pub sort: SortField,
    /// Sort direction (`order`)
    pub order: SortOrder,
    /// 1-based page number (`page`)
    pub page: usize,
    /// Page size (`per_page`), at most 100
    pub per_page: usize,
}

/// One page of upstream search results
///
/// Items are kept as raw JSON so a single malformed entry cannot fail the
/// whole page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Total number of matches reported by the upstream
    #[serde(default)]
    pub total_count: u64,
    /// Repository items on this page, `null` reads as an empty page
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A normalized repository search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RepositoryRecord {
    /// Repository name
    pub name: String,
    /// Repository description
    pub description: Option<String>,
    /// Repository URL on GitHub
    pub url: String,
    /// Repository size in KB
    pub size: u64,
    /// Number of stars
    pub stars: u64,
    /// Number of forks
    pub forks: u64,
    /// Number of open issues
    #[serde(rename = "issues")]
    pub open_issues: u64,
    /// Primary programming language
    pub language: Option<String>,
    /// SPDX license identifier
    pub license: Option<String>,
}

impl RepositoryRecord {
    /// Build a record from one upstream search item
    ///
    /// Never fails: missing or mistyped fields fall back to empty strings,
    /// zero, or `None`.
    pub fn from_item(item: &serde_json::Value) -> Self {
        let text = |key: &str| item.get(key).and_then(|v| v.as_str()).map(str::to_string);
        let count = |key: &str| item.get(key).and_then(|v| v.as_u64()).unwrap_or(0);

        Self {
            name: text("name").unwrap_or_default(),
            description: text("description"),
            url: text("html_url").unwrap_or_default(),
            size: count("size"),
            stars: count("stargazers_count"),
            forks: count("forks_count"),
            open_issues: count("open_issues_count"),
            language: text("language"),
            license: item
                .get("license")
                .and_then(|l| l.get("spdx_id"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
        }
    }
}

/// Result of a search-and-export run
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Number of records written
    pub count: usize,
    /// Generated file name
    pub filename: String,
    /// Full path of the written file
    pub filepath: PathBuf,
    /// Records in upstream order
    pub repositories: Vec<RepositoryRecord>,
}
