//! Upstream search gateway for the GitHub repository search API
//!
//! - [`query`] turns a [`SearchFilter`](crate::types::SearchFilter) into the search DSL
//! - [`pagination`] maps a [`FetchWindow`] onto the minimal run of page requests
//! - [`response`] classifies upstream failures
//!
//! [`GitHubClient`] ties these to a shared `reqwest::Client`.

use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use crate::types::{FetchWindow, PageRequest, RepositoryRecord, SearchPage, SortField, SortOrder};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::time::Duration;

pub mod pagination;
pub mod query;
pub mod response;

pub use pagination::{MAX_PER_PAGE, SearchBackend, search_repositories};
pub use query::build_query;
pub use response::{classify_response, parse_search_page};

/// Path of the repository search endpoint, relative to the API root
pub const SEARCH_REPOS_ENDPOINT: &str = "/search/repositories";

/// Media type requesting the versioned JSON representation
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// REST API version pinned on every request
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Build the process-wide HTTP client used for upstream calls
///
/// The caller owns the returned client and hands clones of it to
/// [`GitHubClient::new`]; clones share one connection pool.
pub fn build_http_client(config: &GitHubConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );

    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Config {
            message: format!("failed to create HTTP client: {e}"),
            key: None,
        })
}

/// GitHub repository search client
///
/// Holds a handle to an externally owned `reqwest::Client`; creating and
/// tearing down the connection pool is the application's job. Cloning is
/// cheap and clones may be used concurrently.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    search_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl GitHubClient {
    /// Create a client over a shared HTTP session
    pub fn new(http: reqwest::Client, config: &GitHubConfig) -> Self {
        Self {
            http,
            search_url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                SEARCH_REPOS_ENDPOINT
            ),
            token: config.token.clone(),
            timeout: config.timeout,
        }
    }

    /// Whether requests carry an `Authorization` header
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch records `[offset, offset + limit)` for a search query
    ///
    /// See [`pagination::search_repositories`] for the paging rules.
    pub async fn search_repositories(
        &self,
        query: &str,
        sort: SortField,
        order: SortOrder,
        window: FetchWindow,
    ) -> Result<Vec<RepositoryRecord>> {
        search_repositories(self, query, sort, order, window).await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("search_url", &self.search_url)
            .field("authenticated", &self.token.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl SearchBackend for GitHubClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage> {
        let mut builder = self
            .http
            .get(&self.search_url)
            .query(&[
                ("q", request.query.as_str()),
                ("sort", request.sort.as_str()),
                ("order", request.order.as_str()),
            ])
            .query(&[("per_page", request.per_page), ("page", request.page)])
            .timeout(self.timeout);

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        match parse_search_page(status, &body) {
            Ok(page) => Ok(page),
            Err(e) => {
                match &e {
                    Error::RateLimit { .. } => {
                        tracing::warn!(page = request.page, "GitHub rate limit exceeded");
                    }
                    _ => {
                        tracing::error!(
                            page = request.page,
                            status,
                            error = %e,
                            "GitHub search request failed"
                        );
                    }
                }
                Err(e)
            }
        }
    }
}
