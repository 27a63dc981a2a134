//! Window-to-page aggregation over the upstream search API

use crate::error::Result;
use crate::types::{
    FetchWindow, PageRequest, RepositoryRecord, SearchPage, SortField, SortOrder,
};
use async_trait::async_trait;

/// Largest page the upstream will serve
pub const MAX_PER_PAGE: usize = 100;

/// Source of upstream search pages
///
/// [`GitHubClient`](super::GitHubClient) implements this over HTTP. The
/// pagination loop only sees this trait, so tests can record the exact
/// page requests it issues.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetch a single page of search results
    ///
    /// Errors are already classified (authentication, rate limit, upstream).
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage>;
}

/// Collect records `[offset, offset + limit)` of the upstream ordering
///
/// Pages are fetched strictly one after another, starting at the page that
/// holds the `offset`-th record. The first page is sized to cover the
/// skipped leading records plus what is still needed. Fetching stops as soon
/// as the window is full, a page comes back short or empty, or the
/// upstream's `total_count` is reached, so at most
/// `ceil((offset % 100 + limit) / 100)` pages are requested.
///
/// Any page error aborts the whole operation; partial results are dropped.
pub async fn search_repositories<B>(
    backend: &B,
    query: &str,
    sort: SortField,
    order: SortOrder,
    window: FetchWindow,
) -> Result<Vec<RepositoryRecord>>
where
    B: SearchBackend + ?Sized,
{
    let limit = window.limit();
    let offset = window.offset();

    let mut page = offset / MAX_PER_PAGE + 1;
    let mut skip = offset % MAX_PER_PAGE;
    let mut repositories: Vec<RepositoryRecord> = Vec::with_capacity(limit.min(MAX_PER_PAGE));

    while repositories.len() < limit {
        let remaining = limit - repositories.len();
        let per_page = MAX_PER_PAGE.min(remaining + skip);

        let request = PageRequest {
            query: query.to_string(),
            sort,
            order,
            page,
            per_page,
        };

        tracing::debug!(query, page, per_page, "Searching GitHub repositories");

        let SearchPage { total_count, items } = backend.fetch_page(&request).await?;

        if items.is_empty() {
            break;
        }

        let received = items.len();
        repositories.extend(
            items
                .iter()
                .skip(skip)
                .take(remaining)
                .map(RepositoryRecord::from_item),
        );

        if received < per_page {
            tracing::debug!(page, received, per_page, "Short page, upstream exhausted");
            break;
        }

        let fetched = (offset as u64).saturating_add(repositories.len() as u64);
        if fetched >= total_count {
            break;
        }

        page += 1;
        skip = 0;
    }

    Ok(repositories)
}
