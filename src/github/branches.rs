// src/github/branches.rs
// =============================================================================
// This module lists the branches of a repository.
//
// How it works:
// 1. Fetch page 1 (100 branches per page). If this fails, the whole listing
//    fails - there is nothing useful to continue with.
// 2. If page 1 was full, fetch pages 2..=max_pages concurrently (5 at a time
//    by default). Results are merged as each page arrives, not in page order.
// 3. A page that fails is logged and recorded; its branches are missing from
//    the result but the other pages are still merged.
//
// The page cap (10 by default = 1,000 branches) is a safety limit, not an
// end-of-pagination check. When the last allowed page is still full, the
// listing is marked as truncated so the caller can warn about it.
//
// Rust concepts:
// - Streams: stream::iter turns a range into a stream of futures
// - buffer_unordered: runs N futures at once, yields results as they finish
// - while let: consume the stream until it is exhausted
// =============================================================================

use futures::stream::{self, StreamExt};

use super::client::RepoApi;
use super::error::{GitHubError, PageFailure};
use super::types::{BranchListItem, BranchRef};

/// Branches requested per page; also the "page is full" threshold.
pub const PER_PAGE: u32 = 100;

/// How the listing phase is bounded.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    /// Concurrent page requests after page 1
    pub page_workers: usize,
    /// Highest page number that will be requested
    pub max_pages: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_workers: 5,
            max_pages: 10,
        }
    }
}

/// Everything the listing phase produced.
#[derive(Debug, Default)]
pub struct BranchListing {
    /// Branches in arrival order; order within a page is kept
    pub branches: Vec<BranchRef>,
    /// Pages after the first that could not be fetched
    pub failures: Vec<PageFailure>,
    /// Pages that returned a successful response (empty ones included)
    pub pages_fetched: u32,
    /// The last allowed page was full, so more branches probably exist
    pub truncated: bool,
}

/// Lists the branches of `api`'s repository.
///
/// Only a failure on page 1 is returned as `Err`.
pub async fn list_branches(
    api: &RepoApi,
    options: ListOptions,
) -> Result<BranchListing, GitHubError> {
    let first = fetch_page(api, 1).await?;
    let first_is_full = first.len() == PER_PAGE as usize;

    let mut listing = BranchListing {
        branches: first.into_iter().map(BranchRef::from).collect(),
        pages_fetched: 1,
        ..Default::default()
    };

    if !first_is_full {
        return Ok(listing);
    }

    if options.max_pages < 2 {
        listing.truncated = true;
        return Ok(listing);
    }

    tracing::debug!(
        max_pages = options.max_pages,
        workers = options.page_workers,
        "first page is full, fetching the rest"
    );

    let mut pages = stream::iter(2..=options.max_pages)
        .map(|page| async move { (page, fetch_page(api, page).await) })
        .buffer_unordered(options.page_workers.max(1));

    // An empty page only means "nothing to add"; pages already in
    // flight are still merged.
    while let Some((page, result)) = pages.next().await {
        match result {
            Ok(items) => {
                listing.pages_fetched += 1;
                if items.is_empty() {
                    tracing::debug!(page, "empty page");
                    continue;
                }
                if page == options.max_pages && items.len() == PER_PAGE as usize {
                    listing.truncated = true;
                }
                listing
                    .branches
                    .extend(items.into_iter().map(BranchRef::from));
            }
            Err(error) => {
                tracing::warn!(page, %error, "failed to fetch branch page");
                listing.failures.push(PageFailure { page, error });
            }
        }
    }

    Ok(listing)
}

async fn fetch_page(api: &RepoApi, page: u32) -> Result<Vec<BranchListItem>, GitHubError> {
    api.get_json(api.branches_page_url(page, PER_PAGE)).await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does buffer_unordered(5) do here?
//    - stream::iter(2..=10) yields page numbers
//    - .map(...) turns each page number into a future (not started yet)
//    - buffer_unordered(5) keeps up to 5 of those futures running
//    - Results come out in the order they finish, so page 7 can arrive
//      before page 2
//
// 2. Why does the async block return (page, result)?
//    - Results arrive out of order, so each one carries its page number
//    - That is how a failure can say which page it was
//
// 3. What is `..Default::default()`?
//    - Struct update syntax: fill the remaining fields from Default
//    - BranchListing derives Default, so failures is an empty Vec,
//      truncated is false
// -----------------------------------------------------------------------------
