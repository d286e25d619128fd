// src/github/details.rs
// =============================================================================
// This module fetches the details of every listed branch.
//
// For each BranchRef we GET /repos/{org}/{repo}/branches/{name} and derive:
// - author:       commit.author.login
// - last_updated: commit.commit.author.date (passed through as-is)
// - is_merged:    commit message starts with "Merge"
// - is_protected: the "protected" flag
//
// All requests go through one buffer_unordered stream, so at most `workers`
// requests are in flight. Each request produces its own Result; the loop
// below sorts them into details and failures. One bad branch never stops
// the others.
// =============================================================================

use futures::stream::{self, StreamExt};

use super::client::RepoApi;
use super::error::{DetailFailure, GitHubError};
use super::types::{BranchDetail, BranchPayload, BranchRef};

/// Everything the detail phase produced.
#[derive(Debug, Default)]
pub struct DetailReport {
    /// Successfully enriched branches, in completion order
    pub details: Vec<BranchDetail>,
    /// Branches that were dropped, with the reason
    pub failures: Vec<DetailFailure>,
}

/// Fetches details for every branch in `branches`.
///
/// `on_progress(done, total)` is called after each branch finishes,
/// successfully or not; `done` only ever grows.
pub async fn fetch_details<F>(
    api: &RepoApi,
    branches: &[BranchRef],
    workers: usize,
    mut on_progress: F,
) -> DetailReport
where
    F: FnMut(usize, usize),
{
    let total = branches.len();
    let mut report = DetailReport::default();
    let mut done = 0;

    let mut tasks = stream::iter(branches)
        .map(|branch| async move { (branch, fetch_one(api, branch).await) })
        .buffer_unordered(workers.max(1));

    while let Some((branch, result)) = tasks.next().await {
        match result {
            Ok(detail) => report.details.push(detail),
            Err(error) => {
                tracing::warn!(
                    branch = %branch.branch_name,
                    %error,
                    "failed to fetch branch details"
                );
                report.failures.push(DetailFailure {
                    branch_name: branch.branch_name.clone(),
                    error,
                });
            }
        }

        done += 1;
        on_progress(done, total);
    }

    report
}

async fn fetch_one(api: &RepoApi, branch: &BranchRef) -> Result<BranchDetail, GitHubError> {
    let payload: BranchPayload = api.get_json(api.branch_url(&branch.branch_name)).await?;
    Ok(BranchDetail::from_payload(branch, payload))
}
