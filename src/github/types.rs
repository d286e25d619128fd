// src/github/types.rs
// =============================================================================
// Data types shared by the branch lister and the detail fetcher.
//
// Two kinds of types live here:
// - Our own records (BranchRef, BranchDetail) that flow through the pipeline
//   and end up in the output file
// - Raw payload types that mirror the parts of the GitHub API responses we
//   actually read; serde ignores every other field
//
// Rust concepts:
// - Nested structs: serde maps nested JSON objects onto nested structs
// - Missing fields: a required field that is absent makes decoding fail,
//   which is how malformed responses turn into errors
// =============================================================================

use serde::{Deserialize, Serialize};

/// A branch as seen in the listing: its name and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    pub branch_name: String,
    pub commit_sha: String,
}

/// A branch enriched with author, timestamp, merge and protection info.
///
/// This is exactly one element of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDetail {
    pub branch_name: String,
    pub commit_sha: String,
    /// Login of the commit author's GitHub account
    pub author: String,
    /// Author date of the head commit, ISO-8601, copied verbatim from the API
    pub last_updated: String,
    pub is_merged: bool,
    pub is_protected: bool,
}

impl BranchDetail {
    // Combines the listing entry with the detail payload.
    // Name and sha always come from the BranchRef so every detail
    // maps back to exactly one listed branch.
    pub(crate) fn from_payload(branch: &BranchRef, payload: BranchPayload) -> Self {
        let commit = payload.commit;
        BranchDetail {
            branch_name: branch.branch_name.clone(),
            commit_sha: branch.commit_sha.clone(),
            author: commit.author.login,
            last_updated: commit.commit.author.date,
            is_merged: is_merge_message(&commit.commit.message),
            is_protected: payload.protected,
        }
    }
}

/// Returns true when a commit message looks like a merge commit.
///
/// This is a plain, case-sensitive prefix check: "Merge pull request #1"
/// counts, "merge foo" does not.
pub fn is_merge_message(message: &str) -> bool {
    message.starts_with("Merge")
}

// -----------------------------------------------------------------------------
// Raw API payloads
// -----------------------------------------------------------------------------

// One element of GET /repos/{org}/{repo}/branches
#[derive(Debug, Deserialize)]
pub(crate) struct BranchListItem {
    pub name: String,
    pub commit: CommitSha,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitSha {
    pub sha: String,
}

impl From<BranchListItem> for BranchRef {
    fn from(item: BranchListItem) -> Self {
        BranchRef {
            branch_name: item.name,
            commit_sha: item.commit.sha,
        }
    }
}

// GET /repos/{org}/{repo}/branches/{branch}
#[derive(Debug, Deserialize)]
pub(crate) struct BranchPayload {
    pub commit: BranchCommit,
    pub protected: bool,
}

// The outer "commit" object: GitHub account info plus the git commit itself
#[derive(Debug, Deserialize)]
pub(crate) struct BranchCommit {
    pub author: Account,
    pub commit: GitCommit,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Account {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitCommit {
    pub author: GitSignature,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitSignature {
    pub date: String,
}
