// src/github/error.rs
// =============================================================================
// Error types for talking to the GitHub API.
//
// Every failure that can happen while fetching a page or a branch ends up as
// one GitHubError. Whether that error is fatal is decided by the caller:
// - page 1 of the listing: fatal, returned as Err
// - pages 2..N: recorded as a PageFailure and skipped
// - branch details: recorded as a DetailFailure and skipped
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("access token contains characters that are not allowed in an HTTP header")]
    InvalidCredential,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid API URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A listing page (2..N) that could not be fetched.
#[derive(Debug)]
pub struct PageFailure {
    pub page: u32,
    pub error: GitHubError,
}

/// A branch whose details could not be fetched.
#[derive(Debug)]
pub struct DetailFailure {
    pub branch_name: String,
    pub error: GitHubError,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[derive(Error)] do?
//    - thiserror generates the std::error::Error impl for us
//    - #[error("...")] becomes the Display text
//    - #[source] marks the underlying error so `{:#}` in anyhow can show it
//
// 2. Why not just anyhow::Error here?
//    - Callers (and tests) can match on the variant, e.g. tell an HTTP 404
//      apart from a body that failed to decode
//    - main.rs still wraps everything in anyhow when it reports
// -----------------------------------------------------------------------------
