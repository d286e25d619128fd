// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Submodules:
// - client:   builds the authenticated HTTP client and API URLs
// - branches: lists all branches (page 1, then pages 2..N concurrently)
// - details:  fetches author/merge/protection info for each branch
// - types:    BranchRef, BranchDetail and the raw API payloads
// - error:    GitHubError and the per-page / per-branch failure records
//
// Data flows one way: list_branches -> fetch_details -> output file.
// =============================================================================

mod branches;
mod client;
mod details;
mod error;
mod types;

pub use branches::{list_branches, BranchListing, ListOptions, PER_PAGE};
pub use client::{build_client, RepoApi, DEFAULT_API_BASE};
pub use details::{fetch_details, DetailReport};
pub use types::BranchDetail;
