// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every input can come from a flag or an environment variable:
//   branch-scout --org acme --repo widgets --token ghp_xxx
//   GITHUB_TOKEN=ghp_xxx branch-scout --org acme --repo widgets
//
// org, repo and token have no defaults. If one is missing, clap prints a
// usage error and exits with code 2 before any request is made.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - Option<T>: flags that may be absent
// - Value parsers: reject zero worker counts while parsing
// =============================================================================

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::github::DEFAULT_API_BASE;

#[derive(Parser, Debug)]
#[command(
    name = "branch-scout",
    version,
    about = "Collect every branch of a GitHub repository with author, merge and protection info",
    long_about = "branch-scout lists the branches of a GitHub repository, fetches the head commit \
                  of each one and writes branch name, sha, author, last update, merge status and \
                  protection status to a JSON file."
)]
pub struct Cli {
    /// Organization or user that owns the repository
    #[arg(long, env = "GITHUB_ORG")]
    pub org: String,

    /// Repository name
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: String,

    /// Personal access token sent as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// File to write the JSON report to (overwritten if it exists)
    #[arg(short, long, default_value = "branches.json")]
    pub output: PathBuf,

    /// API base URL (change for GitHub Enterprise, e.g. https://ghe.example.com/api/v3)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Concurrent page requests while listing branches
    #[arg(long, default_value_t = 5, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub page_workers: usize,

    /// Highest listing page to request (100 branches per page)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: u32,

    /// Concurrent branch detail requests [default: CPU count + 4, at most 32]
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub detail_workers: Option<usize>,

    /// Per-request timeout in seconds (no timeout when omitted)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}
