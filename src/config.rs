// src/config.rs
// =============================================================================
// The run configuration.
//
// Built once in main() from the parsed command line and then passed by
// reference to everything that needs it. There is no global state.
// =============================================================================

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::github::ListOptions;

/// Upper bound for the default detail worker count.
const MAX_DEFAULT_DETAIL_WORKERS: usize = 32;

#[derive(Clone)]
pub struct Config {
    pub org: String,
    pub repo: String,
    pub token: String,
    pub output: PathBuf,
    pub api_base: String,
    pub list: ListOptions,
    pub detail_workers: usize,
    pub timeout: Option<Duration>,
}

// Keep the token out of logs and panic messages
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("org", &self.org)
            .field("repo", &self.repo)
            .field("token", &"[REDACTED]")
            .field("output", &self.output)
            .field("api_base", &self.api_base)
            .field("list", &self.list)
            .field("detail_workers", &self.detail_workers)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            org: cli.org,
            repo: cli.repo,
            token: cli.token,
            output: cli.output,
            api_base: cli.api_base,
            list: ListOptions {
                page_workers: cli.page_workers,
                max_pages: cli.max_pages,
            },
            detail_workers: cli.detail_workers.unwrap_or_else(default_detail_workers),
            timeout: cli.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Detail worker count when none is given: available parallelism + 4,
/// capped at 32. Requests mostly wait on the network, so this runs more
/// workers than there are cores.
pub fn default_detail_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_add(4)
        .min(MAX_DEFAULT_DETAIL_WORKERS)
}
