// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (and env vars) into a Config
// 2. List every branch of the repository
// 3. Fetch details for each listed branch, printing progress as we go
// 4. Write the enriched branches to the output file
// 5. Exit with proper code (0 = report written, 1 = fatal error, 2 = bad usage)
//
// A run that dropped some pages or branches still exits 0; the summary
// says how many were dropped, and each one was logged as a warning.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;     // src/cli.rs - command-line parsing
mod config;  // src/config.rs - run configuration
mod github;  // src/github/ - GitHub API access
mod output;  // src/output.rs - JSON report writer

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Config;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Parse before anything else so --help and usage errors behave normally
    let config = Config::from(Cli::parse());

    init_tracing();

    let exit_code = match run(&config).await {
        Ok(_) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("❌ Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr, progress goes to stdout.
// RUST_LOG overrides the default level (e.g. RUST_LOG=branch_scout=debug).
fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Counts reported at the end of a run
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    branches_found: usize,
    details_written: usize,
    pages_dropped: usize,
    details_dropped: usize,
    truncated: bool,
}

// Runs the whole pipeline: list -> details -> write
async fn run(config: &Config) -> Result<Summary> {
    tracing::debug!(?config, "starting");

    let client = github::build_client(&config.token, config.timeout)
        .context("could not create GitHub client")?;
    let api = github::RepoApi::new(client, &config.api_base, &config.org, &config.repo)?;

    println!("🔍 Fetching branches of {}/{}...", api.org(), api.repo());

    // Page 1 failing is the only listing error that ends the run
    let listing = github::list_branches(&api, config.list)
        .await
        .with_context(|| format!("could not list branches of {}/{}", config.org, config.repo))?;

    println!(
        "🌿 Found {} branches on {} page(s)",
        listing.branches.len(),
        listing.pages_fetched
    );

    let report = github::fetch_details(
        &api,
        &listing.branches,
        config.detail_workers,
        print_progress,
    )
    .await;

    println!("📋 Processed {} branch details", report.details.len());

    output::write_report(&config.output, &report.details)?;
    println!("💾 Wrote {}", config.output.display());

    let summary = summarize(&listing, &report);
    print_summary(&summary, config, &listing, &report);
    Ok(summary)
}

// Overwrites the same console line until the last branch is done
fn print_progress(done: usize, total: usize) {
    print!("\r   Fetching branch details: {}/{}", done, total);
    if done == total {
        println!();
    }
    let _ = std::io::stdout().flush();
}

fn summarize(listing: &github::BranchListing, report: &github::DetailReport) -> Summary {
    Summary {
        branches_found: listing.branches.len(),
        details_written: report.details.len(),
        pages_dropped: listing.failures.len(),
        details_dropped: report.failures.len(),
        truncated: listing.truncated,
    }
}

fn print_summary(
    summary: &Summary,
    config: &Config,
    listing: &github::BranchListing,
    report: &github::DetailReport,
) {
    println!();
    println!("📊 Summary:");
    println!("   🌿 Branches found: {}", summary.branches_found);
    println!("   ✅ Details written: {}", summary.details_written);

    if summary.pages_dropped > 0 {
        println!("   ❌ Pages dropped: {}", summary.pages_dropped);
        for failure in &listing.failures {
            println!("      page {}: {}", failure.page, failure.error);
        }
    }

    if summary.details_dropped > 0 {
        println!("   ❌ Branches dropped: {}", summary.details_dropped);
        for failure in &report.failures {
            println!("      {}: {}", failure.branch_name, failure.error);
        }
    }

    if summary.truncated {
        println!(
            "   ⚠️  Stopped at page {} ({} branches per page); the repository may have more branches",
            config.list.max_pages,
            github::PER_PAGE
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer, output: std::path::PathBuf) -> Config {
        Config {
            org: "acme".to_string(),
            repo: "widgets".to_string(),
            token: "t0ken".to_string(),
            output,
            api_base: server.uri(),
            list: github::ListOptions::default(),
            detail_workers: 4,
            timeout: Some(Duration::from_secs(5)),
        }
    }

    async fn mount_listing(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/branches"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "main", "commit": { "sha": "a1" } },
                { "name": "dev", "commit": { "sha": "b2" } }
            ])))
            .mount(server)
            .await;
    }

    async fn mount_detail(server: &MockServer, name: &str, login: &str, message: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/acme/widgets/branches/{}", name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": name,
                "commit": {
                    "author": { "login": login },
                    "commit": {
                        "author": { "date": "2024-05-06T07:08:09Z" },
                        "message": message
                    }
                },
                "protected": (name == "main")
            })))
            .mount(server)
            .await;
    }

    fn read_output(path: &std::path::Path) -> Vec<Value> {
        let text = std::fs::read_to_string(path).unwrap();
        let mut items: Vec<Value> = serde_json::from_str(&text).unwrap();
        items.sort_by(|a, b| {
            a["branch_name"]
                .as_str()
                .unwrap()
                .cmp(b["branch_name"].as_str().unwrap())
        });
        items
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        mount_detail(&server, "main", "alice", "Merge pull request #3 from acme/dev").await;
        mount_detail(&server, "dev", "bob", "Add widget sizes").await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("branches.json");
        let summary = run(&test_config(&server, out.clone())).await.unwrap();

        assert_eq!(
            summary,
            Summary {
                branches_found: 2,
                details_written: 2,
                pages_dropped: 0,
                details_dropped: 0,
                truncated: false,
            }
        );

        let items = read_output(&out);
        assert_eq!(
            items,
            vec![
                json!({
                    "branch_name": "dev",
                    "commit_sha": "b2",
                    "author": "bob",
                    "last_updated": "2024-05-06T07:08:09Z",
                    "is_merged": false,
                    "is_protected": false
                }),
                json!({
                    "branch_name": "main",
                    "commit_sha": "a1",
                    "author": "alice",
                    "last_updated": "2024-05-06T07:08:09Z",
                    "is_merged": true,
                    "is_protected": true
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_detail_is_dropped() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        mount_detail(&server, "main", "alice", "Merge pull request #3 from acme/dev").await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/branches/dev"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("branches.json");
        let summary = run(&test_config(&server, out.clone())).await.unwrap();

        assert_eq!(summary.branches_found, 2);
        assert_eq!(summary.details_written, 1);
        assert_eq!(summary.details_dropped, 1);

        let items = read_output(&out);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["branch_name"], "main");
    }

    #[tokio::test]
    async fn test_same_responses_same_branch_set() {
        let server = MockServer::start().await;
        mount_listing(&server).await;
        mount_detail(&server, "main", "alice", "Merge x").await;
        mount_detail(&server, "dev", "bob", "y").await;

        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        run(&test_config(&server, first.clone())).await.unwrap();
        run(&test_config(&server, second.clone())).await.unwrap();

        assert_eq!(read_output(&first), read_output(&second));
    }

    #[tokio::test]
    async fn test_first_page_failure_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/branches"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("branches.json");
        let err = run(&test_config(&server, out.clone())).await.unwrap_err();

        assert!(format!("{:#}", err).contains("could not list branches of acme/widgets"));
        assert!(!out.exists());
    }
}
