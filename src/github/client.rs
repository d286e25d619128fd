// src/github/client.rs
// =============================================================================
// This module builds the authenticated HTTP client and the API URLs.
//
// Key functionality:
// - build_client(): a reqwest Client that sends the token, the GitHub JSON
//   media type and a User-Agent on every request
// - RepoApi: the client plus "which repository" (base URL, org, repo), with
//   helpers that build endpoint URLs and GET + decode JSON
//
// No retries are configured. A timeout is only set when the user asks for one;
// otherwise a request can wait as long as the transport lets it.
//
// Rust concepts:
// - Builder pattern: Client::builder()...build()
// - Generics with trait bounds: get_json<T: DeserializeOwned>
// - Clone: a reqwest Client is a handle to a shared connection pool
// =============================================================================

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::GitHubError;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Media type for the v3 REST API.
const ACCEPT_VALUE: &str = "application/vnd.github.v3+json";

/// User-Agent header value; GitHub rejects requests without one.
const USER_AGENT_VALUE: &str = "branch-scout";

/// Builds an HTTP client carrying the credential and content-negotiation headers.
///
/// Fails only if the token cannot be placed in a header, or if reqwest
/// cannot initialise its TLS backend.
pub fn build_client(token: &str, timeout: Option<Duration>) -> Result<Client, GitHubError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| GitHubError::InvalidCredential)?;
    // Keeps the token out of reqwest's Debug output
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(GitHubError::Client)
}

/// A client bound to one repository.
///
/// Cloning is cheap and every clone shares the same connection pool, so the
/// concurrent tasks of one phase all read from the same RepoApi.
#[derive(Debug, Clone)]
pub struct RepoApi {
    client: Client,
    base: Url,
    org: String,
    repo: String,
}

impl RepoApi {
    pub fn new(
        client: Client,
        api_base: &str,
        org: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self, GitHubError> {
        let base = Url::parse(api_base).map_err(|source| GitHubError::Url {
            url: api_base.to_string(),
            source,
        })?;

        // Something like "mailto:x" parses but cannot take path segments
        if base.cannot_be_a_base() {
            return Err(GitHubError::Url {
                url: api_base.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        Ok(Self {
            client,
            base,
            org: org.into(),
            repo: repo.into(),
        })
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    // {base}/repos/{org}/{repo}/branches followed by `extra` segments.
    // Each segment is percent-encoded on its own.
    fn branches_endpoint<'a>(&self, extra: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.org.as_str(), self.repo.as_str(), "branches"])
                .extend(extra);
        }
        url
    }

    /// URL of one listing page.
    pub fn branches_page_url(&self, page: u32, per_page: u32) -> Url {
        let mut url = self.branches_endpoint(std::iter::empty());
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        url
    }

    /// URL of a single branch.
    ///
    /// Slashes in the branch name stay path separators ("feature/login" is
    /// two segments), which is how the GitHub API addresses such branches.
    pub fn branch_url(&self, branch_name: &str) -> Url {
        self.branches_endpoint(branch_name.split('/'))
    }

    /// GETs `url` and decodes the JSON body into `T`.
    ///
    /// Non-2xx statuses, transport failures and bodies that don't match `T`
    /// are all returned as errors; nothing is retried.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GitHubError> {
        let url_text = url.to_string();
        tracing::debug!(url = %url_text, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| GitHubError::Request {
                url: url_text.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status {
                url: url_text,
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| GitHubError::Request {
                url: url_text.clone(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| GitHubError::Decode {
            url: url_text,
            source,
        })
    }
}
