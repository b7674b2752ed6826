//! HTTP access to the GitHub REST API.
//!
//! A thin blocking client that issues authorized GETs below
//! `/repos/{org}/{repo}` and hands back parsed JSON. Callers in the
//! verification pipeline treat every failure as "resource absent"; the typed
//! error only survives long enough to be logged.

pub mod models;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Base URL for the GitHub REST API v3.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

pub(crate) const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Fixed total request timeout. Not configurable.
pub(crate) const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Failure modes of a single API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, timeout, or an unparseable response body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-200 status.
    #[error("HTTP {code}")]
    Status { code: u16 },
}

/// Blocking client scoped to one repository.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    base_url: String,
    org: String,
    repo: String,
}

impl GithubClient {
    /// Create a client against the public GitHub API.
    pub fn new(token: &str, org: &str, repo: &str) -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE, token, org, repo)
    }

    /// Create a client against an alternate base URL (used by tests).
    pub fn with_base_url(base_url: &str, token: &str, org: &str, repo: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {token}"))
            .context("GITHUB_TOKEN contains characters not valid in a header")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .user_agent("labelcheck")
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            org: org.to_string(),
            repo: repo.to_string(),
        })
    }

    /// GET an endpoint below the repository and parse the JSON body.
    ///
    /// An empty endpoint addresses the repository itself, which doubles as
    /// the connectivity probe.
    pub fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        let response = self.http.get(self.endpoint_url(endpoint)).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.is_empty() {
            format!("{}/repos/{}/{}", self.base_url, self.org, self.repo)
        } else {
            format!("{}/repos/{}/{}/{}", self.base_url, self.org, self.repo, endpoint)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_for_repo_root() {
        let client = GithubClient::with_base_url("https://example.test/", "t", "acme", "repo")
            .expect("client");
        assert_eq!(
            client.endpoint_url(""),
            "https://example.test/repos/acme/repo"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_query_string() {
        let client =
            GithubClient::with_base_url("https://example.test", "t", "acme", "repo").expect("client");
        assert_eq!(
            client.endpoint_url("contents/docs/labels.md?ref=main"),
            "https://example.test/repos/acme/repo/contents/docs/labels.md?ref=main"
        );
    }
}
