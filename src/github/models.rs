//! Read-only views of the GitHub API entities the checks consume.
//!
//! Only the fields the pipeline looks at are deserialized; everything else in
//! the API payloads is ignored. Nothing here is cached or written back.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use std::collections::HashSet;

/// A repository label.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// An issue from `GET /issues`. Pull requests appear in the same listing and
/// are distinguished by the embedded `pull_request` key.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn label_names(&self) -> HashSet<String> {
        label_name_set(&self.labels)
    }
}

/// A pull request from `GET /pulls`.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl PullRequest {
    pub fn label_names(&self) -> HashSet<String> {
        label_name_set(&self.labels)
    }
}

/// An issue comment.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub body: String,
}

/// A file fetched through the contents API. The body arrives base64-encoded
/// with embedded newlines.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoContent {
    pub content: String,
}

impl RepoContent {
    /// Decode the base64 body to UTF-8 text.
    pub fn decode(&self) -> Result<String> {
        let compact: String = self.content.split_whitespace().collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .context("Document content is not valid base64")?;
        String::from_utf8(bytes).context("Document content is not valid UTF-8")
    }
}

fn label_name_set(labels: &[Label]) -> HashSet<String> {
    labels.iter().map(|label| label.name.clone()).collect()
}
