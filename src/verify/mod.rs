//! The sequential verification pipeline.
//!
//! Checks run in a fixed order and append to an ordered result log. In the
//! full profile a critical result aborts the remaining checks; the quick
//! profile only halts on broken prerequisites (environment, branch, missing
//! document). The summary is printed either way.

mod document;
mod environment;
mod issue;
mod outcome;
mod pr;

pub use issue::matches_issue;
pub use outcome::{CheckOutcome, CheckStatus, VerificationLog};

use colored::Colorize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{Profile, VerifyConfig};
use crate::github::GithubClient;
use crate::report;

/// Drives the checklist against one repository.
pub struct Verifier {
    config: VerifyConfig,
    profile: Profile,
    api_base: String,
    client: Option<GithubClient>,
    log: VerificationLog,
}

impl Verifier {
    pub fn new(config: VerifyConfig, profile: Profile) -> Self {
        Self {
            config,
            profile,
            api_base: crate::github::GITHUB_API_BASE.to_string(),
            client: None,
            log: VerificationLog::default(),
        }
    }

    /// Point the verifier at an alternate API base URL (used by tests).
    pub fn with_api_base(mut self, base_url: &str) -> Self {
        self.api_base = base_url.to_string();
        self
    }

    pub fn log(&self) -> &VerificationLog {
        &self.log
    }

    /// Run the pipeline and print the report. Returns overall success,
    /// i.e. whether no critical result was recorded.
    pub fn run(&mut self) -> bool {
        println!(
            "{}",
            "Starting GitHub label standardization verification...".bold()
        );
        println!("Target repository: {}", self.config.target_repo);
        println!("{}", "-".repeat(40));

        self.run_checks();
        report::render(&self.log)
    }

    fn run_checks(&mut self) {
        if !self.check_environment() {
            return;
        }
        if !self.check_branch() {
            return;
        }
        if !self.check_document() {
            return;
        }

        match self.profile {
            Profile::Quick => {
                // The quick profile records the issue verdict and stops.
                self.check_issue();
            }
            Profile::Full => {
                let Some(issue) = self.check_issue() else {
                    return;
                };
                let Some(pr) = self.check_pr(&issue) else {
                    return;
                };
                self.check_issue_labels(&issue);
                self.check_issue_comments(&issue, &pr);
                self.check_document_consistency();
                self.check_pr_core_labels(&pr);
            }
        }
    }

    /// Append a result and echo it as a status line.
    fn record(&mut self, task: &str, message: impl Into<String>, status: CheckStatus) {
        let message = message.into();
        println!("{} {task}: {message}", status.symbol());
        self.log.record(task, message, status);
    }

    /// GET an endpoint, downgrading every failure to `None`.
    ///
    /// The pipeline never sees error detail; the typed error is only emitted
    /// as a trace event.
    fn fetch(&self, endpoint: &str) -> Option<Value> {
        match self.client.as_ref()?.get(endpoint) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(endpoint, error = %err, "GitHub API request failed");
                None
            }
        }
    }

    /// GET an endpoint and deserialize into a typed view.
    fn fetch_as<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        let value = self.fetch(endpoint)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::debug!(endpoint, error = %err, "Unexpected response shape");
                None
            }
        }
    }
}
