//! Standardization issue checks: discovery, label coverage, comment
//! traceability.

use std::collections::HashSet;

use crate::config::{Profile, VerifyConfig};
use crate::github::models::{Comment, Issue, PullRequest};
use crate::verify::{CheckStatus, Verifier};

const TASK_ISSUE: &str = "Issue";
const TASK_LABEL_COVERAGE: &str = "Label coverage";
const TASK_COMMENTS: &str = "Comments";

/// Decide whether an issue is the standardization issue.
///
/// The full profile matches the title keywords verbatim; the quick profile
/// lowercases the title and also searches the body keywords.
pub fn matches_issue(config: &VerifyConfig, profile: Profile, issue: &Issue) -> bool {
    match profile {
        Profile::Full => config
            .issue_title_keywords
            .iter()
            .any(|keyword| issue.title.contains(keyword)),
        Profile::Quick => {
            let title = issue.title.to_lowercase();
            let body = issue.body.clone().unwrap_or_default().to_lowercase();
            config
                .issue_title_keywords
                .iter()
                .any(|keyword| title.contains(keyword))
                || config
                    .issue_body_keywords
                    .iter()
                    .any(|keyword| body.contains(keyword))
        }
    }
}

impl Verifier {
    /// Locate the standardization issue and, in the full profile, verify its
    /// body keywords, sections and labels.
    ///
    /// Returning `None` halts the full profile; the quick profile records the
    /// verdict and continues regardless.
    pub(crate) fn check_issue(&mut self) -> Option<Issue> {
        let endpoint = format!(
            "issues?state=all&per_page={}",
            self.config.issues_page_size
        );
        let Some(issues) = self.fetch_as::<Vec<Issue>>(&endpoint) else {
            self.record(TASK_ISSUE, "Cannot fetch the issue list", CheckStatus::Critical);
            return None;
        };

        let found = issues
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .find(|issue| matches_issue(&self.config, self.profile, issue));

        let Some(issue) = found else {
            let status = match self.profile {
                Profile::Full => CheckStatus::Critical,
                Profile::Quick => CheckStatus::Warning,
            };
            self.record(TASK_ISSUE, "No standardization issue found", status);
            return None;
        };

        if self.profile == Profile::Full {
            let body = issue.body.clone().unwrap_or_default();

            let missing_keywords = missing_from(&self.config.issue_body_keywords, &body);
            if !missing_keywords.is_empty() {
                self.record(
                    TASK_ISSUE,
                    format!("Issue body is missing keywords: {}", missing_keywords.join(", ")),
                    CheckStatus::Warning,
                );
            }

            let missing_sections = missing_from(&self.config.issue_required_sections, &body);
            if !missing_sections.is_empty() {
                self.record(
                    TASK_ISSUE,
                    format!("Issue is missing sections: {}", missing_sections.join(", ")),
                    CheckStatus::Warning,
                );
            }

            let labels = issue.label_names();
            let missing_labels: Vec<&String> = self
                .config
                .issue_required_labels
                .iter()
                .filter(|label| !labels.contains(label.as_str()))
                .collect();
            if !missing_labels.is_empty() {
                let names: Vec<&str> = missing_labels.iter().map(|s| s.as_str()).collect();
                self.record(
                    TASK_ISSUE,
                    format!("Issue is missing labels: {}", names.join(", ")),
                    CheckStatus::Warning,
                );
            }
        }

        self.record(
            TASK_ISSUE,
            format!(
                "Standardization issue #{} verified: {}",
                issue.number, issue.title
            ),
            CheckStatus::Success,
        );
        Some(issue)
    }

    /// Compare the issue's labels with the full expected set. Warning only.
    pub(crate) fn check_issue_labels(&mut self, issue: &Issue) {
        let expected: HashSet<&str> = self
            .config
            .expected_labels
            .iter()
            .map(String::as_str)
            .collect();
        let actual = issue.label_names();
        let missing = expected
            .iter()
            .filter(|name| !actual.contains(**name))
            .count();

        if missing > 0 {
            self.record(
                TASK_LABEL_COVERAGE,
                format!("Issue is missing {missing} expected labels"),
                CheckStatus::Warning,
            );
        } else {
            self.record(
                TASK_LABEL_COVERAGE,
                "Issue carries all expected labels",
                CheckStatus::Success,
            );
        }
    }

    /// Look for a PR reference and a completion keyword in the issue
    /// comments. Warnings only.
    pub(crate) fn check_issue_comments(&mut self, issue: &Issue, pr: &PullRequest) {
        let endpoint = format!("issues/{}/comments", issue.number);
        let Some(comments) = self.fetch_as::<Vec<Comment>>(&endpoint) else {
            self.record(
                TASK_COMMENTS,
                "Cannot fetch issue comments",
                CheckStatus::Warning,
            );
            return;
        };

        let short_ref = format!("#{}", pr.number);
        let long_ref = format!("pull/{}", pr.number);
        let mut pr_reference_found = false;
        let mut completion_found = false;

        for comment in &comments {
            if comment.body.contains(&short_ref) || comment.body.contains(&long_ref) {
                pr_reference_found = true;
            }
            let lowered = comment.body.to_lowercase();
            if self
                .config
                .completion_keywords
                .iter()
                .any(|keyword| lowered.contains(keyword))
            {
                completion_found = true;
            }
        }

        if !pr_reference_found {
            self.record(
                TASK_COMMENTS,
                "No comment references the pull request",
                CheckStatus::Warning,
            );
        }
        if !completion_found {
            self.record(
                TASK_COMMENTS,
                "No comment contains a completion keyword",
                CheckStatus::Warning,
            );
        }
        if pr_reference_found && completion_found {
            self.record(
                TASK_COMMENTS,
                "Comment traceability verified",
                CheckStatus::Success,
            );
        }
    }
}

/// Needles from `candidates` that do not occur in `haystack`.
fn missing_from<'a>(candidates: &'a [String], haystack: &str) -> Vec<&'a str> {
    candidates
        .iter()
        .filter(|candidate| !haystack.contains(candidate.as_str()))
        .map(String::as_str)
        .collect()
}
