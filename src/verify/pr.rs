//! Standardization pull request checks.

use crate::github::models::{Issue, PullRequest};
use crate::verify::{CheckStatus, Verifier};

const TASK_PR: &str = "Pull request";
const TASK_CORE_LABELS: &str = "Core labels";

impl Verifier {
    /// Locate the standardization PR and verify its issue reference,
    /// sections and label count. A missing PR is critical and halts.
    pub(crate) fn check_pr(&mut self, issue: &Issue) -> Option<PullRequest> {
        let Some(prs) = self.fetch_as::<Vec<PullRequest>>("pulls?state=all&per_page=50") else {
            self.record(
                TASK_PR,
                "Cannot fetch the pull request list",
                CheckStatus::Critical,
            );
            return None;
        };

        let found = prs.into_iter().find(|pr| {
            self.config
                .pr_title_keywords
                .iter()
                .any(|keyword| pr.title.contains(keyword))
        });

        let Some(pr) = found else {
            self.record(
                TASK_PR,
                "No standardization pull request found",
                CheckStatus::Critical,
            );
            return None;
        };

        let body = pr.body.clone().unwrap_or_default();

        if !body.contains(&format!("#{}", issue.number)) {
            self.record(
                TASK_PR,
                "Pull request does not reference the standardization issue",
                CheckStatus::Warning,
            );
        }

        let missing_sections: Vec<&str> = self
            .config
            .pr_required_sections
            .iter()
            .filter(|section| !body.contains(section.as_str()))
            .map(String::as_str)
            .collect();
        if !missing_sections.is_empty() {
            self.record(
                TASK_PR,
                format!(
                    "Pull request is missing sections: {}",
                    missing_sections.join(", ")
                ),
                CheckStatus::Warning,
            );
        }

        if pr.labels.len() < self.config.pr_min_label_count {
            self.record(
                TASK_PR,
                format!(
                    "Not enough pull request labels: at least {} required",
                    self.config.pr_min_label_count
                ),
                CheckStatus::Warning,
            );
        }

        self.record(
            TASK_PR,
            format!("Standardization PR #{} verified", pr.number),
            CheckStatus::Success,
        );
        Some(pr)
    }

    /// Confirm the PR carries every core label. Warning only.
    pub(crate) fn check_pr_core_labels(&mut self, pr: &PullRequest) {
        let actual = pr.label_names();
        let missing = self
            .config
            .core_labels
            .iter()
            .filter(|label| !actual.contains(label.as_str()))
            .count();

        if missing > 0 {
            self.record(
                TASK_CORE_LABELS,
                format!("Pull request is missing {missing} core labels"),
                CheckStatus::Warning,
            );
        } else {
            self.record(
                TASK_CORE_LABELS,
                "Pull request carries all core labels",
                CheckStatus::Success,
            );
        }
    }
}
