//! Label document checks: completeness and repository consistency.

use std::collections::HashSet;

use crate::config::Profile;
use crate::github::models::{Label, RepoContent};
use crate::labels::parse_label_table;
use crate::verify::{CheckStatus, Verifier};

const TASK_DOCUMENT: &str = "Document";
const TASK_CONSISTENCY: &str = "Consistency";

impl Verifier {
    /// Fetch and parse the label document.
    ///
    /// Missing or undecodable documents are critical in both profiles and
    /// halt the run. A label count below the configured minimum is critical
    /// in the full profile and a warning in the quick profile.
    pub(crate) fn check_document(&mut self) -> bool {
        let Some(text) = self.fetch_document() else {
            return false;
        };

        if self.profile == Profile::Full && !text.contains(&self.config.table_header) {
            self.record(
                TASK_DOCUMENT,
                "Document is missing the standard table header",
                CheckStatus::Critical,
            );
            return false;
        }

        let rows = parse_label_table(&text, self.config.parse_mode, &self.config.table_header);
        if rows.len() < self.config.min_label_count {
            let message = format!(
                "Not enough labels: at least {} required, found {}",
                self.config.min_label_count,
                rows.len()
            );
            return match self.profile {
                Profile::Full => {
                    self.record(TASK_DOCUMENT, message, CheckStatus::Critical);
                    false
                }
                Profile::Quick => {
                    self.record(TASK_DOCUMENT, message, CheckStatus::Warning);
                    true
                }
            };
        }

        self.record(
            TASK_DOCUMENT,
            format!("Label document complete with {} labels", rows.len()),
            CheckStatus::Success,
        );
        true
    }

    /// Compare the labels named in the document with the repository's actual
    /// label set. Warnings only; runs near the end of the full profile.
    pub(crate) fn check_document_consistency(&mut self) {
        let Some(text) = self.fetch_document_for(TASK_CONSISTENCY) else {
            return;
        };

        let documented: HashSet<String> =
            parse_label_table(&text, self.config.parse_mode, &self.config.table_header)
                .into_iter()
                .map(|row| row.name)
                .collect();

        let Some(repo_labels) = self.fetch_as::<Vec<Label>>("labels?per_page=100") else {
            self.record(
                TASK_CONSISTENCY,
                "Cannot fetch repository labels",
                CheckStatus::Critical,
            );
            return;
        };
        let actual: HashSet<String> = repo_labels.into_iter().map(|label| label.name).collect();

        let missing_in_doc = actual.difference(&documented).count();
        let extra_in_doc = documented.difference(&actual).count();

        if missing_in_doc > 0 {
            self.record(
                TASK_CONSISTENCY,
                format!("Document is missing {missing_in_doc} repository labels"),
                CheckStatus::Warning,
            );
        }
        if extra_in_doc > 0 {
            self.record(
                TASK_CONSISTENCY,
                format!("Document lists {extra_in_doc} labels not present in the repository"),
                CheckStatus::Warning,
            );
        }
        if missing_in_doc == 0 && extra_in_doc == 0 {
            self.record(
                TASK_CONSISTENCY,
                "Document matches the repository labels exactly",
                CheckStatus::Success,
            );
        }
    }

    fn fetch_document(&mut self) -> Option<String> {
        self.fetch_document_for(TASK_DOCUMENT)
    }

    /// Fetch and decode the document, recording a critical result under the
    /// given task name on failure.
    fn fetch_document_for(&mut self, task: &str) -> Option<String> {
        let endpoint = format!(
            "contents/{}?ref={}",
            self.config.doc_file, self.config.branch
        );

        let Some(raw) = self.fetch(&endpoint) else {
            self.record(
                task,
                format!("Label document {} not found", self.config.doc_file),
                CheckStatus::Critical,
            );
            return None;
        };

        let content: RepoContent = match serde_json::from_value(raw) {
            Ok(content) => content,
            Err(_) => {
                self.record(
                    task,
                    "Failed to decode document content",
                    CheckStatus::Critical,
                );
                return None;
            }
        };

        match content.decode() {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!(error = %err, "Document decode failed");
                self.record(
                    task,
                    "Failed to decode document content",
                    CheckStatus::Critical,
                );
                None
            }
        }
    }
}
