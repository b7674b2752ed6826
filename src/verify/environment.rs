//! Environment and branch prerequisites.

use crate::config::Environment;
use crate::github::GithubClient;
use crate::verify::{CheckStatus, Verifier};

const TASK_ENVIRONMENT: &str = "Environment";
const TASK_BRANCH: &str = "Branch";

impl Verifier {
    /// Confirm credentials are configured and the API answers for the target
    /// repository. Failure is critical and halts the run.
    pub(crate) fn check_environment(&mut self) -> bool {
        let env = Environment::load();

        let Some(token) = env.token else {
            self.record(
                TASK_ENVIRONMENT,
                "GITHUB_TOKEN is not configured",
                CheckStatus::Critical,
            );
            return false;
        };
        let Some(org) = env.org else {
            self.record(
                TASK_ENVIRONMENT,
                "GITHUB_ORG is not configured",
                CheckStatus::Critical,
            );
            return false;
        };

        let client = match GithubClient::with_base_url(
            &self.api_base,
            &token,
            &org,
            &self.config.target_repo,
        ) {
            Ok(client) => client,
            Err(err) => {
                self.record(TASK_ENVIRONMENT, err.to_string(), CheckStatus::Critical);
                return false;
            }
        };
        self.client = Some(client);

        // Probe the repository endpoint itself.
        if self.fetch("").is_none() {
            self.record(
                TASK_ENVIRONMENT,
                "Cannot reach the GitHub API",
                CheckStatus::Critical,
            );
            return false;
        }

        self.record(
            TASK_ENVIRONMENT,
            format!(
                "Environment configured, API connection to {}/{} OK",
                org, self.config.target_repo
            ),
            CheckStatus::Success,
        );
        true
    }

    /// Confirm the feature branch exists. Failure is critical and halts.
    pub(crate) fn check_branch(&mut self) -> bool {
        let branch = self.config.branch.clone();
        if self.fetch(&format!("branches/{branch}")).is_some() {
            self.record(
                TASK_BRANCH,
                format!("Feature branch {branch} exists"),
                CheckStatus::Success,
            );
            true
        } else {
            self.record(
                TASK_BRANCH,
                format!("Feature branch {branch} does not exist"),
                CheckStatus::Critical,
            );
            false
        }
    }
}
