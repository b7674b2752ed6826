//! The append-only verification log.

use chrono::{DateTime, Utc};

/// Severity of one recorded result.
///
/// `Critical` forces a non-zero exit and, in the full profile, aborts the
/// remaining checks. `Warning` and `Info` never affect the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Success,
    Warning,
    Critical,
    Info,
}

impl CheckStatus {
    /// Status symbol used on stdout.
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Success => "✅",
            CheckStatus::Warning => "⚠️",
            CheckStatus::Critical => "❌",
            CheckStatus::Info => "ℹ️",
        }
    }
}

/// One recorded result. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub task: String,
    pub message: String,
    pub status: CheckStatus,
    pub recorded_at: DateTime<Utc>,
}

/// Ordered log of results, appended in check execution order.
#[derive(Debug, Default)]
pub struct VerificationLog {
    outcomes: Vec<CheckOutcome>,
    has_critical: bool,
}

impl VerificationLog {
    pub fn record(&mut self, task: &str, message: impl Into<String>, status: CheckStatus) {
        if status == CheckStatus::Critical {
            self.has_critical = true;
        }
        self.outcomes.push(CheckOutcome {
            task: task.to_string(),
            message: message.into(),
            status,
            recorded_at: Utc::now(),
        });
    }

    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn has_critical(&self) -> bool {
        self.has_critical
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == status)
            .count()
    }
}
