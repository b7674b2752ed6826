//! Summary reporting for a verification run.

use colored::Colorize;

use crate::verify::{CheckStatus, VerificationLog};

const RULE_WIDTH: usize = 60;

/// Print the summary block and return the overall verdict.
///
/// The process succeeds exactly when no critical result was recorded;
/// warnings never affect the outcome.
pub fn render(log: &VerificationLog) -> bool {
    let success = log.count(CheckStatus::Success);
    let warnings = log.count(CheckStatus::Warning);
    let critical = log.count(CheckStatus::Critical);

    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "{}",
        "GitHub label standardization verification report"
            .bold()
            .blue()
    );
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Total checks: {}", log.outcomes().len());
    println!("Success: {success} | Warnings: {warnings} | Critical: {critical}");
    println!("{}", "-".repeat(RULE_WIDTH));

    for outcome in log.outcomes() {
        println!(
            "{} {}: {}",
            outcome.status.symbol(),
            outcome.task,
            outcome.message
        );
    }

    println!("{}", "=".repeat(RULE_WIDTH));

    if log.has_critical() {
        println!(
            "{}",
            "Verification failed: critical errors present".red().bold()
        );
        false
    } else if warnings > 0 {
        println!(
            "{}",
            "Verification completed with warnings".yellow().bold()
        );
        true
    } else {
        println!("{}", "All checks passed!".green().bold());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_do_not_fail_the_run() {
        let mut log = VerificationLog::default();
        log.record("a", "ok", CheckStatus::Success);
        log.record("b", "meh", CheckStatus::Warning);
        assert!(render(&log));
    }

    #[test]
    fn test_any_critical_fails_the_run() {
        let mut log = VerificationLog::default();
        log.record("a", "ok", CheckStatus::Success);
        log.record("b", "boom", CheckStatus::Critical);
        assert!(!render(&log));
    }

    #[test]
    fn test_empty_log_passes() {
        assert!(render(&VerificationLog::default()));
    }
}
