//! Preflight checks.
//!
//! Run after the configuration is validated and before the incoming
//! directory is scanned. Any failed check stops the run with nothing moved.

mod paths;
mod tmdb;

use crate::models::config::RunConfig;
use crate::services::tmdb::TmdbClient;
use crate::Result;
use colored::Colorize;

/// What a single check found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed(String),
    Failed { reason: String, hint: &'static str },
}

/// Result of one named check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    pub fn passed(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Passed(detail.into()),
        }
    }

    pub fn failed(name: &'static str, reason: impl Into<String>, hint: &'static str) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Failed {
                reason: reason.into(),
                hint,
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Passed(_))
    }

    fn print(&self) {
        match &self.outcome {
            CheckOutcome::Passed(detail) => {
                println!("{} {}: {}", "[OK]".green(), self.name.bold(), detail);
            }
            CheckOutcome::Failed { reason, hint } => {
                println!("{} {}: {}", "[FAIL]".red(), self.name.bold(), reason);
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// All checks of one run, in the order they ran.
#[derive(Debug, Default)]
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckResult::is_ok)
    }

    pub fn print(&self) {
        for check in &self.checks {
            check.print();
        }
    }

    /// `Err(PreflightFailed)` when any check failed.
    pub fn into_result(self) -> Result<()> {
        if self.passed() {
            Ok(())
        } else {
            Err(crate::Error::PreflightFailed)
        }
    }
}

/// Check the directories first; TMDB is only contacted when they are usable.
pub async fn run_preflight_checks(config: &RunConfig, client: &TmdbClient) -> PreflightReport {
    let mut report = PreflightReport {
        checks: vec![paths::check(config)],
    };

    if report.passed() {
        report.checks.push(tmdb::check(client).await);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_passes_only_when_every_check_passes() {
        let mut report = PreflightReport {
            checks: vec![CheckResult::passed("Directories", "writable")],
        };
        assert!(report.passed());

        report
            .checks
            .push(CheckResult::failed("TMDB API", "invalid API key", "Check TMDB_API_KEY"));
        assert!(!report.passed());
        assert!(matches!(report.into_result(), Err(crate::Error::PreflightFailed)));
    }

    #[test]
    fn test_empty_report_passes() {
        assert!(PreflightReport::default().into_result().is_ok());
    }
}
