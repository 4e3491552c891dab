// Report status derivation

use crate::state::{Annotation, TestOutcome, TestStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status values accepted by the reporting server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Passed,
    Failed,
    Skipped,
    Stopped,
    Interrupted,
    Cancelled,
    Info,
    Warn,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 8] = [
        ReportStatus::Passed,
        ReportStatus::Failed,
        ReportStatus::Skipped,
        ReportStatus::Stopped,
        ReportStatus::Interrupted,
        ReportStatus::Cancelled,
        ReportStatus::Info,
        ReportStatus::Warn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Passed => "passed",
            ReportStatus::Failed => "failed",
            ReportStatus::Skipped => "skipped",
            ReportStatus::Stopped => "stopped",
            ReportStatus::Interrupted => "interrupted",
            ReportStatus::Cancelled => "cancelled",
            ReportStatus::Info => "info",
            ReportStatus::Warn => "warn",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map the runner's outcome, status and annotations to a report status.
///
/// - expected / flaky: passed
/// - unexpected with a `fail` annotation: the runner status inverted
///   (passed becomes failed, anything else becomes passed)
/// - unexpected without one: failed
/// - skipped: interrupted if the attempt was interrupted, skipped otherwise
/// - anything else: failed
pub fn calculate_rp_status(
    outcome: TestOutcome,
    status: TestStatus,
    annotations: &[Annotation],
) -> ReportStatus {
    match outcome {
        TestOutcome::Expected | TestOutcome::Flaky => ReportStatus::Passed,
        TestOutcome::Unexpected if annotations.iter().any(Annotation::is_fail) => {
            if status == TestStatus::Passed {
                ReportStatus::Failed
            } else {
                ReportStatus::Passed
            }
        }
        TestOutcome::Skipped if status == TestStatus::Interrupted => ReportStatus::Interrupted,
        TestOutcome::Skipped => ReportStatus::Skipped,
        TestOutcome::Unexpected | TestOutcome::Unknown => ReportStatus::Failed,
    }
}
