// State module - Runner-supplied test data
// Read-only inputs handed over by the host test runner

pub mod result;

pub use result::{RawAttachment, TestResultInfo};

use serde::{Deserialize, Serialize};

/// Runner's high-level verdict for a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Expected,
    Unexpected,
    Flaky,
    Skipped,
    #[serde(other)]
    Unknown,
}

/// Runner's per-attempt result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Passed,
    Failed,
    TimedOut,
    Skipped,
    Interrupted,
    #[serde(other)]
    Unknown,
}

/// Annotation kind marking a test as expected to fail
pub const ANNOTATION_FAIL: &str = "fail";

/// Tag attached to a test by the runner or the test author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Annotation {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: None,
        }
    }

    pub fn is_fail(&self) -> bool {
        self.kind == ANNOTATION_FAIL
    }
}

/// Anything exposing the runner's title hierarchy (file, suites, test title)
pub trait TitlePath {
    fn title_path(&self) -> Vec<String>;
}

/// Test case as seen by the host runner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseInfo {
    #[serde(default)]
    pub title_path: Vec<String>,
}

impl TestCaseInfo {
    pub fn new<I, S>(title_path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title_path: title_path.into_iter().map(Into::into).collect(),
        }
    }
}

impl TitlePath for TestCaseInfo {
    fn title_path(&self) -> Vec<String> {
        self.title_path.clone()
    }
}

impl TitlePath for [&str] {
    fn title_path(&self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl TitlePath for Vec<String> {
    fn title_path(&self) -> Vec<String> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_from_runner_json() {
        let outcome: TestOutcome = serde_json::from_value(json!("flaky")).unwrap();
        assert_eq!(outcome, TestOutcome::Flaky);

        let unknown: TestOutcome = serde_json::from_value(json!("quarantined")).unwrap();
        assert_eq!(unknown, TestOutcome::Unknown);
    }

    #[test]
    fn test_status_from_runner_json() {
        let status: TestStatus = serde_json::from_value(json!("timedOut")).unwrap();
        assert_eq!(status, TestStatus::TimedOut);

        let status: TestStatus = serde_json::from_value(json!("interrupted")).unwrap();
        assert_eq!(status, TestStatus::Interrupted);
    }

    #[test]
    fn test_annotation_is_fail() {
        assert!(Annotation::new("fail").is_fail());
        assert!(!Annotation::new("skip").is_fail());

        let parsed: Annotation =
            serde_json::from_value(json!({"type": "fail", "description": "known bug"})).unwrap();
        assert!(parsed.is_fail());
        assert_eq!(parsed.description.as_deref(), Some("known bug"));
    }

    #[test]
    fn test_case_info_from_runner_json() {
        let case: TestCaseInfo =
            serde_json::from_value(json!({"titlePath": ["", "chromium", "login.spec.ts", "works"]}))
                .unwrap();
        assert_eq!(case, TestCaseInfo::new(["", "chromium", "login.spec.ts", "works"]));
        assert_eq!(case.title_path().len(), 4);
    }
}
