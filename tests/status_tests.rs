// Status normalization through the public API

use rp_agent::state::{Annotation, TestOutcome, TestResultInfo, TestStatus};
use rp_agent::{ReportStatus, calculate_rp_status};

fn fail_annotation() -> Vec<Annotation> {
    vec![Annotation::new("fail")]
}

#[test]
fn test_expected_is_passed() {
    assert_eq!(
        calculate_rp_status(TestOutcome::Expected, TestStatus::Failed, &fail_annotation()),
        ReportStatus::Passed
    );
}

#[test]
fn test_flaky_is_passed() {
    assert_eq!(
        calculate_rp_status(TestOutcome::Flaky, TestStatus::Failed, &[]),
        ReportStatus::Passed
    );
}

#[test]
fn test_unexpected_passed_with_fail_annotation_is_failed() {
    assert_eq!(
        calculate_rp_status(TestOutcome::Unexpected, TestStatus::Passed, &fail_annotation()),
        ReportStatus::Failed
    );
}

#[test]
fn test_unexpected_failed_with_fail_annotation_is_passed() {
    assert_eq!(
        calculate_rp_status(TestOutcome::Unexpected, TestStatus::Failed, &fail_annotation()),
        ReportStatus::Passed
    );
}

#[test]
fn test_unexpected_failed_without_annotation_is_failed() {
    assert_eq!(
        calculate_rp_status(TestOutcome::Unexpected, TestStatus::Failed, &[]),
        ReportStatus::Failed
    );
}

#[test]
fn test_skipped_interrupted_is_interrupted() {
    assert_eq!(
        calculate_rp_status(TestOutcome::Skipped, TestStatus::Interrupted, &[]),
        ReportStatus::Interrupted
    );
}

#[test]
fn test_skipped_otherwise_is_skipped() {
    assert_eq!(
        calculate_rp_status(TestOutcome::Skipped, TestStatus::Passed, &[]),
        ReportStatus::Skipped
    );
    assert_eq!(
        calculate_rp_status(TestOutcome::Skipped, TestStatus::Skipped, &[]),
        ReportStatus::Skipped
    );
}

#[test]
fn test_result_from_host_json() {
    // Arrange
    let payload = r#"{
        "outcome": "unexpected",
        "status": "timedOut",
        "annotations": [{"type": "fail", "description": "flaky backend"}]
    }"#;

    // Act
    let result: TestResultInfo = serde_json::from_str(payload).expect("Invalid result JSON");

    // Assert
    assert!(result.attachments.is_empty());
    assert_eq!(result.report_status(), ReportStatus::Passed);
}
