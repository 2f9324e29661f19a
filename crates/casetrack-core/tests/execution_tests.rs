use chrono::Utc;
use casetrack_core::execution::ExecutionError;
use casetrack_core::{CaseStatus, RunExecution, RunStatus, TestCase, TestRun};

fn case(id: u64, title: &str, status: &str) -> TestCase {
    let now = Utc::now();
    TestCase {
        id,
        title: title.to_string(),
        description: None,
        steps: Vec::new(),
        status: status.to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn run_with(status: RunStatus, cases: Vec<TestCase>) -> TestRun {
    let now = Utc::now();
    TestRun {
        id: 7,
        title: "Smoke".to_string(),
        description: None,
        project_id: 1,
        test_suite_id: Some(3),
        status,
        created_at: now,
        updated_at: now,
        test_cases: cases,
    }
}

#[test]
fn test_records_initialized_in_run_order() {
    let run = run_with(
        RunStatus::Onwork,
        vec![case(10, "A", "ONWORK"), case(11, "B", "PASSED"), case(12, "C", "new")],
    );
    let execution = RunExecution::from_run(&run);

    let ids: Vec<u64> = execution.records().iter().map(|r| r.case_id).collect();
    assert_eq!(ids, vec![10, 11, 12]);

    // Last known run-scope status is kept; anything else falls back to ONWORK.
    assert_eq!(execution.status_of(10), Some(CaseStatus::Onwork));
    assert_eq!(execution.status_of(11), Some(CaseStatus::Passed));
    assert_eq!(execution.status_of(12), Some(CaseStatus::Onwork));
}

#[test]
fn test_set_status_while_open() {
    let run = run_with(RunStatus::Onwork, vec![case(10, "A", "ONWORK")]);
    let mut execution = RunExecution::from_run(&run);

    execution.set_status(10, CaseStatus::Failed).unwrap();
    assert_eq!(execution.status_of(10), Some(CaseStatus::Failed));

    // Statuses move freely while the run is open.
    execution.set_status(10, CaseStatus::Passed).unwrap();
    assert_eq!(execution.status_of(10), Some(CaseStatus::Passed));
}

#[test]
fn test_set_status_is_idempotent() {
    let run = run_with(RunStatus::Onwork, vec![case(10, "A", "ONWORK")]);
    let mut execution = RunExecution::from_run(&run);

    execution.set_status(10, CaseStatus::Skipped).unwrap();
    let before = execution.records().to_vec();

    execution.set_status(10, CaseStatus::Skipped).unwrap();
    assert_eq!(execution.records(), &before[..]);
}

#[test]
fn test_unknown_case_rejected() {
    let run = run_with(RunStatus::Onwork, vec![case(10, "A", "ONWORK")]);
    let mut execution = RunExecution::from_run(&run);

    let err = execution.set_status(99, CaseStatus::Passed).unwrap_err();
    assert!(matches!(
        err,
        ExecutionError::UnknownCase { run_id: 7, case_id: 99 }
    ));
}

#[test]
fn test_no_edits_after_completion() {
    let run = run_with(RunStatus::Onwork, vec![case(10, "A", "ONWORK")]);
    let mut execution = RunExecution::from_run(&run);

    execution.set_status(10, CaseStatus::Passed).unwrap();
    execution.complete().unwrap();
    assert!(!execution.is_open());

    let err = execution.set_status(10, CaseStatus::Skipped).unwrap_err();
    assert!(matches!(err, ExecutionError::RunCompleted(7)));
    // The record must be left unchanged.
    assert_eq!(execution.status_of(10), Some(CaseStatus::Passed));
}

#[test]
fn test_double_complete_rejected() {
    let run = run_with(RunStatus::Onwork, vec![case(10, "A", "ONWORK")]);
    let mut execution = RunExecution::from_run(&run);

    execution.complete().unwrap();
    let err = execution.complete().unwrap_err();
    assert!(matches!(err, ExecutionError::RunCompleted(7)));
}

#[test]
fn test_untouched_records_complete_as_onwork() {
    let run = run_with(
        RunStatus::Onwork,
        vec![case(10, "A", "ONWORK"), case(11, "B", "ONWORK")],
    );
    let mut execution = RunExecution::from_run(&run);

    execution.set_status(10, CaseStatus::Passed).unwrap();
    execution.complete().unwrap();

    // "Not exercised" is a legitimate terminal outcome.
    assert_eq!(execution.status_of(11), Some(CaseStatus::Onwork));
}

#[test]
fn test_execution_from_completed_run_is_closed() {
    let run = run_with(RunStatus::Completed, vec![case(10, "A", "PASSED")]);
    let mut execution = RunExecution::from_run(&run);

    assert!(!execution.is_open());
    assert!(execution.set_status(10, CaseStatus::Failed).is_err());
}

#[test]
fn test_execution_from_terminal_aggregate_run_is_closed() {
    // Only an ONWORK run accepts edits; a terminal pass/fail/skip
    // aggregate is just as frozen as COMPLETED.
    for status in [RunStatus::Passed, RunStatus::Failed, RunStatus::Skipped] {
        let run = run_with(status, vec![case(10, "A", "PASSED")]);
        let mut execution = RunExecution::from_run(&run);

        assert!(!execution.is_open(), "{status} run must not be editable");

        let err = execution.set_status(10, CaseStatus::Skipped).unwrap_err();
        assert!(matches!(err, ExecutionError::RunCompleted(7)));
        assert_eq!(execution.status_of(10), Some(CaseStatus::Passed));

        assert!(execution.complete().is_err());
    }
}
