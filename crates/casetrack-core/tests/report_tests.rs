use chrono::Utc;
use casetrack_core::execution::ExecutionError;
use casetrack_core::{CaseStatus, RunReport, RunStatus, Step, TestCase, TestRun};

fn case(id: u64, title: &str, status: &str, steps: Vec<Step>) -> TestCase {
    let now = Utc::now();
    TestCase {
        id,
        title: title.to_string(),
        description: None,
        steps,
        status: status.to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn run(status: RunStatus, cases: Vec<TestCase>) -> TestRun {
    let now = Utc::now();
    TestRun {
        id: 7,
        title: "Release 1.2".to_string(),
        description: None,
        project_id: 1,
        test_suite_id: None,
        status,
        created_at: now,
        updated_at: now,
        test_cases: cases,
    }
}

#[test]
fn test_open_run_has_no_report() {
    let run = run(RunStatus::Onwork, vec![case(10, "A", "PASSED", Vec::new())]);
    let err = RunReport::from_run(&run).unwrap_err();
    assert!(matches!(err, ExecutionError::RunStillOpen(7)));
}

#[test]
fn test_report_carries_final_statuses_and_steps() {
    let steps = vec![Step::new("open checkout", "cart is shown")];
    let run = run(
        RunStatus::Completed,
        vec![
            case(10, "A", "PASSED", steps.clone()),
            case(11, "B", "FAILED", Vec::new()),
            case(12, "C", "ONWORK", Vec::new()),
        ],
    );

    let report = RunReport::from_run(&run).unwrap();
    assert_eq!(report.run_id, 7);
    assert_eq!(report.title, "Release 1.2");
    assert_eq!(report.entries.len(), 3);

    assert_eq!(report.entries[0].status, CaseStatus::Passed);
    assert_eq!(report.entries[0].steps, steps);
    assert_eq!(report.entries[1].status, CaseStatus::Failed);
    // Never-exercised cases report as ONWORK.
    assert_eq!(report.entries[2].status, CaseStatus::Onwork);
}

#[test]
fn test_report_counts() {
    let run = run(
        RunStatus::Completed,
        vec![
            case(10, "A", "PASSED", Vec::new()),
            case(11, "B", "PASSED", Vec::new()),
            case(12, "C", "SKIPPED", Vec::new()),
        ],
    );

    let report = RunReport::from_run(&run).unwrap();
    assert_eq!(report.count(CaseStatus::Passed), 2);
    assert_eq!(report.count(CaseStatus::Skipped), 1);
    assert_eq!(report.count(CaseStatus::Failed), 0);
}
