use casetrack_core::{RunDraft, ValidationError};

#[test]
fn test_empty_title_rejected() {
    let err = RunDraft::new("", "desc").build().unwrap_err();
    assert!(matches!(err, ValidationError::EmptyTitle));
    assert_eq!(err.field(), "title");
}

#[test]
fn test_whitespace_title_rejected() {
    let err = RunDraft::new("   ", "desc").build().unwrap_err();
    assert!(matches!(err, ValidationError::EmptyTitle));
}

#[test]
fn test_title_is_trimmed() {
    let payload = RunDraft::new("  Regression  ", "").build().unwrap();
    assert_eq!(payload.title, "Regression");
    assert_eq!(payload.description, "");
}

#[test]
fn test_case_outside_candidates_rejected() {
    let err = RunDraft::new("Smoke", "")
        .suite(3)
        .cases([10, 99])
        .candidates([10, 11])
        .build()
        .unwrap_err();

    assert!(matches!(err, ValidationError::CaseNotInCandidates(99)));
    assert_eq!(err.field(), "testCaseIds");
}

#[test]
fn test_cases_unconstrained_without_candidates() {
    let payload = RunDraft::new("Smoke", "")
        .cases([99, 100])
        .build()
        .unwrap();
    assert_eq!(payload.test_case_ids, vec![99, 100]);
}

#[test]
fn test_duplicate_cases_deduped_in_order() {
    let payload = RunDraft::new("Smoke", "")
        .cases([11, 10, 11, 10])
        .candidates([10, 11])
        .build()
        .unwrap();
    assert_eq!(payload.test_case_ids, vec![11, 10]);
}

#[test]
fn test_empty_selection_is_valid() {
    let payload = RunDraft::new("Smoke", "first pass")
        .suite(3)
        .candidates([10, 11])
        .build()
        .unwrap();
    assert_eq!(payload.test_suite_id, Some(3));
    assert!(payload.test_case_ids.is_empty());
}

#[test]
fn test_payload_uses_camel_case_fields() {
    let payload = RunDraft::new("Smoke", "d").suite(3).cases([1]).build().unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["testSuiteId"], 3);
    assert_eq!(json["testCaseIds"][0], 1);
    assert!(json.get("test_suite_id").is_none());
}

#[test]
fn test_suite_id_omitted_when_absent() {
    let payload = RunDraft::new("Smoke", "d").build().unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("testSuiteId").is_none());
}
