use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::TestCase;
use crate::status::RunStatus;

/// A test run: a scoped execution session over a selected set of cases.
///
/// `test_cases` is a run-local snapshot of the cases in scope, taken at
/// creation time. Later changes to the source suite do not flow into the
/// run; cases are only added through the explicit add-case operation.
/// Within this snapshot each case's `status` field holds its run-scoped
/// execution status, not the authoring label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub project_id: u64,
    #[serde(default)]
    pub test_suite_id: Option<u64>,
    #[serde(default)]
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl TestRun {
    /// Whether per-case statuses can still be edited.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Converts the run to a summary (for listings).
    pub fn to_summary(&self) -> RunSummary {
        RunSummary {
            id: self.id,
            title: self.title.clone(),
            status: self.status,
            case_count: self.test_cases.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A lightweight summary of a run for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub id: u64,
    pub title: String,
    pub status: RunStatus,
    pub case_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
