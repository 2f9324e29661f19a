use serde::{Deserialize, Serialize};

use crate::execution::ExecutionError;
use crate::model::{Step, TestRun};
use crate::status::{CaseStatus, RunStatus};

/// The final outcome of one case within a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub case_id: u64,
    pub title: String,
    pub status: CaseStatus,
    pub steps: Vec<Step>,
}

/// What the export collaborator consumes for a completed run.
///
/// Rendering and downloading are the collaborator's business; building
/// this summary reads run state and never changes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: u64,
    pub title: String,
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    /// Aggregates a completed run into its final report.
    ///
    /// Only completed runs have a final report; an open run fails with
    /// [`ExecutionError::RunStillOpen`].
    pub fn from_run(run: &TestRun) -> Result<Self, ExecutionError> {
        if run.status != RunStatus::Completed {
            return Err(ExecutionError::RunStillOpen(run.id));
        }

        let entries = run
            .test_cases
            .iter()
            .map(|case| ReportEntry {
                case_id: case.id,
                title: case.title.clone(),
                status: case.status.parse().unwrap_or_default(),
                steps: case.steps.clone(),
            })
            .collect();

        Ok(Self {
            run_id: run.id,
            title: run.title.clone(),
            entries,
        })
    }

    /// Count of entries holding the given final status.
    pub fn count(&self, status: CaseStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}
