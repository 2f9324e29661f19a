use thiserror::Error;

use crate::model::TestRun;
use crate::status::CaseStatus;

/// Errors raised by the run execution state machine.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Run {0} is completed and can no longer be edited")]
    RunCompleted(u64),

    #[error("Run {0} is still open; it must be completed first")]
    RunStillOpen(u64),

    #[error("Test case {case_id} is not part of run {run_id}")]
    UnknownCase { run_id: u64, case_id: u64 },
}

/// The run-scoped status of one test case within one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRecord {
    pub case_id: u64,
    pub title: String,
    pub status: CaseStatus,
}

/// Tracks per-case execution statuses for a single test run.
///
/// Built fresh from a fetched [`TestRun`] each session; never cached
/// across runs. Statuses may move freely among ONWORK, PASSED, FAILED and
/// SKIPPED while the run is open. Once [`complete`](Self::complete) has
/// been called every record is frozen at its last-set value; records the
/// user never touched stay ONWORK, which is the "not exercised" outcome.
#[derive(Debug, Clone)]
pub struct RunExecution {
    project_id: u64,
    run_id: u64,
    completed: bool,
    records: Vec<ExecutionRecord>,
}

impl RunExecution {
    /// Derives execution records from a run snapshot, in the run's case
    /// order. Each record starts at the case's last known run-scoped
    /// status, falling back to ONWORK when the snapshot carries no
    /// recognizable one.
    ///
    /// Edits are only allowed while the run is ONWORK; any other run
    /// status (COMPLETED, or a terminal pass/fail aggregate) yields a
    /// closed execution.
    pub fn from_run(run: &TestRun) -> Self {
        let records = run
            .test_cases
            .iter()
            .map(|case| ExecutionRecord {
                case_id: case.id,
                title: case.title.clone(),
                status: case.status.parse().unwrap_or_default(),
            })
            .collect();

        Self {
            project_id: run.project_id,
            run_id: run.id,
            completed: !run.status.is_open(),
            records,
        }
    }

    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Whether statuses can still be edited.
    pub fn is_open(&self) -> bool {
        !self.completed
    }

    /// The records, in run order.
    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    /// The current status of one case, if it belongs to this run.
    pub fn status_of(&self, case_id: u64) -> Option<CaseStatus> {
        self.records
            .iter()
            .find(|r| r.case_id == case_id)
            .map(|r| r.status)
    }

    /// Sets the status of one case.
    ///
    /// Idempotent: setting the status a record already holds succeeds and
    /// changes nothing. Fails without touching any record if the run has
    /// been completed or the case is not in the run.
    pub fn set_status(&mut self, case_id: u64, status: CaseStatus) -> Result<(), ExecutionError> {
        if self.completed {
            return Err(ExecutionError::RunCompleted(self.run_id));
        }

        let record = self
            .records
            .iter_mut()
            .find(|r| r.case_id == case_id)
            .ok_or(ExecutionError::UnknownCase {
                run_id: self.run_id,
                case_id,
            })?;

        record.status = status;
        Ok(())
    }

    /// Transitions the run from open to completed.
    ///
    /// Completing an already-completed run fails with
    /// [`ExecutionError::RunCompleted`] and changes nothing. There is no
    /// transition back.
    pub fn complete(&mut self) -> Result<(), ExecutionError> {
        if self.completed {
            return Err(ExecutionError::RunCompleted(self.run_id));
        }
        self.completed = true;
        Ok(())
    }
}
