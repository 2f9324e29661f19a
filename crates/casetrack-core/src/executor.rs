use thiserror::Error;
use tracing::debug;

use crate::api::{ApiError, TestOps};
use crate::builder::NewTestRun;
use crate::execution::{ExecutionError, RunExecution};
use crate::model::{TestCase, TestRun, TestSuite};

/// Errors that can occur in run workflow operations.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Execution(#[from] ExecutionError),
}

/// Orchestrates the run workflow against the remote API.
///
/// Wraps a [`TestOps`] backend and layers the state-machine rules on top:
/// which cases a run may be built from, when statuses can still change,
/// and the all-or-nothing save sequence that ends in completion.
pub struct RunExecutor<A: TestOps> {
    api: A,
}

impl<A: TestOps> RunExecutor<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The suites a run under this project may be sourced from.
    pub async fn candidate_suites(&self, project_id: u64) -> Result<Vec<TestSuite>, ExecutorError> {
        Ok(self.api.suites(project_id).await?)
    }

    /// The cases selectable for a run sourced from this suite. An empty
    /// list is valid; the run then starts with no pre-selected cases.
    pub async fn candidate_cases(&self, suite_id: u64) -> Result<Vec<TestCase>, ExecutorError> {
        Ok(self.api.cases(suite_id).await?)
    }

    /// Submits a creation payload built by [`RunDraft`](crate::RunDraft).
    ///
    /// On failure no run was created; the caller must not assume any
    /// execution record exists.
    pub async fn create_run(
        &self,
        project_id: u64,
        payload: &NewTestRun,
    ) -> Result<TestRun, ExecutorError> {
        let run = self.api.create_run(project_id, payload).await?;
        debug!(run_id = run.id, cases = run.test_cases.len(), "created run");
        Ok(run)
    }

    /// Lists a project's runs.
    pub async fn runs(&self, project_id: u64) -> Result<Vec<TestRun>, ExecutorError> {
        Ok(self.api.runs(project_id).await?)
    }

    /// Fetches a run and derives its execution records.
    pub async fn load_execution(
        &self,
        project_id: u64,
        run_id: u64,
    ) -> Result<RunExecution, ExecutorError> {
        let run = self.api.run(project_id, run_id).await?;
        Ok(RunExecution::from_run(&run))
    }

    /// Persists every record's status, then completes the run.
    ///
    /// The updates are issued strictly one at a time, in record order, and
    /// the completion call only goes out after the last one has succeeded.
    /// If any update fails the error is returned immediately: no further
    /// update is sent, the run stays open, and the whole save can be
    /// retried as a unit.
    pub async fn save_and_complete(
        &self,
        execution: &mut RunExecution,
    ) -> Result<TestRun, ExecutorError> {
        if !execution.is_open() {
            return Err(ExecutionError::RunCompleted(execution.run_id()).into());
        }

        for record in execution.records() {
            debug!(
                case_id = record.case_id,
                status = %record.status,
                "saving record status"
            );
            self.api
                .set_case_status(execution.project_id(), record.case_id, record.status)
                .await?;
        }

        let run = self
            .api
            .complete_run(execution.project_id(), execution.run_id())
            .await?;

        // Freeze the local records only once the server has confirmed.
        execution.complete()?;
        Ok(run)
    }

    /// Adds a case to an existing run's snapshot.
    ///
    /// Rejected unless the run is still ONWORK: completed and otherwise
    /// terminal runs are immutable audit records.
    pub async fn add_case_to_run(
        &self,
        project_id: u64,
        run_id: u64,
        case_id: u64,
    ) -> Result<TestRun, ExecutorError> {
        let run = self.api.run(project_id, run_id).await?;
        if !run.status.is_open() {
            return Err(ExecutionError::RunCompleted(run_id).into());
        }
        Ok(self.api.add_case_to_run(project_id, run_id, case_id).await?)
    }

    /// Deletes a run.
    pub async fn delete_run(&self, project_id: u64, run_id: u64) -> Result<(), ExecutorError> {
        Ok(self.api.delete_run(project_id, run_id).await?)
    }

    /// Fetches the rendered export document for a run. Export is a pure
    /// read; a failure here never affects the run's status.
    pub async fn export_document(
        &self,
        project_id: u64,
        run_id: u64,
    ) -> Result<Vec<u8>, ExecutorError> {
        Ok(self.api.export_run(project_id, run_id).await?)
    }
}
