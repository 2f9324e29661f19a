mod error;
mod http;

pub use error::ApiError;
pub use http::HttpClient;

use async_trait::async_trait;

use crate::builder::NewTestRun;
use crate::model::{Project, TestCase, TestRun, TestSuite};
use crate::session::Session;
use crate::status::CaseStatus;

/// The remote test-management API.
///
/// All business logic and persistence live behind this seam; the rest of
/// the crate is orchestration on top of it. Keeping it a trait lets the
/// workflow code run against an in-memory double in tests.
#[async_trait]
pub trait TestOps: Send + Sync {
    /// Exchanges credentials for a session token.
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError>;

    /// Lists the projects visible to the session.
    async fn projects(&self) -> Result<Vec<Project>, ApiError>;

    /// Fetches one project.
    async fn project(&self, project_id: u64) -> Result<Project, ApiError>;

    /// Lists the suites belonging to a project, in backend order.
    async fn suites(&self, project_id: u64) -> Result<Vec<TestSuite>, ApiError>;

    /// Lists the cases belonging to a suite. Empty is valid.
    async fn cases(&self, suite_id: u64) -> Result<Vec<TestCase>, ApiError>;

    /// Lists a project's runs.
    async fn runs(&self, project_id: u64) -> Result<Vec<TestRun>, ApiError>;

    /// Fetches one run, with its nested case snapshot and steps.
    async fn run(&self, project_id: u64, run_id: u64) -> Result<TestRun, ApiError>;

    /// Creates a run. On failure nothing was created server-side that the
    /// caller may rely on.
    async fn create_run(&self, project_id: u64, payload: &NewTestRun)
        -> Result<TestRun, ApiError>;

    /// Patches one case's run-scoped execution status.
    async fn set_case_status(
        &self,
        project_id: u64,
        case_id: u64,
        status: CaseStatus,
    ) -> Result<(), ApiError>;

    /// Marks a run COMPLETED and returns the updated run.
    async fn complete_run(&self, project_id: u64, run_id: u64) -> Result<TestRun, ApiError>;

    /// Adds one case to an existing run's snapshot.
    async fn add_case_to_run(
        &self,
        project_id: u64,
        run_id: u64,
        case_id: u64,
    ) -> Result<TestRun, ApiError>;

    /// Deletes a run.
    async fn delete_run(&self, project_id: u64, run_id: u64) -> Result<(), ApiError>;

    /// Fetches the rendered export document for a run.
    async fn export_run(&self, project_id: u64, run_id: u64) -> Result<Vec<u8>, ApiError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl TestOps for Box<dyn TestOps> {
    async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        (**self).login(email, password).await
    }

    async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        (**self).projects().await
    }

    async fn project(&self, project_id: u64) -> Result<Project, ApiError> {
        (**self).project(project_id).await
    }

    async fn suites(&self, project_id: u64) -> Result<Vec<TestSuite>, ApiError> {
        (**self).suites(project_id).await
    }

    async fn cases(&self, suite_id: u64) -> Result<Vec<TestCase>, ApiError> {
        (**self).cases(suite_id).await
    }

    async fn runs(&self, project_id: u64) -> Result<Vec<TestRun>, ApiError> {
        (**self).runs(project_id).await
    }

    async fn run(&self, project_id: u64, run_id: u64) -> Result<TestRun, ApiError> {
        (**self).run(project_id, run_id).await
    }

    async fn create_run(
        &self,
        project_id: u64,
        payload: &NewTestRun,
    ) -> Result<TestRun, ApiError> {
        (**self).create_run(project_id, payload).await
    }

    async fn set_case_status(
        &self,
        project_id: u64,
        case_id: u64,
        status: CaseStatus,
    ) -> Result<(), ApiError> {
        (**self).set_case_status(project_id, case_id, status).await
    }

    async fn complete_run(&self, project_id: u64, run_id: u64) -> Result<TestRun, ApiError> {
        (**self).complete_run(project_id, run_id).await
    }

    async fn add_case_to_run(
        &self,
        project_id: u64,
        run_id: u64,
        case_id: u64,
    ) -> Result<TestRun, ApiError> {
        (**self).add_case_to_run(project_id, run_id, case_id).await
    }

    async fn delete_run(&self, project_id: u64, run_id: u64) -> Result<(), ApiError> {
        (**self).delete_run(project_id, run_id).await
    }

    async fn export_run(&self, project_id: u64, run_id: u64) -> Result<Vec<u8>, ApiError> {
        (**self).export_run(project_id, run_id).await
    }
}
