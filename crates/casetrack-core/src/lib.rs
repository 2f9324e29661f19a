pub mod api;
pub mod builder;
pub mod config;
pub mod execution;
pub mod executor;
pub mod model;
pub mod report;
pub mod session;
pub mod status;

pub use api::{ApiError, HttpClient, TestOps};
pub use builder::{NewTestRun, RunDraft, ValidationError};
pub use config::Config;
pub use execution::{ExecutionError, RunExecution};
pub use executor::RunExecutor;
pub use model::{Project, Step, TestCase, TestRun, TestSuite};
pub use report::RunReport;
pub use session::Session;
pub use status::{CaseStatus, RunStatus};
