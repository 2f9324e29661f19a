mod case;
mod project;
mod run;

pub use case::{reorder, Step, TestCase};
pub use project::{Project, TestSuite};
pub use run::{RunSummary, TestRun};
