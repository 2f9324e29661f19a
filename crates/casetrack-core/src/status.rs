use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Run-scoped status of a single test case within a test run.
///
/// This is independent of the free-form authoring status a test case
/// carries in its suite ("new", "in_progress", ...). The same case can
/// hold different execution statuses across different runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Not yet exercised in this run. Also a legitimate terminal outcome.
    #[default]
    #[serde(rename = "ONWORK")]
    Onwork,
    #[serde(rename = "PASSED")]
    Passed,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "SKIPPED")]
    Skipped,
}

impl CaseStatus {
    /// The exact string the backend uses on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Onwork => "ONWORK",
            CaseStatus::Passed => "PASSED",
            CaseStatus::Failed => "FAILED",
            CaseStatus::Skipped => "SKIPPED",
        }
    }

    /// Returns a human-readable name for listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            CaseStatus::Onwork => "On work",
            CaseStatus::Passed => "Passed",
            CaseStatus::Failed => "Failed",
            CaseStatus::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONWORK" => Ok(CaseStatus::Onwork),
            "PASSED" => Ok(CaseStatus::Passed),
            "FAILED" => Ok(CaseStatus::Failed),
            "SKIPPED" => Ok(CaseStatus::Skipped),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Status of a test run as a whole.
///
/// A run is created ONWORK and moves to COMPLETED exactly once; there is
/// no reopen transition. Completed runs are immutable audit records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    #[default]
    #[serde(rename = "ONWORK")]
    Onwork,
    #[serde(rename = "PASSED")]
    Passed,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "SKIPPED")]
    Skipped,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl RunStatus {
    /// Whether execution record edits are still allowed.
    pub fn is_open(&self) -> bool {
        matches!(self, RunStatus::Onwork)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Onwork => "ONWORK",
            RunStatus::Passed => "PASSED",
            RunStatus::Failed => "FAILED",
            RunStatus::Skipped => "SKIPPED",
            RunStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized status string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown status: {0}")]
pub struct UnknownStatus(pub String);
