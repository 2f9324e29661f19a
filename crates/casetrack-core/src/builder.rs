use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors produced by [`RunDraft::build`].
///
/// These are caught before any network call is made; the caller can show
/// the offending field and let the user correct it.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("test case {0} is not among the candidate cases for the chosen suite")]
    CaseNotInCandidates(u64),
}

impl ValidationError {
    /// The wire-level name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle => "title",
            ValidationError::CaseNotInCandidates(_) => "testCaseIds",
        }
    }
}

/// Payload for creating a test run under a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestRun {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_suite_id: Option<u64>,
    pub test_case_ids: Vec<u64>,
}

/// Assembles a valid run creation request.
///
/// A draft collects the user's choices (title, description, source suite,
/// selected cases) plus the candidate case set loaded for the chosen
/// suite, and validates the whole thing in [`build`](Self::build).
///
/// # Example
///
/// ```
/// use casetrack_core::builder::RunDraft;
///
/// let payload = RunDraft::new("  Smoke  ", "nightly smoke set")
///     .suite(3)
///     .cases([10, 11])
///     .candidates([10, 11, 12])
///     .build()
///     .unwrap();
/// assert_eq!(payload.title, "Smoke");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunDraft {
    title: String,
    description: String,
    suite_id: Option<u64>,
    case_ids: Vec<u64>,
    candidates: Option<BTreeSet<u64>>,
}

impl RunDraft {
    /// Starts a draft. The description may be empty; the title is
    /// validated at build time.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Selects the source suite the run is created from.
    pub fn suite(mut self, suite_id: u64) -> Self {
        self.suite_id = Some(suite_id);
        self
    }

    /// Selects the cases to include. Duplicates are dropped, first
    /// occurrence wins; order is preserved.
    pub fn cases(mut self, case_ids: impl IntoIterator<Item = u64>) -> Self {
        let mut seen = BTreeSet::new();
        self.case_ids = case_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        self
    }

    /// Sets the candidate case ids for the chosen suite. When present,
    /// every selected case must be a member of this set.
    pub fn candidates(mut self, case_ids: impl IntoIterator<Item = u64>) -> Self {
        self.candidates = Some(case_ids.into_iter().collect());
        self
    }

    /// Validates the draft and produces the creation payload.
    ///
    /// The title is trimmed into the payload. An empty candidate set is
    /// valid: a run may start with zero pre-selected cases.
    pub fn build(self) -> Result<NewTestRun, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        if let Some(candidates) = &self.candidates {
            if let Some(unknown) = self.case_ids.iter().find(|id| !candidates.contains(id)) {
                return Err(ValidationError::CaseNotInCandidates(*unknown));
            }
        }

        Ok(NewTestRun {
            title: title.to_string(),
            description: self.description,
            test_suite_id: self.suite_id,
            test_case_ids: self.case_ids,
        })
    }
}
