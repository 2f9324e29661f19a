use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One instruction/expected-result pair within a test case.
///
/// Steps are owned exclusively by their test case. Ids are minted on the
/// client when a step is authored; the backend stores them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    /// The instruction text. The backend field is literally named `step`.
    #[serde(rename = "step")]
    pub instruction: String,
    pub expected_result: String,
}

impl Step {
    /// Creates a new step with a fresh id.
    pub fn new(instruction: impl Into<String>, expected_result: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            instruction: instruction.into(),
            expected_result: expected_result.into(),
        }
    }
}

/// An authored test case belonging to a suite.
///
/// `status` is the free-form authoring label ("new", "in_progress", ...).
/// Inside a run snapshot the same field carries the run-scoped execution
/// status string instead; the two domains are deliberately kept separate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TestCase {
    /// Moves the step at `from` so that it ends up at `to`, shifting the
    /// steps in between. Order is the only thing that changes; step
    /// identity is never touched.
    ///
    /// Returns false (and leaves the list untouched) if either index is
    /// out of range.
    pub fn move_step(&mut self, from: usize, to: usize) -> bool {
        reorder(&mut self.steps, from, to)
    }
}

/// Splices the element at `from` out of the sequence and reinserts it at
/// `to`. Mirrors a drag-and-drop reorder: remove one, insert one, no other
/// element changes identity.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ids_are_unique() {
        let a = Step::new("open page", "page opens");
        let b = Step::new("open page", "page opens");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_reorder_moves_forward_and_back() {
        let mut v = vec![1, 2, 3, 4];
        assert!(reorder(&mut v, 0, 2));
        assert_eq!(v, vec![2, 3, 1, 4]);
        assert!(reorder(&mut v, 2, 0));
        assert_eq!(v, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reorder_out_of_range_is_a_no_op() {
        let mut v = vec![1, 2, 3];
        assert!(!reorder(&mut v, 3, 0));
        assert!(!reorder(&mut v, 0, 3));
        assert_eq!(v, vec![1, 2, 3]);
    }
}
