//! Validation job state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle of a validation job. Terminal states: `Reported`, `Failed`.
/// `Failed` is reached only on a pipeline-level fault (e.g. canon store
/// unavailable) — individual category failures stay inside the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Submitted,
    Segmenting,
    Checking,
    Aggregating,
    Reported,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Reported | JobState::Failed)
    }

    /// Whether `next` is a legal transition from `self`.
    pub fn can_transition_to(self, next: JobState) -> bool {
        matches!(
            (self, next),
            (JobState::Submitted, JobState::Segmenting)
                | (JobState::Segmenting, JobState::Checking)
                | (JobState::Checking, JobState::Aggregating)
                | (JobState::Aggregating, JobState::Reported)
                | (JobState::Submitted, JobState::Failed)
                | (JobState::Segmenting, JobState::Failed)
                | (JobState::Checking, JobState::Failed)
                | (JobState::Aggregating, JobState::Failed)
        )
    }
}
