//! The validation job runner: segment, check concurrently, aggregate.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use siloett_core::cancel::CancelFlag;
use siloett_core::canon::{EpisodeRef, UniverseId};
use siloett_core::config::PipelineConfig;
use siloett_core::errors::ValidationError;
use siloett_core::models::{
    CategoryStatus, CategoryStatuses, IssueCategory, JobState, ValidationIssue, ValidationReport,
};
use siloett_core::traits::ICanonStore;

use siloett_citation::CitationTracker;

use crate::checks::{run_check, CheckAbort, CheckContext};
use crate::segment::segment;

/// One validation job: a draft script and the context to judge it in.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub script: String,
    pub universe: UniverseId,
    /// Episode the draft is set at.
    pub episode: EpisodeRef,
}

pub struct ValidationEngine {
    store: Arc<dyn ICanonStore>,
    tracker: CitationTracker,
    config: PipelineConfig,
}

impl ValidationEngine {
    pub fn new(store: Arc<dyn ICanonStore>, config: PipelineConfig) -> Self {
        let tracker = CitationTracker::new(store.clone());
        Self {
            store,
            tracker,
            config,
        }
    }

    /// Run all four category checks over the draft. Category failures
    /// and timeouts degrade the report; cancellation and store outage
    /// fail the job.
    pub fn validate(
        &self,
        request: &ValidationRequest,
        cancel: &CancelFlag,
    ) -> Result<ValidationReport, ValidationError> {
        let mut state = JobState::Submitted;
        transition(&mut state, JobState::Segmenting);
        let lines = segment(&request.script);
        info!(lines = lines.len(), episode = %request.episode, "draft segmented");

        transition(&mut state, JobState::Checking);
        let ctx = CheckContext {
            store: self.store.as_ref(),
            tracker: &self.tracker,
            universe: &request.universe,
            episode: request.episode,
            lines: &lines,
            cancel,
            deadline: Instant::now() + self.config.category_timeout,
        };
        let results: Vec<(IssueCategory, Result<Vec<ValidationIssue>, CheckAbort>)> =
            IssueCategory::ALL
                .par_iter()
                .map(|category| (*category, run_check(*category, &ctx)))
                .collect();

        transition(&mut state, JobState::Aggregating);
        let mut statuses = CategoryStatuses::default();
        let mut issues = Vec::new();
        for (category, result) in results {
            match result {
                Ok(found) => issues.extend(found),
                Err(CheckAbort::TimedOut) => {
                    warn!(category = %category, "category check timed out");
                    statuses.set(category, CategoryStatus::TimedOut);
                }
                Err(CheckAbort::Failed(reason)) => {
                    warn!(category = %category, reason, "category check failed");
                    statuses.set(category, CategoryStatus::Failed(reason));
                }
                Err(CheckAbort::Cancelled) => {
                    transition(&mut state, JobState::Failed);
                    return Err(ValidationError::Cancelled);
                }
                Err(CheckAbort::Fatal(err)) => {
                    transition(&mut state, JobState::Failed);
                    return Err(err);
                }
            }
        }

        let report = ValidationReport::finalize(issues, statuses);
        transition(&mut state, JobState::Reported);
        info!(
            issues = report.summary.total,
            high = report.summary.high,
            degraded = report.degraded,
            "validation report ready"
        );
        Ok(report)
    }
}

fn transition(state: &mut JobState, next: JobState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal job transition {state:?} -> {next:?}"
    );
    tracing::debug!(from = ?state, to = ?next, "job state");
    *state = next;
}
