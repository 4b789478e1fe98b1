//! Category checks and their shared execution context.

pub mod character_state;
pub mod timeline;
pub mod voice;
pub mod world_rule;

use std::time::Instant;

use siloett_core::cancel::CancelFlag;
use siloett_core::canon::{CanonFact, Citation, EpisodeRef, UniverseId};
use siloett_core::errors::{SiloettError, StoreError, ValidationError};
use siloett_core::models::{IssueCategory, ValidationIssue};
use siloett_core::traits::ICanonStore;

use siloett_citation::CitationTracker;

use crate::segment::ScriptLine;

/// Why a single category stopped early. `Fatal` variants abort the
/// whole job; the rest are folded into the category's status flag.
#[derive(Debug)]
pub enum CheckAbort {
    Cancelled,
    TimedOut,
    Failed(String),
    Fatal(ValidationError),
}

/// Everything one category check needs. Shared read-only across the
/// four concurrent checks.
pub struct CheckContext<'a> {
    pub store: &'a dyn ICanonStore,
    pub tracker: &'a CitationTracker,
    pub universe: &'a UniverseId,
    /// Episode the draft is set at; scope resolution is relative to it.
    pub episode: EpisodeRef,
    pub lines: &'a [ScriptLine],
    pub cancel: &'a CancelFlag,
    pub deadline: Instant,
}

impl CheckContext<'_> {
    /// Cooperative cancellation/timeout point, called once per line.
    pub fn checkpoint(&self) -> Result<(), CheckAbort> {
        if self.cancel.is_cancelled() {
            return Err(CheckAbort::Cancelled);
        }
        if Instant::now() >= self.deadline {
            return Err(CheckAbort::TimedOut);
        }
        Ok(())
    }

    pub fn get_fact(&self, subject: &str) -> Result<Option<CanonFact>, CheckAbort> {
        self.store
            .get_fact(self.universe, subject, Some(self.episode))
            .map_err(store_abort)
    }

    pub fn facts_with_prefix(&self, prefix: &str) -> Result<Vec<CanonFact>, CheckAbort> {
        self.store
            .facts_with_subject_prefix(self.universe, prefix)
            .map_err(store_abort)
    }

    /// Citation failures are invariant violations and abort the job.
    pub fn cite(&self, fact: &CanonFact) -> Result<Citation, CheckAbort> {
        self.tracker
            .cite(fact)
            .map_err(|e| CheckAbort::Fatal(ValidationError::Citation(e)))
    }
}

/// A store outage fails the job; any other store fault fails only the
/// category that hit it.
fn store_abort(err: SiloettError) -> CheckAbort {
    match err {
        SiloettError::Store(StoreError::Unavailable { reason }) => CheckAbort::Fatal(
            ValidationError::Store(StoreError::Unavailable { reason }),
        ),
        other => CheckAbort::Failed(other.to_string()),
    }
}

pub fn run_check(
    category: IssueCategory,
    ctx: &CheckContext<'_>,
) -> Result<Vec<ValidationIssue>, CheckAbort> {
    match category {
        IssueCategory::CharacterInconsistency => character_state::check(ctx),
        IssueCategory::TimelineConflict => timeline::check(ctx),
        IssueCategory::WorldRuleViolation => world_rule::check(ctx),
        IssueCategory::CharacterVoice => voice::check(ctx),
    }
}
