//! Timeline conflicts: the draft referencing events canon dates after
//! the draft's own episode.

use siloett_core::models::{IssueCategory, Severity, ValidationIssue};

use crate::assertions::token_overlap;

use super::{CheckAbort, CheckContext};

/// Shared content tokens required to treat a line as referencing a
/// timeline event.
const EVENT_MATCH_THRESHOLD: usize = 2;

pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<ValidationIssue>, CheckAbort> {
    let timeline = ctx.facts_with_prefix("timeline/")?;
    let future: Vec<_> = timeline
        .iter()
        .filter(|fact| {
            fact.locator
                .episode
                .is_some_and(|episode| episode > ctx.episode)
        })
        .collect();
    if future.is_empty() {
        return Ok(Vec::new());
    }

    let mut issues = Vec::new();
    for line in ctx.lines {
        ctx.checkpoint()?;
        if !line.is_checkable() {
            continue;
        }
        for fact in &future {
            if token_overlap(&line.text, &fact.statement) < EVENT_MATCH_THRESHOLD {
                continue;
            }
            let episode = fact.locator.episode.unwrap_or(ctx.episode);
            let citation = ctx.cite(fact)?;
            issues.push(ValidationIssue {
                severity: Severity::High,
                category: IssueCategory::TimelineConflict,
                line: line.number,
                issue: line.text.trim().to_string(),
                canon_fact: fact.statement.clone(),
                citation,
                suggestion: format!(
                    "This event happens at episode {episode}, after this draft's episode {}.",
                    ctx.episode
                ),
            });
        }
    }
    Ok(issues)
}
