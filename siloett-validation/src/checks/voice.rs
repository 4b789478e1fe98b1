//! Character-voice drift: dialogue that breaks a character's
//! established speech patterns.
//!
//! Intentionally conservative: only flags registers canon explicitly
//! rules out (currently slang for characters whose bible says they
//! never use it). Style policing beyond canon is not this check's job.

use siloett_core::canon::subject::normalize_key;
use siloett_core::canon::Polarity;
use siloett_core::models::{IssueCategory, Severity, ValidationIssue};

use crate::assertions::has_slang;
use crate::segment::LineKind;

use super::{CheckAbort, CheckContext};

pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<ValidationIssue>, CheckAbort> {
    let mut issues = Vec::new();

    for line in ctx.lines {
        ctx.checkpoint()?;
        let LineKind::Dialogue { speaker } = &line.kind else {
            continue;
        };
        if !has_slang(line.spoken_text()) {
            continue;
        }

        let subject = format!("{}/speech_patterns", normalize_key(speaker));
        let Some(fact) = ctx.get_fact(&subject)? else {
            continue;
        };
        let rules_out_slang =
            fact.polarity == Polarity::Negates && fact.statement.to_lowercase().contains("slang");
        if !rules_out_slang {
            continue;
        }

        let citation = ctx.cite(&fact)?;
        issues.push(ValidationIssue {
            severity: Severity::Low,
            category: IssueCategory::CharacterVoice,
            line: line.number,
            issue: line.text.trim().to_string(),
            canon_fact: fact.statement.clone(),
            citation,
            suggestion: format!("{speaker}'s canonical register: {}.", fact.statement),
        });
    }
    Ok(issues)
}
