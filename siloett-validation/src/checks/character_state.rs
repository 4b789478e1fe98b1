//! Character physical-state contradictions.
//!
//! A draft line asserting a character's use (or non-use) of an
//! assistive device is checked against the most specific applicable
//! `{character}/physical_status` fact at the draft's episode.

use siloett_core::canon::subject::normalize_key;
use siloett_core::models::{IssueCategory, Severity, ValidationIssue};

use crate::assertions::{character_in, mentions_device, polarity_of};
use crate::segment::LineKind;

use super::{CheckAbort, CheckContext};

pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<ValidationIssue>, CheckAbort> {
    let mut issues = Vec::new();

    for line in ctx.lines {
        ctx.checkpoint()?;
        if !line.is_checkable() || !mentions_device(&line.text) {
            continue;
        }

        let name = match &line.kind {
            LineKind::Dialogue { speaker } => {
                character_in(line.spoken_text()).unwrap_or_else(|| speaker.clone())
            }
            _ => match character_in(&line.text) {
                Some(name) => name,
                None => continue,
            },
        };

        let subject = format!("{}/physical_status", normalize_key(&name));
        let Some(fact) = ctx.get_fact(&subject)? else {
            continue;
        };

        let asserted = polarity_of(&line.text);
        if asserted != fact.polarity {
            let citation = ctx.cite(&fact)?;
            issues.push(ValidationIssue {
                severity: Severity::High,
                category: IssueCategory::CharacterInconsistency,
                line: line.number,
                issue: line.text.trim().to_string(),
                canon_fact: fact.statement.clone(),
                citation,
                suggestion: format!(
                    "Canon as of episode {} says: {}. Revise this line to match.",
                    ctx.episode, fact.statement
                ),
            });
        }
    }
    Ok(issues)
}
