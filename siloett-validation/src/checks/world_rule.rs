//! World-rule violations: draft lines contradicting established world
//! facts (locations, objects, standing rules).

use std::collections::HashSet;

use siloett_core::canon::subject::display_name;
use siloett_core::models::{IssueCategory, Severity, ValidationIssue};

use crate::assertions::polarity_of;

use super::{CheckAbort, CheckContext};

pub fn check(ctx: &CheckContext<'_>) -> Result<Vec<ValidationIssue>, CheckAbort> {
    // One authoritative fact per world subject: the prefix query comes
    // back precedence-sorted within each subject.
    let mut seen: HashSet<String> = HashSet::new();
    let rules: Vec<_> = ctx
        .facts_with_prefix("world/")?
        .into_iter()
        .filter(|fact| fact.scope.applies_at(Some(ctx.episode)))
        .filter(|fact| seen.insert(fact.subject.clone()))
        .collect();
    if rules.is_empty() {
        return Ok(Vec::new());
    }

    let mut issues = Vec::new();
    for line in ctx.lines {
        ctx.checkpoint()?;
        if !line.is_checkable() {
            continue;
        }
        let lower = line.text.to_lowercase();
        for fact in &rules {
            if !lower.contains(&display_name(&fact.subject)) {
                continue;
            }
            if polarity_of(&line.text) == fact.polarity {
                continue;
            }
            let citation = ctx.cite(fact)?;
            issues.push(ValidationIssue {
                severity: Severity::Medium,
                category: IssueCategory::WorldRuleViolation,
                line: line.number,
                issue: line.text.trim().to_string(),
                canon_fact: fact.statement.clone(),
                citation,
                suggestion: format!("World canon: {}.", fact.statement),
            });
        }
    }
    Ok(issues)
}
