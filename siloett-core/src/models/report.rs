//! Validation issues and reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::canon::Citation;

/// Ranked importance of a detected contradiction. `Ord` ascends
/// Low → High so reports sort with `High` first via reverse compare.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        f.write_str(name)
    }
}

/// Closed set of inconsistency categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    CharacterInconsistency,
    TimelineConflict,
    WorldRuleViolation,
    CharacterVoice,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 4] = [
        IssueCategory::CharacterInconsistency,
        IssueCategory::TimelineConflict,
        IssueCategory::WorldRuleViolation,
        IssueCategory::CharacterVoice,
    ];

    /// Stable position used as the final report-ordering tie-break so
    /// concurrent category checks cannot affect output order.
    pub fn sort_order(self) -> u8 {
        match self {
            IssueCategory::CharacterInconsistency => 0,
            IssueCategory::TimelineConflict => 1,
            IssueCategory::WorldRuleViolation => 2,
            IssueCategory::CharacterVoice => 3,
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueCategory::CharacterInconsistency => "character-inconsistency",
            IssueCategory::TimelineConflict => "timeline-conflict",
            IssueCategory::WorldRuleViolation => "world-rule-violation",
            IssueCategory::CharacterVoice => "character-voice",
        };
        f.write_str(name)
    }
}

/// One detected contradiction between a script unit and a canon fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub category: IssueCategory,
    /// 1-based line number in the submitted script.
    pub line: u32,
    /// What the script asserts.
    pub issue: String,
    /// The conflicting canon fact's statement.
    pub canon_fact: String,
    /// Verified pointer to the fact's source.
    pub citation: Citation,
    pub suggestion: String,
}

/// Per-severity counts for the report header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl SeveritySummary {
    pub fn tally(issues: &[ValidationIssue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }
        summary.total = issues.len();
        summary
    }
}

/// Outcome of one category's scan. A failed category never blocks the
/// others — the report carries the flag instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum CategoryStatus {
    Completed,
    Failed(String),
    TimedOut,
}

impl CategoryStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, CategoryStatus::Completed)
    }
}

/// Status flags for all four categories, exhaustive by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStatuses {
    pub character_inconsistency: CategoryStatus,
    pub timeline_conflict: CategoryStatus,
    pub world_rule_violation: CategoryStatus,
    pub character_voice: CategoryStatus,
}

impl Default for CategoryStatuses {
    fn default() -> Self {
        Self {
            character_inconsistency: CategoryStatus::Completed,
            timeline_conflict: CategoryStatus::Completed,
            world_rule_violation: CategoryStatus::Completed,
            character_voice: CategoryStatus::Completed,
        }
    }
}

impl CategoryStatuses {
    pub fn get(&self, category: IssueCategory) -> &CategoryStatus {
        match category {
            IssueCategory::CharacterInconsistency => &self.character_inconsistency,
            IssueCategory::TimelineConflict => &self.timeline_conflict,
            IssueCategory::WorldRuleViolation => &self.world_rule_violation,
            IssueCategory::CharacterVoice => &self.character_voice,
        }
    }

    pub fn set(&mut self, category: IssueCategory, status: CategoryStatus) {
        match category {
            IssueCategory::CharacterInconsistency => self.character_inconsistency = status,
            IssueCategory::TimelineConflict => self.timeline_conflict = status,
            IssueCategory::WorldRuleViolation => self.world_rule_violation = status,
            IssueCategory::CharacterVoice => self.character_voice = status,
        }
    }

    pub fn all_completed(&self) -> bool {
        IssueCategory::ALL
            .iter()
            .all(|category| self.get(*category).is_completed())
    }
}

/// The full result of validating one script against canon.
///
/// Issues are ordered by descending severity, then ascending line,
/// then category — deterministic regardless of check scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub summary: SeveritySummary,
    pub categories: CategoryStatuses,
    /// True when any category failed or timed out.
    #[serde(default)]
    pub degraded: bool,
}

impl ValidationReport {
    /// Apply the canonical ordering and recompute the summary.
    pub fn finalize(mut issues: Vec<ValidationIssue>, categories: CategoryStatuses) -> Self {
        issues.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(a.line.cmp(&b.line))
                .then(a.category.sort_order().cmp(&b.category.sort_order()))
        });
        let summary = SeveritySummary::tally(&issues);
        let degraded = !categories.all_completed();
        Self {
            issues,
            summary,
            categories,
            degraded,
        }
    }
}
