pub mod answer;
pub mod job;
pub mod query;
pub mod report;

pub use answer::Answer;
pub use job::JobState;
pub use query::Query;
pub use report::{
    CategoryStatus, CategoryStatuses, IssueCategory, Severity, SeveritySummary, ValidationIssue,
    ValidationReport,
};
