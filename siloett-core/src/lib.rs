//! # siloett-core
//!
//! Foundation crate for the SILOETT canon-grounding system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod cancel;
pub mod canon;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancel::CancelFlag;
pub use canon::{
    CanonDocument, CanonFact, Citation, DocumentDraft, DocumentId, DocumentKind, DocumentLocator,
    EpisodeRef, FactId, LineRange, Polarity, UniverseId, ValidityScope,
};
pub use config::PipelineConfig;
pub use errors::{SiloettError, SiloettResult};
pub use models::{
    Answer, IssueCategory, Query, Severity, SeveritySummary, ValidationIssue, ValidationReport,
};
