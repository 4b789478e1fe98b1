//! Orchestrator-level errors.

use super::citation_error::CitationError;
use super::retrieval_error::RetrievalError;
use super::store_error::{IngestError, StoreError};
use super::validation_error::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A stage exceeded its budget and no partial result could stand in.
    #[error("stage '{stage}' exceeded its {budget_ms}ms budget")]
    StageTimeout { stage: &'static str, budget_ms: u64 },

    #[error("request cancelled")]
    Cancelled,

    #[error("stage '{stage}' panicked or was aborted")]
    StageAborted { stage: &'static str },

    /// Post-ingest fact embedding failed; the document is stored but
    /// not vector-searchable.
    #[error("fact indexing failed: {reason}")]
    Indexing { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Citation(#[from] CitationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
