//! Error taxonomy, one enum per subsystem, unified under [`SiloettError`].

pub mod citation_error;
pub mod pipeline_error;
pub mod retrieval_error;
pub mod store_error;
pub mod validation_error;

pub use citation_error::CitationError;
pub use pipeline_error::PipelineError;
pub use retrieval_error::RetrievalError;
pub use store_error::{IngestError, StoreError};
pub use validation_error::ValidationError;

/// Umbrella error for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum SiloettError {
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

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid episode reference: '{input}'")]
    InvalidEpisodeRef { input: String },

    #[error("invalid line range: '{input}'")]
    InvalidLineRange { input: String },
}

pub type SiloettResult<T> = Result<T, SiloettError>;

impl SiloettError {
    /// Whether the caller may retry the request unchanged.
    /// Only store-unavailable and stage-timeout faults qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            SiloettError::Store(StoreError::Unavailable { .. }) => true,
            SiloettError::Pipeline(PipelineError::StageTimeout { .. }) => true,
            SiloettError::Pipeline(PipelineError::Store(StoreError::Unavailable { .. })) => true,
            _ => false,
        }
    }
}
