//! Retrieval subsystem errors.

use super::store_error::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("retrieval cancelled")]
    Cancelled,

    #[error("embedding failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
