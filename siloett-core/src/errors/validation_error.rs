//! Validation engine errors.
//!
//! A single category's failure is not an error — it becomes a
//! `CategoryStatus` flag in the report. These variants cover
//! job-level faults only.

use super::citation_error::CitationError;
use super::store_error::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("validation job cancelled")]
    Cancelled,

    #[error(transparent)]
    Citation(#[from] CitationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
