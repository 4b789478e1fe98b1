//! Citation tracker errors.

use super::store_error::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CitationError {
    /// Internal invariant violation: a citation failed to resolve.
    /// Fatal for the response — never surfaced as a degraded answer.
    #[error("unverifiable citation for '{cited_source}': {reason}")]
    Unverifiable { cited_source: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
