//! Canon store errors.

use crate::canon::DocumentKind;

/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// Store unreachable — the whole request fails fast, retryable.
    #[error("canon store unavailable: {reason}")]
    Unavailable { reason: String },

    /// Soft miss: triggers the insufficient-confidence path, not a hard failure.
    #[error("no canon facts for subject '{subject}'")]
    FactNotFound { subject: String },

    #[error("document not found: {id}")]
    DocumentNotFound { id: String },
}

/// Malformed document rejected synchronously at ingestion; the store is
/// left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("missing required locator field '{field}' for {kind} document")]
    MissingField {
        kind: DocumentKind,
        field: &'static str,
    },

    #[error("document content is empty")]
    EmptyContent,

    #[error("duplicate content: '{title}' already ingested with identical content")]
    DuplicateContent { title: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IngestError {
    /// The locator field named by a rejection, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            IngestError::MissingField { field, .. } => Some(field),
            _ => None,
        }
    }
}
