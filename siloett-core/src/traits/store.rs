//! Canon store contract: ingestion, fact lookup, search.

use crate::canon::{
    CanonDocument, CanonFact, DocumentDraft, DocumentId, EpisodeRef, FactId, UniverseId,
};
use crate::errors::{IngestError, SiloettResult};

/// Persistent, versioned index of documents and extracted facts.
/// Read-heavy: unlimited concurrent reads; writes serialize on the
/// single write connection.
pub trait ICanonStore: Send + Sync {
    /// Ingest a document, extracting facts from structured sections and
    /// free text. Malformed drafts are rejected with the missing field
    /// named; the store is left unchanged. Re-ingesting a title+kind
    /// supersedes the previous version (append-only, no in-place edits).
    fn ingest(&self, draft: &DocumentDraft) -> Result<DocumentId, IngestError>;

    fn get_document(&self, id: &DocumentId) -> SiloettResult<Option<CanonDocument>>;

    /// Most-specific applicable fact for a subject at the given episode
    /// context. `None` when no fact applies (soft miss).
    fn get_fact(
        &self,
        universe: &UniverseId,
        subject: &str,
        as_of: Option<EpisodeRef>,
    ) -> SiloettResult<Option<CanonFact>>;

    /// All facts for a subject, most-specific/most-recent first.
    fn all_facts_for(&self, universe: &UniverseId, subject: &str)
        -> SiloettResult<Vec<CanonFact>>;

    /// All facts in a universe whose subject starts with the prefix
    /// (e.g. `world/`, `timeline/`).
    fn facts_with_subject_prefix(
        &self,
        universe: &UniverseId,
        prefix: &str,
    ) -> SiloettResult<Vec<CanonFact>>;

    /// BM25-ranked full-text hits. Score: higher is better.
    fn search_facts_fts(
        &self,
        universe: &UniverseId,
        query: &str,
        limit: usize,
    ) -> SiloettResult<Vec<(CanonFact, f64)>>;

    /// Cosine-ranked hits over stored fact embeddings.
    fn search_facts_vector(
        &self,
        universe: &UniverseId,
        embedding: &[f32],
        limit: usize,
    ) -> SiloettResult<Vec<(CanonFact, f64)>>;

    /// Attach an embedding to a fact (computed post-ingest).
    fn set_fact_embedding(&self, fact_id: &FactId, embedding: &[f32]) -> SiloettResult<()>;

    fn facts_for_document(&self, id: &DocumentId) -> SiloettResult<Vec<CanonFact>>;

    fn document_count(&self, universe: &UniverseId) -> SiloettResult<usize>;
}
