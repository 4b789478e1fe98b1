//! The SQLite-backed canon store engine.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info};

use siloett_core::canon::{
    CanonDocument, CanonFact, DocumentDraft, DocumentId, EpisodeRef, FactId, UniverseId,
};
use siloett_core::errors::{IngestError, SiloettError, SiloettResult, StoreError};
use siloett_core::traits::ICanonStore;

use crate::audit::AuditLogger;
use crate::extract::{extract_facts, validate_draft};
use crate::migrations::run_migrations;
use crate::pool::ConnectionPool;
use crate::queries::{document_ops, fact_ops, fact_search};
use crate::to_store_err;

/// Versioned document and fact index over SQLite (WAL, FTS5).
///
/// One writer, many readers. Ingestion is transactional: the document
/// row, its extracted facts, the supersession marker, and the audit
/// entry land together or not at all.
pub struct CanonStore {
    pool: ConnectionPool,
    // In-memory pools are isolated databases; route reads to the writer.
    use_read_pool: bool,
}

impl CanonStore {
    pub fn open(path: &Path, read_pool_size: usize) -> SiloettResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        pool.writer.with_conn_sync(run_migrations)?;
        info!(path = %path.display(), readers = pool.readers.size(), "canon store opened");
        Ok(Self {
            pool,
            use_read_pool: true,
        })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> SiloettResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        pool.writer.with_conn_sync(run_migrations)?;
        Ok(Self {
            pool,
            use_read_pool: false,
        })
    }

    /// Audit rows recorded for a document (ingest and supersession
    /// events).
    pub fn audit_count(&self, id: &DocumentId) -> SiloettResult<usize> {
        self.with_reader(|conn| AuditLogger::count_for(conn, id))
    }

    fn with_reader<F, T>(&self, f: F) -> SiloettResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> SiloettResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

fn into_ingest_err(err: SiloettError) -> IngestError {
    match err {
        SiloettError::Store(store) => IngestError::Store(store),
        other => IngestError::Store(StoreError::Sqlite {
            message: other.to_string(),
        }),
    }
}

impl ICanonStore for CanonStore {
    fn ingest(&self, draft: &DocumentDraft) -> Result<DocumentId, IngestError> {
        validate_draft(draft)?;

        let doc = CanonDocument {
            id: DocumentId::generate(),
            title: draft.title.clone(),
            kind: draft.kind,
            universe: draft.universe.clone(),
            content: draft.content.clone(),
            locator: draft.locator.clone(),
            content_hash: CanonDocument::compute_content_hash(&draft.content),
            ingested_at: Utc::now(),
            superseded_by: None,
        };
        let facts = extract_facts(&doc);

        let outcome = self
            .pool
            .writer
            .with_conn_sync(|conn| {
                let tx = conn
                    .unchecked_transaction()
                    .map_err(|e| to_store_err(e.to_string()))?;

                if document_ops::content_hash_exists(&tx, &doc.universe, &doc.content_hash)? {
                    return Ok(Err(IngestError::DuplicateContent {
                        title: doc.title.clone(),
                    }));
                }
                let previous =
                    document_ops::find_active_version(&tx, &doc.universe, &doc.title, doc.kind)?;

                document_ops::insert_document(&tx, &doc)?;
                if let Some(old) = &previous {
                    document_ops::mark_superseded(&tx, old, &doc.id)?;
                    AuditLogger::log_supersede(&tx, old, &doc.id)?;
                }
                for fact in &facts {
                    fact_ops::insert_fact(&tx, fact)?;
                }
                AuditLogger::log_ingest(&tx, &doc.id, facts.len())?;

                tx.commit().map_err(|e| to_store_err(e.to_string()))?;
                Ok(Ok(doc.id.clone()))
            })
            .map_err(into_ingest_err)?;

        let id = outcome?;
        info!(
            document_id = %id,
            title = %doc.title,
            kind = %doc.kind,
            facts = facts.len(),
            "document ingested"
        );
        Ok(id)
    }

    fn get_document(&self, id: &DocumentId) -> SiloettResult<Option<CanonDocument>> {
        self.with_reader(|conn| document_ops::get_document(conn, id))
    }

    fn get_fact(
        &self,
        universe: &UniverseId,
        subject: &str,
        as_of: Option<EpisodeRef>,
    ) -> SiloettResult<Option<CanonFact>> {
        let facts = self.all_facts_for(universe, subject)?;
        Ok(facts
            .into_iter()
            .find(|fact| fact.scope.applies_at(as_of)))
    }

    fn all_facts_for(
        &self,
        universe: &UniverseId,
        subject: &str,
    ) -> SiloettResult<Vec<CanonFact>> {
        let mut facts =
            self.with_reader(|conn| fact_ops::facts_for_subject(conn, universe, subject))?;
        facts.sort_by(|a, b| b.cmp_precedence(a));
        Ok(facts)
    }

    fn facts_with_subject_prefix(
        &self,
        universe: &UniverseId,
        prefix: &str,
    ) -> SiloettResult<Vec<CanonFact>> {
        let mut facts = self
            .with_reader(|conn| fact_ops::facts_with_subject_prefix(conn, universe, prefix))?;
        facts.sort_by(|a, b| a.subject.cmp(&b.subject).then(b.cmp_precedence(a)));
        Ok(facts)
    }

    fn search_facts_fts(
        &self,
        universe: &UniverseId,
        query: &str,
        limit: usize,
    ) -> SiloettResult<Vec<(CanonFact, f64)>> {
        debug!(universe = %universe, query, limit, "fts search");
        self.with_reader(|conn| fact_search::search_fts(conn, universe, query, limit))
    }

    fn search_facts_vector(
        &self,
        universe: &UniverseId,
        embedding: &[f32],
        limit: usize,
    ) -> SiloettResult<Vec<(CanonFact, f64)>> {
        self.with_reader(|conn| fact_search::search_vector(conn, universe, embedding, limit))
    }

    fn set_fact_embedding(&self, fact_id: &FactId, embedding: &[f32]) -> SiloettResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| fact_ops::set_embedding(conn, fact_id, embedding))
    }

    fn facts_for_document(&self, id: &DocumentId) -> SiloettResult<Vec<CanonFact>> {
        self.with_reader(|conn| fact_ops::facts_for_document(conn, id))
    }

    fn document_count(&self, universe: &UniverseId) -> SiloettResult<usize> {
        self.with_reader(|conn| document_ops::document_count(conn, universe))
    }
}
