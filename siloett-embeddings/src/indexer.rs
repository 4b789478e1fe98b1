//! Post-ingest embedding of extracted facts.

use siloett_core::canon::{CanonFact, DocumentId};
use siloett_core::errors::SiloettResult;
use siloett_core::traits::{ICanonStore, IEmbeddingProvider};

/// Text a fact is embedded under: subject key terms plus the statement.
pub fn embeddable_text(fact: &CanonFact) -> String {
    format!("{} {}", fact.subject.replace(['/', '_'], " "), fact.statement)
}

/// Embed and store vectors for every fact of a document. Returns the
/// number of facts indexed.
pub fn index_document_facts(
    store: &dyn ICanonStore,
    embedder: &dyn IEmbeddingProvider,
    id: &DocumentId,
) -> SiloettResult<usize> {
    let facts = store.facts_for_document(id)?;
    for fact in &facts {
        let embedding = embedder.embed(&embeddable_text(fact))?;
        store.set_fact_embedding(&fact.id, &embedding)?;
    }
    Ok(facts.len())
}
