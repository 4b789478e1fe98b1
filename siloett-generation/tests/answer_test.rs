//! Answer generation over the seeded fixture canon.

use std::sync::Arc;

use siloett_citation::CitationTracker;
use siloett_core::cancel::CancelFlag;
use siloett_core::canon::{DocumentDraft, DocumentKind, DocumentLocator, EpisodeRef};
use siloett_core::config::PipelineConfig;
use siloett_core::constants::{HEDGED_CONFIDENCE_CAP, INSUFFICIENT_CANON_ANSWER};
use siloett_core::models::Query;
use siloett_core::traits::{ICanonStore, IEmbeddingProvider};
use siloett_embeddings::{index_document_facts, HashedTfIdf};
use siloett_generation::GenerationEngine;
use siloett_retrieval::{RetrievalEngine, RetrievalFilters};
use siloett_store::CanonStore;
use test_fixtures as fixtures;

struct Stack {
    store: Arc<dyn ICanonStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    retrieval: RetrievalEngine,
    generation: GenerationEngine,
}

fn stack() -> Stack {
    let config = PipelineConfig::default();
    let store: Arc<dyn ICanonStore> = Arc::new(CanonStore::open_in_memory().unwrap());
    let embedder: Arc<dyn IEmbeddingProvider> =
        Arc::new(HashedTfIdf::new(config.embedding_dimensions));

    let ids = fixtures::seed_canon(store.as_ref()).unwrap();
    for id in &ids {
        index_document_facts(store.as_ref(), embedder.as_ref(), id).unwrap();
    }

    let retrieval = RetrievalEngine::new(store.clone(), embedder.clone(), config.clone());
    let generation = GenerationEngine::new(CitationTracker::new(store.clone()), config);
    Stack {
        store,
        embedder,
        retrieval,
        generation,
    }
}

fn ask(stack: &Stack, query: Query) -> siloett_core::models::Answer {
    let ranked = stack
        .retrieval
        .retrieve(&query, &RetrievalFilters::none(), &CancelFlag::new())
        .unwrap();
    stack.generation.answer(&query, &ranked).unwrap()
}

#[test]
fn season_four_wheelchair_question_is_answered_with_two_citations() {
    let stack = stack();
    let query = Query::new("Can Roy use a wheelchair in Season 4?", fixtures::universe())
        .as_of(EpisodeRef::new(4, 1));

    let answer = ask(&stack, query);

    assert!(answer.confidence >= 90, "confidence {}", answer.confidence);
    assert!(answer.text.starts_with("No"), "text: {}", answer.text);
    assert_eq!(answer.citations.len(), 2);

    let sources: Vec<&str> = answer.citations.iter().map(|c| c.source.as_str()).collect();
    assert!(sources.contains(&"Episode 2.8 Script"));
    assert!(sources.contains(&"Character Bible - Roy"));
    assert!(!answer.degraded);
}

#[test]
fn unanswerable_question_returns_the_fixed_insufficient_response() {
    let stack = stack();
    let query = Query::new("Richmond trombone recital", fixtures::universe());

    let answer = ask(&stack, query);

    assert_eq!(answer.text, INSUFFICIENT_CANON_ANSWER);
    assert!(answer.is_insufficient());
    assert!(answer.confidence < PipelineConfig::default().confidence_floor);
    assert!(answer.citations.is_empty());
}

#[test]
fn equally_scoped_conflicting_facts_force_a_hedged_confidence() {
    let stack = stack();

    // Two facts about the same subject, same scope start, opposite
    // polarity: no precedence ordering exists between them.
    let draft = DocumentDraft {
        title: "Writers Room Notes".to_string(),
        kind: DocumentKind::Notes,
        universe: fixtures::universe(),
        content: "## Douglas\n\
                  Douglas keeps a katana in his desk [from 3.1]\n\
                  Douglas does not keep a katana anywhere [from 3.1]\n"
            .to_string(),
        locator: DocumentLocator::default(),
    };
    let id = stack.store.ingest(&draft).unwrap();
    index_document_facts(stack.store.as_ref(), stack.embedder.as_ref(), &id).unwrap();

    let query = Query::new("Does Douglas keep a katana?", fixtures::universe())
        .as_of(EpisodeRef::new(3, 2));
    let answer = ask(&stack, query);

    assert!(!answer.is_insufficient());
    assert!(
        answer.confidence <= HEDGED_CONFIDENCE_CAP,
        "confidence {}",
        answer.confidence
    );
    assert_eq!(answer.citations.len(), 2);
}

#[test]
fn pre_recovery_context_flips_the_answer() {
    let stack = stack();
    let query = Query::new("Does Roy use a wheelchair?", fixtures::universe())
        .as_of(EpisodeRef::new(2, 3));

    let answer = ask(&stack, query);

    assert!(!answer.is_insufficient());
    assert!(!answer.text.starts_with("No"));
    // Before 2.8 the canon affirms the wheelchair, whichever source wins.
    assert!(!answer.citations.is_empty());
    assert!(answer.citations.iter().all(|c| c.text.contains("wheelchair")));
}

#[test]
fn citations_quote_source_documents_verbatim() {
    let stack = stack();
    let query = Query::new("Can Roy use a wheelchair in Season 4?", fixtures::universe())
        .as_of(EpisodeRef::new(4, 1));

    let answer = ask(&stack, query);
    for citation in &answer.citations {
        assert!(!citation.text.is_empty());
        // Tracker verified resolution; spot-check the locator shape.
        assert!(citation.page.is_some() || citation.section.is_some() || citation.lines.is_some());
    }
}
