//! End-to-end orchestrator flows: ingest, search, validate.

use std::sync::Arc;
use std::time::Duration;

use siloett_core::cancel::CancelFlag;
use siloett_core::canon::EpisodeRef;
use siloett_core::config::PipelineConfig;
use siloett_core::constants::stages;
use siloett_core::errors::{IngestError, PipelineError};
use siloett_core::models::Query;
use siloett_core::traits::{ICanonStore, IEmbeddingProvider};
use siloett_embeddings::HashedTfIdf;
use siloett_pipeline::Orchestrator;
use siloett_store::CanonStore;
use siloett_validation::ValidationRequest;
use test_fixtures as fixtures;

fn orchestrator(config: PipelineConfig) -> Orchestrator {
    siloett_pipeline::init_tracing();
    let store: Arc<dyn ICanonStore> = Arc::new(CanonStore::open_in_memory().unwrap());
    let embedder: Arc<dyn IEmbeddingProvider> =
        Arc::new(HashedTfIdf::new(config.embedding_dimensions));
    Orchestrator::new(store, embedder, config)
}

/// Seed the fixture canon through the front door so ingestion and
/// post-ingest indexing are both exercised.
async fn seeded_orchestrator() -> Orchestrator {
    let orchestrator = orchestrator(PipelineConfig::default());
    for draft in [
        fixtures::episode_2_8_script(),
        fixtures::character_bible_roy(),
        fixtures::character_bible_moss(),
        fixtures::world_bible(),
        fixtures::timeline_doc(),
    ] {
        orchestrator.ingest(draft).await.unwrap();
    }
    orchestrator
}

#[tokio::test]
async fn season_four_wheelchair_question_gets_a_high_confidence_no() {
    let orchestrator = seeded_orchestrator().await;
    let query = Query::new("Can Roy use a wheelchair in Season 4?", fixtures::universe())
        .as_of(EpisodeRef::new(4, 1));

    let answer = orchestrator.search(query, CancelFlag::new()).await.unwrap();

    assert!(!answer.degraded);
    assert!(answer.confidence >= 90, "confidence {}", answer.confidence);
    assert!(answer.text.starts_with("No"), "text: {}", answer.text);
    assert_eq!(answer.citations.len(), 2);
    let sources: Vec<&str> = answer.citations.iter().map(|c| c.source.as_str()).collect();
    assert!(sources.contains(&"Episode 2.8 Script"));
    assert!(sources.contains(&"Character Bible - Roy"));
}

#[tokio::test]
async fn unrelated_query_returns_the_fixed_insufficient_answer() {
    let orchestrator = seeded_orchestrator().await;
    let query = Query::new(
        "What instrument does Richmond play at his recital?",
        fixtures::universe(),
    );

    let answer = orchestrator.search(query, CancelFlag::new()).await.unwrap();

    assert!(answer.is_insufficient());
    assert!(answer.citations.is_empty());
    assert!(!answer.degraded);
}

#[tokio::test]
async fn reingesting_identical_content_is_rejected() {
    let orchestrator = seeded_orchestrator().await;

    let err = orchestrator
        .ingest(fixtures::episode_2_8_script())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Ingest(IngestError::DuplicateContent { .. })
    ));
}

#[tokio::test]
async fn draft_validation_reports_the_planted_issues() {
    let orchestrator = seeded_orchestrator().await;
    let request = ValidationRequest {
        script: fixtures::draft_script_with_issues(),
        universe: fixtures::universe(),
        episode: fixtures::draft_episode(),
    };

    let report = orchestrator
        .validate(request, CancelFlag::new())
        .await
        .unwrap();

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.issues[0].line, fixtures::WHEELCHAIR_LINE);
    assert!(!report.degraded);
}

#[tokio::test]
async fn pre_cancelled_validation_returns_cancelled() {
    let orchestrator = seeded_orchestrator().await;
    let request = ValidationRequest {
        script: fixtures::draft_script_with_issues(),
        universe: fixtures::universe(),
        episode: fixtures::draft_episode(),
    };
    let cancel = CancelFlag::new();
    cancel.cancel();

    let err = orchestrator.validate(request, cancel).await.unwrap_err();
    assert!(matches!(err, PipelineError::Cancelled));
}

#[tokio::test]
async fn cancelled_search_returns_cancelled() {
    let orchestrator = seeded_orchestrator().await;
    let cancel = CancelFlag::new();
    cancel.cancel();

    let err = orchestrator
        .search(
            Query::new("Can Roy use a wheelchair in Season 4?", fixtures::universe()),
            cancel,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Cancelled));
}

#[tokio::test]
async fn exhausted_retrieval_budget_degrades_the_answer() {
    let config = PipelineConfig {
        retrieval_timeout: Duration::ZERO,
        ..Default::default()
    };
    let orchestrator = orchestrator(config);

    let answer = orchestrator
        .search(Query::new("wheelchair", fixtures::universe()), CancelFlag::new())
        .await
        .unwrap();

    assert!(answer.degraded);
    assert!(answer.is_insufficient());
    assert!(answer.citations.is_empty());
}

#[tokio::test]
async fn exhausted_ingest_budget_is_a_timeout_error() {
    let config = PipelineConfig {
        ingest_timeout: Duration::ZERO,
        ..Default::default()
    };
    let orchestrator = orchestrator(config);

    let err = orchestrator
        .ingest(fixtures::episode_2_8_script())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::StageTimeout {
            stage: stages::INGEST,
            ..
        }
    ));
}
