//! The orchestrator: async entry points over the blocking engines.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::spawn_blocking;
use tokio::time::timeout;
use tracing::{info, warn};

use siloett_core::cancel::CancelFlag;
use siloett_core::canon::{DocumentDraft, DocumentId};
use siloett_core::config::PipelineConfig;
use siloett_core::constants::stages;
use siloett_core::errors::{PipelineError, RetrievalError, SiloettError, ValidationError};
use siloett_core::models::{Answer, Query, ValidationReport};
use siloett_core::traits::{ICanonStore, IEmbeddingProvider};

use siloett_citation::CitationTracker;
use siloett_embeddings::index_document_facts;
use siloett_generation::GenerationEngine;
use siloett_retrieval::{RetrievalEngine, RetrievalFilters};
use siloett_validation::{ValidationEngine, ValidationRequest};

/// Front door for the whole system. Holds one of each engine over a
/// shared store; per-request context travels in the request, so a
/// single orchestrator serves concurrent callers.
pub struct Orchestrator {
    store: Arc<dyn ICanonStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    retrieval: Arc<RetrievalEngine>,
    generation: Arc<GenerationEngine>,
    validation: Arc<ValidationEngine>,
    tracker: CitationTracker,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn ICanonStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: PipelineConfig,
    ) -> Self {
        let retrieval = Arc::new(RetrievalEngine::new(
            store.clone(),
            embedder.clone(),
            config.clone(),
        ));
        let generation = Arc::new(GenerationEngine::new(
            CitationTracker::new(store.clone()),
            config.clone(),
        ));
        let validation = Arc::new(ValidationEngine::new(store.clone(), config.clone()));
        let tracker = CitationTracker::new(store.clone());
        Self {
            store,
            embedder,
            retrieval,
            generation,
            validation,
            tracker,
            config,
        }
    }

    /// Ingest a canon document, then embed its extracted facts so they
    /// are vector-searchable. Exceeding the ingest budget is an error,
    /// not a degradation: a half-indexed document must not look healthy.
    pub async fn ingest(&self, draft: DocumentDraft) -> Result<DocumentId, PipelineError> {
        let store = self.store.clone();
        let embedder = self.embedder.clone();
        let budget = self.config.ingest_timeout;

        let outcome = self
            .run_stage(stages::INGEST, budget, move || {
                let id = store.ingest(&draft)?;
                let indexed = index_document_facts(store.as_ref(), embedder.as_ref(), &id)
                    .map_err(into_indexing_err)?;
                info!(document = %id, facts = indexed, "document ingested and indexed");
                Ok::<DocumentId, PipelineError>(id)
            })
            .await?;
        match outcome {
            Some(result) => result,
            None => Err(PipelineError::StageTimeout {
                stage: stages::INGEST,
                budget_ms: budget.as_millis() as u64,
            }),
        }
    }

    /// Answer a canon query. Retrieval and generation each run under
    /// their own budget; if either times out the caller gets the fixed
    /// insufficient-canon answer marked degraded rather than an error.
    /// Cancellation is checked inside retrieval per candidate and at
    /// every stage boundary. Every outgoing citation is re-verified
    /// against the store first.
    pub async fn search(&self, query: Query, cancel: CancelFlag) -> Result<Answer, PipelineError> {
        let retrieval = self.retrieval.clone();
        let retrieval_query = query.clone();
        let retrieval_cancel = cancel.clone();
        let ranked = match self
            .run_stage(stages::RETRIEVAL, self.config.retrieval_timeout, move || {
                retrieval.retrieve(&retrieval_query, &RetrievalFilters::none(), &retrieval_cancel)
            })
            .await?
        {
            Some(Err(RetrievalError::Cancelled)) => return Err(PipelineError::Cancelled),
            Some(result) => result?,
            None => return Ok(degraded_insufficient()),
        };
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let generation = self.generation.clone();
        let generation_query = query.clone();
        let answer = match self
            .run_stage(stages::GENERATION, self.config.generation_timeout, move || {
                generation.answer(&generation_query, &ranked)
            })
            .await?
        {
            Some(result) => result?,
            None => return Ok(degraded_insufficient()),
        };

        // Final gate: an unverifiable citation aborts the response.
        self.tracker.verify_all(&answer.citations)?;
        info!(
            query = %query.text,
            confidence = answer.confidence,
            citations = answer.citations.len(),
            "search complete"
        );
        Ok(answer)
    }

    /// Validate a draft script against canon. Per-category budgets are
    /// enforced inside the engine, so the job itself carries no outer
    /// timeout; cancellation fails the whole job.
    pub async fn validate(
        &self,
        request: ValidationRequest,
        cancel: CancelFlag,
    ) -> Result<ValidationReport, PipelineError> {
        let validation = self.validation.clone();
        let result = spawn_blocking(move || validation.validate(&request, &cancel))
            .await
            .map_err(|_| PipelineError::StageAborted {
                stage: stages::VALIDATION,
            })?;
        match result {
            Ok(report) => Ok(report),
            Err(ValidationError::Cancelled) => Err(PipelineError::Cancelled),
            Err(err) => Err(PipelineError::Validation(err)),
        }
    }

    /// Run one stage on the blocking pool under a budget. `Ok(None)`
    /// means the budget elapsed; the stage keeps running detached, per
    /// the rule that sibling stages are never torn down.
    async fn run_stage<T, F>(
        &self,
        stage: &'static str,
        budget: Duration,
        work: F,
    ) -> Result<Option<T>, PipelineError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        match timeout(budget, spawn_blocking(work)).await {
            Ok(Ok(value)) => Ok(Some(value)),
            Ok(Err(join)) => {
                warn!(stage, error = %join, "stage task aborted");
                Err(PipelineError::StageAborted { stage })
            }
            Err(_) => {
                warn!(
                    stage,
                    budget_ms = budget.as_millis() as u64,
                    "stage exceeded its budget"
                );
                Ok(None)
            }
        }
    }
}

fn degraded_insufficient() -> Answer {
    let mut answer = Answer::insufficient(0);
    answer.degraded = true;
    answer
}

fn into_indexing_err(err: SiloettError) -> PipelineError {
    match err {
        SiloettError::Store(store) => PipelineError::Store(store),
        other => PipelineError::Indexing {
            reason: other.to_string(),
        },
    }
}
