//! The retrieval engine: search, fuse, filter, score, rank.

use std::sync::Arc;

use tracing::debug;

use siloett_core::cancel::CancelFlag;
use siloett_core::canon::CanonFact;
use siloett_core::config::PipelineConfig;
use siloett_core::errors::{RetrievalError, SiloettError};
use siloett_core::models::Query;
use siloett_core::traits::{ICanonStore, IEmbeddingProvider};

use crate::filters::RetrievalFilters;
use crate::rrf_fusion::rrf_fuse;
use crate::scorer::{composite_score, keyword_overlap, query_tokens};

/// A retrieval hit with its composite score and raw fused rank score.
#[derive(Debug, Clone)]
pub struct RankedFact {
    pub fact: CanonFact,
    /// Composite relevance in [0, 1].
    pub score: f64,
    /// Raw RRF score before normalization (diagnostic).
    pub fused: f64,
    /// Query-token overlap in [0, 1]. Zero means the hit shares no
    /// vocabulary with the query; generation discards such hits.
    pub keyword: f64,
}

pub struct RetrievalEngine {
    store: Arc<dyn ICanonStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    config: PipelineConfig,
}

impl RetrievalEngine {
    pub fn new(
        store: Arc<dyn ICanonStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            config,
        }
    }

    /// Retrieve the top-k facts relevant to the query, honoring the
    /// query's episode context: facts whose validity scope does not
    /// cover `as_of` never surface. Cancellation is checked before
    /// each search leg and per fused candidate, never mid-candidate.
    pub fn retrieve(
        &self,
        query: &Query,
        filters: &RetrievalFilters,
        cancel: &CancelFlag,
    ) -> Result<Vec<RankedFact>, RetrievalError> {
        // Over-fetch per leg so fusion has something to disagree about.
        let fetch = self.config.top_k * 4;

        checkpoint(cancel)?;
        let lexical = self
            .store
            .search_facts_fts(&query.universe, &query.text, fetch)
            .map_err(into_retrieval_err)?;

        checkpoint(cancel)?;
        let embedding = self
            .embedder
            .embed(&query.text)
            .map_err(|e| RetrievalError::EmbeddingFailed {
                reason: e.to_string(),
            })?;
        let vector = self
            .store
            .search_facts_vector(&query.universe, &embedding, fetch)
            .map_err(into_retrieval_err)?;

        debug!(
            lexical = lexical.len(),
            vector = vector.len(),
            "retrieval legs complete"
        );

        let fused = rrf_fuse(&[lexical, vector], self.config.rrf_k);
        let mut survivors: Vec<(CanonFact, f64)> = Vec::with_capacity(fused.len());
        for (fact, score) in fused {
            checkpoint(cancel)?;
            if fact.scope.applies_at(query.as_of) && filters.accepts(&fact) {
                survivors.push((fact, score));
            }
        }

        let max_fused = survivors
            .iter()
            .map(|(_, fused)| *fused)
            .fold(0.0_f64, f64::max);
        if max_fused == 0.0 {
            return Ok(Vec::new());
        }

        let tokens = query_tokens(&query.text);
        let mut ranked: Vec<RankedFact> = survivors
            .into_iter()
            .map(|(fact, fused)| {
                let keyword = keyword_overlap(&fact, &tokens);
                RankedFact {
                    score: composite_score(&fact, fused / max_fused, keyword),
                    fact,
                    fused,
                    keyword,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.fact
                        .document_kind
                        .specificity()
                        .cmp(&a.fact.document_kind.specificity())
                })
                .then_with(|| a.fact.id.as_str().cmp(b.fact.id.as_str()))
        });
        ranked.truncate(self.config.top_k);
        Ok(ranked)
    }
}

fn checkpoint(cancel: &CancelFlag) -> Result<(), RetrievalError> {
    if cancel.is_cancelled() {
        return Err(RetrievalError::Cancelled);
    }
    Ok(())
}

fn into_retrieval_err(err: SiloettError) -> RetrievalError {
    match err {
        SiloettError::Store(store) => RetrievalError::Store(store),
        other => RetrievalError::SearchFailed {
            reason: other.to_string(),
        },
    }
}
