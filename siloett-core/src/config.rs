//! Pipeline configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunable knobs for the whole pipeline. One instance per orchestrator;
/// engines receive a shared reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Confidence floor (0–100). Answers below it become the fixed
    /// insufficient-canon response.
    pub confidence_floor: u8,
    /// Minimum composite retrieval score for a fact to count as support.
    pub min_support_score: f64,
    /// Candidates returned by retrieval.
    pub top_k: usize,
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Hashed TF-IDF embedding dimensions.
    pub embedding_dimensions: usize,
    pub retrieval_timeout: Duration,
    pub generation_timeout: Duration,
    /// Per-category budget inside a validation job, enforced
    /// cooperatively at segment boundaries.
    pub category_timeout: Duration,
    pub ingest_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_floor: constants::DEFAULT_CONFIDENCE_FLOOR,
            min_support_score: constants::DEFAULT_MIN_SUPPORT_SCORE,
            top_k: constants::DEFAULT_TOP_K,
            rrf_k: constants::DEFAULT_RRF_K,
            embedding_dimensions: constants::DEFAULT_EMBEDDING_DIMENSIONS,
            retrieval_timeout: Duration::from_millis(constants::DEFAULT_RETRIEVAL_TIMEOUT_MS),
            generation_timeout: Duration::from_millis(constants::DEFAULT_GENERATION_TIMEOUT_MS),
            category_timeout: Duration::from_millis(constants::DEFAULT_CATEGORY_TIMEOUT_MS),
            ingest_timeout: Duration::from_millis(constants::DEFAULT_INGEST_TIMEOUT_MS),
        }
    }
}
