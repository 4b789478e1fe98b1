//! System-wide constants and defaults.

/// Fixed answer text returned when canon support falls below the confidence floor.
/// Never accompanied by citations and never mixed with speculative content.
pub const INSUFFICIENT_CANON_ANSWER: &str = "Insufficient canon to answer this query.";

/// Default confidence floor (0–100). Answers scoring below this return
/// [`INSUFFICIENT_CANON_ANSWER`] instead of a cited answer.
pub const DEFAULT_CONFIDENCE_FLOOR: u8 = 40;

/// Confidence cap applied when equally scoped facts conflict without a
/// precedence ordering. Keeps hedged answers out of the high band.
pub const HEDGED_CONFIDENCE_CAP: u8 = 69;

/// Minimum composite retrieval score for a fact to count as support.
pub const DEFAULT_MIN_SUPPORT_SCORE: f64 = 0.10;

/// Default number of candidates returned by retrieval.
pub const DEFAULT_TOP_K: usize = 8;

/// RRF smoothing constant. Higher k reduces the influence of any single list.
pub const DEFAULT_RRF_K: u32 = 60;

/// Dimension of the hashed TF-IDF embedding space.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;

/// Default per-stage timeouts, in milliseconds.
pub const DEFAULT_RETRIEVAL_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 1_000;
pub const DEFAULT_CATEGORY_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_INGEST_TIMEOUT_MS: u64 = 5_000;

/// Stage names carried in timeout errors and structured log fields.
pub mod stages {
    pub const INGEST: &str = "ingest";
    pub const RETRIEVAL: &str = "retrieval";
    pub const GENERATION: &str = "generation";
    pub const VALIDATION: &str = "validation";
}
