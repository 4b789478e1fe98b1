//! # siloett-retrieval
//!
//! Hybrid retrieval over the canon store. Lexical (FTS5/BM25) and
//! vector (hashed TF-IDF cosine) result lists are fused with reciprocal
//! rank fusion, filtered by episode context, then re-ranked with a
//! composite score blending semantic rank, document-kind authority,
//! scope specificity, and keyword overlap.

pub mod engine;
pub mod filters;
pub mod rrf_fusion;
pub mod scorer;

pub use engine::{RankedFact, RetrievalEngine};
pub use filters::RetrievalFilters;
