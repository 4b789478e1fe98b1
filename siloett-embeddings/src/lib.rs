//! # siloett-embeddings
//!
//! Deterministic hashed TF-IDF embedding provider. No model downloads,
//! no network — the same text always maps to the same vector, which
//! keeps retrieval reproducible across runs and test environments.

pub mod indexer;
pub mod tfidf;

pub use indexer::{embeddable_text, index_document_facts};
pub use tfidf::{cosine_similarity, HashedTfIdf};
