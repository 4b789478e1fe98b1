//! Embedding provider contract.

use crate::errors::SiloettResult;

/// Produces fixed-dimension vectors for semantic similarity search.
pub trait IEmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> SiloettResult<Vec<f32>>;

    fn embed_batch(&self, texts: &[String]) -> SiloettResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize;

    fn name(&self) -> &str;
}
