pub mod embedding;
pub mod store;

pub use embedding::IEmbeddingProvider;
pub use store::ICanonStore;
