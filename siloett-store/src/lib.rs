//! # siloett-store
//!
//! SQLite-backed Canon Store. Owns the connection pool, runs migrations,
//! extracts facts at ingestion, and serves fact lookup and search.
//!
//! Documents are immutable: re-ingesting a title+kind appends a new
//! version and marks the old one superseded. Facts form an append-only
//! log resolved by validity-scope precedence at read time.

pub mod audit;
pub mod engine;
pub mod extract;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::CanonStore;

use siloett_core::errors::{SiloettError, StoreError};

/// Map a low-level SQLite failure into the store error taxonomy.
pub(crate) fn to_store_err(message: impl Into<String>) -> SiloettError {
    SiloettError::Store(StoreError::Sqlite {
        message: message.into(),
    })
}
