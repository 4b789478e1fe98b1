//! # siloett-citation
//!
//! Builds citations from stored facts and verifies that every citation
//! resolves to a real document containing the quoted text. Nothing in
//! the system may emit a citation that did not pass through here.

pub mod engine;

pub use engine::{citation_from_fact, CitationTracker};
