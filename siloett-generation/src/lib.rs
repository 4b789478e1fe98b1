//! # siloett-generation
//!
//! Assembles answers strictly from retrieved canon facts. Every claim
//! in an answer traces to a verified citation; when support is too
//! thin, the fixed insufficient-canon response goes out instead of a
//! guess.

pub mod confidence;
pub mod engine;

pub use engine::GenerationEngine;
