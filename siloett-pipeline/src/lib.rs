//! # siloett-pipeline
//!
//! The orchestrator tying the engines together behind three async
//! operations: ingest a canon document, search canon with a cited
//! answer, and validate a draft script. Stages run on the blocking
//! pool under per-stage budgets; an answer stage that exceeds its
//! budget degrades the response instead of failing the request.

pub mod engine;
pub mod telemetry;

pub use engine::Orchestrator;
pub use telemetry::init_tracing;
