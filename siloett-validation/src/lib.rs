//! # siloett-validation
//!
//! Validates a draft script against stored canon. The draft is
//! segmented into addressable lines, then four category checks run
//! concurrently: character state, timeline, world rules, and character
//! voice. Each check is isolated — one failing or timing out flags its
//! category in the report without blocking the others.

pub mod assertions;
pub mod checks;
pub mod engine;
pub mod segment;

pub use engine::{ValidationEngine, ValidationRequest};
pub use segment::{segment, LineKind, ScriptLine};
