//! Cited answers with calibrated confidence.

use serde::{Deserialize, Serialize};

use crate::canon::Citation;
use crate::constants::INSUFFICIENT_CANON_ANSWER;

/// An answer assembled strictly from retrieved canon facts.
///
/// Invariant: confidence below the configured floor forces the fixed
/// insufficient-canon text with zero citations; confidence at or above
/// the floor guarantees a non-empty, verified citation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    /// Calibrated support estimate, integer 0–100.
    pub confidence: u8,
    /// Ordered by supporting-fact rank.
    pub citations: Vec<Citation>,
    /// Set by the orchestrator when a stage timed out and the answer
    /// was produced from partial evidence.
    #[serde(default)]
    pub degraded: bool,
}

impl Answer {
    /// The fixed response when canon support is insufficient.
    pub fn insufficient(confidence: u8) -> Self {
        Self {
            text: INSUFFICIENT_CANON_ANSWER.to_string(),
            confidence,
            citations: Vec::new(),
            degraded: false,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.text == INSUFFICIENT_CANON_ANSWER
    }
}
