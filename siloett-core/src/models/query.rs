//! Free-text canon queries.

use serde::{Deserialize, Serialize};

use crate::canon::{EpisodeRef, UniverseId};

/// A question against one universe's canon. Per-request context is
/// carried here explicitly — the pipeline holds no session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub universe: UniverseId,
    /// Episode context for validity-scope resolution, e.g. "in Season 4"
    /// queries pass the latest episode of season 4.
    pub as_of: Option<EpisodeRef>,
}

impl Query {
    pub fn new(text: impl Into<String>, universe: UniverseId) -> Self {
        Self {
            text: text.into(),
            universe,
            as_of: None,
        }
    }

    pub fn as_of(mut self, episode: EpisodeRef) -> Self {
        self.as_of = Some(episode);
        self
    }
}
