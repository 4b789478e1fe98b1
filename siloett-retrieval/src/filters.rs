//! Candidate filtering by document kind and episode coordinates.

use siloett_core::canon::{CanonFact, DocumentKind, EpisodeRef};

/// Optional narrowing applied after fusion, before scoring.
#[derive(Debug, Clone, Default)]
pub struct RetrievalFilters {
    /// Restrict hits to these document kinds.
    pub kinds: Option<Vec<DocumentKind>>,
    /// Restrict hits to facts located in this episode range (inclusive).
    /// Facts without an episode locator pass.
    pub episode_range: Option<(EpisodeRef, EpisodeRef)>,
}

impl RetrievalFilters {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn kinds(kinds: Vec<DocumentKind>) -> Self {
        Self {
            kinds: Some(kinds),
            ..Default::default()
        }
    }

    pub fn accepts(&self, fact: &CanonFact) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&fact.document_kind) {
                return false;
            }
        }
        if let Some((lo, hi)) = self.episode_range {
            if let Some(episode) = fact.locator.episode {
                if episode < lo || episode > hi {
                    return false;
                }
            }
        }
        true
    }
}
