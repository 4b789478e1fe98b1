//! Validity scopes: the episode range over which a fact is authoritative.
//!
//! Supersession is modeled as scope precedence over an append-only fact
//! log, never as in-place mutation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::episode::EpisodeRef;

/// The episode range a fact holds over. Both ends optional; a fully
/// unscoped fact applies everywhere but loses to any scoped fact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityScope {
    /// Fact holds from this episode onward (inclusive).
    pub from: Option<EpisodeRef>,
    /// Fact stops holding after this episode (inclusive).
    pub until: Option<EpisodeRef>,
}

impl ValidityScope {
    pub fn from_episode(episode: EpisodeRef) -> Self {
        Self {
            from: Some(episode),
            until: None,
        }
    }

    pub fn unscoped() -> Self {
        Self::default()
    }

    /// Whether the fact applies at the given episode context.
    /// With no context, every fact applies (precedence still ranks them).
    pub fn applies_at(&self, as_of: Option<EpisodeRef>) -> bool {
        let Some(episode) = as_of else { return true };
        self.from.map_or(true, |from| from <= episode)
            && self.until.map_or(true, |until| episode <= until)
    }

    /// Precedence between two scopes for the same subject:
    /// scoped-from beats unscoped; a later `from` beats an earlier one.
    /// `Equal` means neither supersedes the other (potential conflict).
    pub fn cmp_specificity(&self, other: &ValidityScope) -> Ordering {
        match (self.from, other.from) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_beats_unscoped() {
        let scoped = ValidityScope::from_episode(EpisodeRef::new(2, 8));
        let unscoped = ValidityScope::unscoped();
        assert_eq!(scoped.cmp_specificity(&unscoped), Ordering::Greater);
        assert_eq!(unscoped.cmp_specificity(&scoped), Ordering::Less);
    }

    #[test]
    fn later_from_beats_earlier() {
        let early = ValidityScope::from_episode(EpisodeRef::new(1, 4));
        let late = ValidityScope::from_episode(EpisodeRef::new(2, 8));
        assert_eq!(late.cmp_specificity(&early), Ordering::Greater);
    }

    #[test]
    fn applies_at_respects_bounds() {
        let scope = ValidityScope {
            from: Some(EpisodeRef::new(2, 8)),
            until: Some(EpisodeRef::new(3, 6)),
        };
        assert!(!scope.applies_at(Some(EpisodeRef::new(2, 7))));
        assert!(scope.applies_at(Some(EpisodeRef::new(2, 8))));
        assert!(scope.applies_at(Some(EpisodeRef::new(3, 6))));
        assert!(!scope.applies_at(Some(EpisodeRef::new(4, 1))));
        assert!(scope.applies_at(None));
    }
}
