//! Canon facts: atomic assertions extracted from documents at ingestion.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{DocumentId, DocumentKind, DocumentLocator, UniverseId};
use super::scope::ValidityScope;

/// Identifier of an extracted canon fact (UUID v4).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FactId(String);

impl FactId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a fact asserts or denies its subject predicate.
/// Drives agreement scoring in generation and contradiction checks
/// in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Affirms,
    Negates,
}

/// An atomic assertion about one subject, with its exact source location
/// and the episode range over which it holds.
///
/// Subjects are normalized keys, e.g. `roy/physical_status`,
/// `world/the_internet`, `timeline/s3e6`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonFact {
    pub id: FactId,
    pub universe: UniverseId,
    /// Normalized subject key.
    pub subject: String,
    /// The assertion in plain prose.
    pub statement: String,
    /// Verbatim text from the owning document backing the assertion.
    pub quote: String,
    pub document_id: DocumentId,
    /// Denormalized from the owning document for citation building.
    pub document_title: String,
    pub document_kind: DocumentKind,
    /// Location of the quote inside the owning document.
    pub locator: DocumentLocator,
    pub scope: ValidityScope,
    pub polarity: Polarity,
    pub extracted_at: DateTime<Utc>,
}

impl CanonFact {
    /// Precedence between two facts about the same subject:
    /// scope specificity, then locator precision, then extraction
    /// recency, then id for total determinism.
    pub fn cmp_precedence(&self, other: &CanonFact) -> Ordering {
        self.scope
            .cmp_specificity(&other.scope)
            .then(self.locator.precision().cmp(&other.locator.precision()))
            .then(self.extracted_at.cmp(&other.extracted_at))
            .then(other.id.as_str().cmp(self.id.as_str()))
    }

    /// Whether two facts about the same subject stand in unresolvable
    /// conflict: opposite polarity with equally specific scopes.
    pub fn conflicts_without_ordering(&self, other: &CanonFact) -> bool {
        self.subject == other.subject
            && self.polarity != other.polarity
            && self.scope.cmp_specificity(&other.scope) == Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::episode::EpisodeRef;

    fn fact(subject: &str, scope: ValidityScope, polarity: Polarity) -> CanonFact {
        CanonFact {
            id: FactId::generate(),
            universe: UniverseId::default(),
            subject: subject.to_string(),
            statement: String::new(),
            quote: String::new(),
            document_id: DocumentId::generate(),
            document_title: String::new(),
            document_kind: DocumentKind::Notes,
            locator: DocumentLocator::default(),
            scope,
            polarity,
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn scoped_fact_takes_precedence() {
        let scoped = fact(
            "roy/physical_status",
            ValidityScope::from_episode(EpisodeRef::new(2, 8)),
            Polarity::Negates,
        );
        let unscoped = fact("roy/physical_status", ValidityScope::unscoped(), Polarity::Affirms);
        assert_eq!(scoped.cmp_precedence(&unscoped), Ordering::Greater);
    }

    #[test]
    fn equal_scope_opposite_polarity_is_a_conflict() {
        let scope = ValidityScope::from_episode(EpisodeRef::new(2, 8));
        let a = fact("roy/physical_status", scope, Polarity::Negates);
        let b = fact("roy/physical_status", scope, Polarity::Affirms);
        assert!(a.conflicts_without_ordering(&b));

        let c = fact("roy/physical_status", ValidityScope::unscoped(), Polarity::Affirms);
        assert!(!a.conflicts_without_ordering(&c));
    }
}
