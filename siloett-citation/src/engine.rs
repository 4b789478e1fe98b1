//! Citation construction and verification.

use std::sync::Arc;

use tracing::debug;

use siloett_core::canon::{CanonFact, Citation};
use siloett_core::errors::{CitationError, SiloettError};
use siloett_core::traits::ICanonStore;

/// Build a citation from a fact's denormalized source fields. Pure;
/// verification against the store happens in [`CitationTracker`].
pub fn citation_from_fact(fact: &CanonFact) -> Citation {
    Citation {
        source: fact.document_title.clone(),
        page: fact.locator.page,
        lines: fact.locator.lines.map(|range| range.to_string()),
        section: fact.locator.section.clone(),
        text: fact.quote.clone(),
        document_id: fact.document_id.clone(),
    }
}

/// Verifies citations against the canon store before they leave the
/// system. A failed verification is an internal invariant violation and
/// aborts the response rather than degrading it.
pub struct CitationTracker {
    store: Arc<dyn ICanonStore>,
}

impl CitationTracker {
    pub fn new(store: Arc<dyn ICanonStore>) -> Self {
        Self { store }
    }

    /// Build and verify a citation for a fact in one step.
    pub fn cite(&self, fact: &CanonFact) -> Result<Citation, CitationError> {
        let citation = citation_from_fact(fact);
        self.verify(&citation)?;
        Ok(citation)
    }

    /// Check that the citation resolves: the document exists, its title
    /// matches the citation source, and the quoted text appears
    /// verbatim in the document content.
    pub fn verify(&self, citation: &Citation) -> Result<(), CitationError> {
        let doc = self
            .store
            .get_document(&citation.document_id)
            .map_err(into_citation_err)?
            .ok_or_else(|| CitationError::Unverifiable {
                cited_source: citation.source.clone(),
                reason: "cited document no longer exists".to_string(),
            })?;

        if doc.title != citation.source {
            return Err(CitationError::Unverifiable {
                cited_source: citation.source.clone(),
                reason: format!("cited title does not match document '{}'", doc.title),
            });
        }
        if !doc.content.contains(&citation.text) {
            return Err(CitationError::Unverifiable {
                cited_source: citation.source.clone(),
                reason: "quoted text not found in document".to_string(),
            });
        }
        debug!(source = %citation.source, "citation verified");
        Ok(())
    }

    pub fn verify_all(&self, citations: &[Citation]) -> Result<(), CitationError> {
        for citation in citations {
            self.verify(citation)?;
        }
        Ok(())
    }
}

fn into_citation_err(err: SiloettError) -> CitationError {
    match err {
        SiloettError::Store(store) => CitationError::Store(store),
        other => CitationError::Unverifiable {
            cited_source: String::new(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use siloett_core::canon::{
        DocumentId, DocumentKind, DocumentLocator, FactId, LineRange, Polarity, UniverseId,
        ValidityScope,
    };

    fn fact_with_lines() -> CanonFact {
        CanonFact {
            id: FactId::generate(),
            universe: UniverseId::default(),
            subject: "roy/physical_status".to_string(),
            statement: "statement".to_string(),
            quote: "Roy stands up and pushes the wheelchair away.".to_string(),
            document_id: DocumentId::generate(),
            document_title: "Episode 2.8 Script".to_string(),
            document_kind: DocumentKind::Script,
            locator: DocumentLocator {
                page: Some(1),
                lines: Some(LineRange::new(45, 47)),
                ..Default::default()
            },
            scope: ValidityScope::unscoped(),
            polarity: Polarity::Negates,
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn citation_carries_source_locator_and_quote() {
        let citation = citation_from_fact(&fact_with_lines());
        assert_eq!(citation.source, "Episode 2.8 Script");
        assert_eq!(citation.page, Some(1));
        assert_eq!(citation.lines.as_deref(), Some("45-47"));
        assert!(citation.section.is_none());
        assert_eq!(citation.text, "Roy stands up and pushes the wheelchair away.");
    }
}
