//! Reciprocal rank fusion of independently ranked result lists.

use std::collections::HashMap;

use siloett_core::canon::{CanonFact, FactId};

/// Fuse ranked lists into one candidate set. Each list contributes
/// `1 / (k + rank)` per fact, so facts present in several lists rise.
/// Input scores are only used for their ordering; lists must already be
/// sorted best-first.
pub fn rrf_fuse(lists: &[Vec<(CanonFact, f64)>], k: u32) -> Vec<(CanonFact, f64)> {
    let mut fused: HashMap<FactId, (CanonFact, f64)> = HashMap::new();

    for list in lists {
        for (rank, (fact, _)) in list.iter().enumerate() {
            let contribution = 1.0 / (k as f64 + rank as f64 + 1.0);
            fused
                .entry(fact.id.clone())
                .and_modify(|(_, score)| *score += contribution)
                .or_insert_with(|| (fact.clone(), contribution));
        }
    }

    let mut candidates: Vec<(CanonFact, f64)> = fused.into_values().collect();
    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.id.as_str().cmp(b.0.id.as_str()))
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use siloett_core::canon::{
        DocumentId, DocumentKind, DocumentLocator, Polarity, UniverseId, ValidityScope,
    };

    fn fact(id: &str) -> CanonFact {
        CanonFact {
            id: FactId::from_string(id.to_string()),
            universe: UniverseId::default(),
            subject: "roy/physical_status".to_string(),
            statement: String::new(),
            quote: String::new(),
            document_id: DocumentId::generate(),
            document_title: String::new(),
            document_kind: DocumentKind::Notes,
            locator: DocumentLocator::default(),
            scope: ValidityScope::unscoped(),
            polarity: Polarity::Affirms,
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn fact_in_both_lists_outranks_single_list_leaders() {
        let lexical = vec![(fact("a"), 10.0), (fact("b"), 5.0)];
        let vector = vec![(fact("c"), 0.9), (fact("b"), 0.8)];

        let fused = rrf_fuse(&[lexical, vector], 60);
        assert_eq!(fused[0].0.id.as_str(), "b");
    }

    #[test]
    fn ties_break_on_fact_id_for_determinism() {
        let a = vec![(fact("z"), 1.0)];
        let b = vec![(fact("a"), 1.0)];

        let fused = rrf_fuse(&[a, b], 60);
        assert_eq!(fused[0].0.id.as_str(), "a");
        assert_eq!(fused[1].0.id.as_str(), "z");
    }

    #[test]
    fn empty_lists_fuse_to_nothing() {
        assert!(rrf_fuse(&[Vec::new(), Vec::new()], 60).is_empty());
    }
}
