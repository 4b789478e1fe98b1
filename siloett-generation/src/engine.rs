//! Answer assembly from ranked retrieval hits.

use std::collections::BTreeMap;

use tracing::debug;

use siloett_core::canon::Citation;
use siloett_core::config::PipelineConfig;
use siloett_core::constants::HEDGED_CONFIDENCE_CAP;
use siloett_core::errors::CitationError;
use siloett_core::models::{Answer, Query};
use siloett_core::Polarity;

use siloett_citation::CitationTracker;
use siloett_retrieval::RankedFact;

pub struct GenerationEngine {
    tracker: CitationTracker,
    config: PipelineConfig,
}

impl GenerationEngine {
    pub fn new(tracker: CitationTracker, config: PipelineConfig) -> Self {
        Self { tracker, config }
    }

    /// Build a cited answer from retrieval output.
    ///
    /// Hits below the support threshold or sharing no vocabulary with
    /// the query are discarded. The best-supported subject group
    /// answers; within it the precedence winner speaks and the rest
    /// corroborate. Citation failures abort the answer.
    pub fn answer(&self, query: &Query, ranked: &[RankedFact]) -> Result<Answer, CitationError> {
        let supporters: Vec<&RankedFact> = ranked
            .iter()
            .filter(|hit| hit.score >= self.config.min_support_score && hit.keyword > 0.0)
            .collect();
        if supporters.is_empty() {
            debug!(query = %query.text, "no canon support");
            return Ok(Answer::insufficient(0));
        }

        // Group supporters by subject; the group with the most combined
        // support answers. BTreeMap keeps group selection deterministic
        // when totals tie.
        let mut groups: BTreeMap<&str, Vec<&RankedFact>> = BTreeMap::new();
        for hit in &supporters {
            groups
                .entry(hit.fact.subject.as_str())
                .or_default()
                .push(*hit);
        }
        let group = groups
            .into_iter()
            .max_by(|(a_subject, a), (b_subject, b)| {
                let a_total: f64 = a.iter().map(|h| h.score).sum();
                let b_total: f64 = b.iter().map(|h| h.score).sum();
                a_total
                    .partial_cmp(&b_total)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| b_subject.cmp(a_subject))
            })
            .map(|(_, hits)| hits)
            .unwrap_or_default();

        let lead = match group
            .iter()
            .max_by(|a, b| a.fact.cmp_precedence(&b.fact))
        {
            Some(lead) => *lead,
            None => return Ok(Answer::insufficient(0)),
        };

        let agreeing = group
            .iter()
            .filter(|hit| hit.fact.polarity == lead.fact.polarity)
            .count();
        let agreement = agreeing as f64 / group.len() as f64;
        let conflicted = group
            .iter()
            .any(|hit| hit.fact.conflicts_without_ordering(&lead.fact));
        let top_score = group
            .iter()
            .map(|hit| hit.score)
            .fold(0.0_f64, f64::max);

        let mut confidence = crate::confidence::confidence(top_score, agreement, group.len());
        if conflicted {
            // Equally scoped facts disagree: the answer is a hedge no
            // matter how relevant the sources are.
            confidence = confidence.min(HEDGED_CONFIDENCE_CAP);
        }
        if confidence < self.config.confidence_floor {
            return Ok(Answer::insufficient(confidence));
        }

        // Cite every group member, lead first, then by retrieval rank.
        let mut citations: Vec<Citation> = Vec::with_capacity(group.len());
        citations.push(self.tracker.cite(&lead.fact)?);
        for hit in &group {
            if hit.fact.id == lead.fact.id {
                continue;
            }
            let citation = self.tracker.cite(&hit.fact)?;
            if !citations.contains(&citation) {
                citations.push(citation);
            }
        }

        let text = match lead.fact.polarity {
            Polarity::Negates => format!("No. {}", lead.fact.statement),
            Polarity::Affirms => lead.fact.statement.clone(),
        };

        debug!(
            subject = %lead.fact.subject,
            confidence,
            citations = citations.len(),
            conflicted,
            "answer assembled"
        );
        Ok(Answer {
            text,
            confidence,
            citations,
            degraded: false,
        })
    }
}
