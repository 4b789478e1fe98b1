//! Confidence calibration.
//!
//! Blends three signals: how relevant the best supporting fact is, how
//! much the supporting facts agree in polarity, and whether the answer
//! rests on more than one fact. Corroboration saturates at two
//! supporters; canon questions rarely have more independent sources.

pub const WEIGHT_TOP_SCORE: f64 = 0.35;
pub const WEIGHT_AGREEMENT: f64 = 0.35;
pub const WEIGHT_CORROBORATION: f64 = 0.30;

/// Integer confidence in 0–100.
pub fn confidence(top_score: f64, agreement: f64, supporters: usize) -> u8 {
    let corroboration = (supporters.min(2) as f64) / 2.0;
    let blended = WEIGHT_TOP_SCORE * top_score.clamp(0.0, 1.0)
        + WEIGHT_AGREEMENT * agreement.clamp(0.0, 1.0)
        + WEIGHT_CORROBORATION * corroboration;
    (blended * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_agreeing_relevant_facts_land_in_the_high_band() {
        assert!(confidence(0.75, 1.0, 2) >= 90);
        assert!(confidence(0.82, 1.0, 2) >= 90);
    }

    #[test]
    fn disagreement_drags_confidence_down() {
        let agreed = confidence(0.8, 1.0, 2);
        let split = confidence(0.8, 0.5, 2);
        assert!(split < agreed);
    }

    #[test]
    fn single_weak_fact_scores_modestly() {
        let c = confidence(0.3, 1.0, 1);
        assert!(c < 70, "got {c}");
    }

    #[test]
    fn bounds_hold_at_the_extremes() {
        assert_eq!(confidence(0.0, 0.0, 0), 0);
        assert_eq!(confidence(1.0, 1.0, 5), 100);
    }
}
