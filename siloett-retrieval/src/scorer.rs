//! Composite relevance scoring for fused candidates.
//!
//! Weights favor semantic rank but leave room for canon authority:
//! a character bible entry with the same semantic rank as a stray note
//! should win.

use siloett_core::canon::CanonFact;

pub const WEIGHT_SEMANTIC: f64 = 0.55;
pub const WEIGHT_KIND: f64 = 0.15;
pub const WEIGHT_SCOPE: f64 = 0.15;
pub const WEIGHT_KEYWORD: f64 = 0.15;

/// Composite score in [0, 1]. `fused_norm` is the fact's RRF score
/// normalized by the best surviving candidate; `keyword` is the
/// precomputed [`keyword_overlap`].
pub fn composite_score(fact: &CanonFact, fused_norm: f64, keyword: f64) -> f64 {
    let semantic = fused_norm.clamp(0.0, 1.0);
    let kind = f64::from(fact.document_kind.specificity()) / 4.0;
    let scope = scope_factor(fact);

    WEIGHT_SEMANTIC * semantic + WEIGHT_KIND * kind + WEIGHT_SCOPE * scope + WEIGHT_KEYWORD * keyword
}

fn scope_factor(fact: &CanonFact) -> f64 {
    if fact.scope.from.is_some() {
        1.0
    } else if fact.scope.until.is_some() {
        0.5
    } else {
        0.0
    }
}

/// Fraction of query tokens found in the fact's subject or statement.
/// Zero overlap means the fact shares no vocabulary with the query at
/// all; generation treats such hits as noise, not support.
pub fn keyword_overlap(fact: &CanonFact, query_tokens: &[String]) -> f64 {
    if query_tokens.is_empty() {
        return 0.0;
    }
    let haystack = format!("{} {}", fact.subject, fact.statement).to_lowercase();
    let fact_tokens: Vec<&str> = tokenize(&haystack);
    let hits = query_tokens
        .iter()
        .filter(|token| fact_tokens.contains(&token.as_str()))
        .count();
    hits as f64 / query_tokens.len() as f64
}

/// Lowercased alphanumeric tokens of length >= 2, matching the FTS
/// sanitizer's notion of an indexable token.
pub fn query_tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    tokenize(&lower).into_iter().map(str::to_string).collect()
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.len() >= 2)
        .collect()
}
