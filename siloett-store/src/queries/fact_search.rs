//! FTS5 and vector search over facts.

use rusqlite::{params, Connection};

use siloett_core::canon::{CanonFact, UniverseId};
use siloett_core::errors::SiloettResult;

use siloett_embeddings::cosine_similarity;

use super::embedding_from_blob;
use super::fact_ops::parse_fact_row;
use crate::to_store_err;

/// Search facts using FTS5, BM25-ranked. Score: higher is better.
pub fn search_fts(
    conn: &Connection,
    universe: &UniverseId,
    query: &str,
    limit: usize,
) -> SiloettResult<Vec<(CanonFact, f64)>> {
    let Some(match_expr) = to_match_expr(query) else {
        return Ok(Vec::new());
    };

    let mut stmt = conn
        .prepare(
            "SELECT f.id, f.document_id, f.universe, f.subject, f.statement, f.quote,
                    f.episode, f.page, f.line_start, f.line_end, f.section,
                    f.scope_from, f.scope_until, f.polarity, f.extracted_at,
                    d.title, d.kind, rank
             FROM fact_fts
             JOIN facts f ON f.rowid = fact_fts.rowid
             JOIN documents d ON d.id = f.document_id AND d.superseded_by IS NULL
             WHERE fact_fts MATCH ?1 AND f.universe = ?2
             ORDER BY rank
             LIMIT ?3",
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![match_expr, universe.as_str(), limit as i64], |row| {
            let rank: f64 = row.get(17)?;
            let fact = parse_fact_row(row)?;
            Ok((fact, rank))
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (fact, rank) = row.map_err(|e| to_store_err(e.to_string()))?;
        // FTS5 rank is negative BM25 (more negative = better match).
        results.push((fact?, -rank));
    }
    Ok(results)
}

/// Cosine-ranked search over stored fact embeddings.
pub fn search_vector(
    conn: &Connection,
    universe: &UniverseId,
    embedding: &[f32],
    limit: usize,
) -> SiloettResult<Vec<(CanonFact, f64)>> {
    let mut stmt = conn
        .prepare(
            "SELECT f.id, f.document_id, f.universe, f.subject, f.statement, f.quote,
                    f.episode, f.page, f.line_start, f.line_end, f.section,
                    f.scope_from, f.scope_until, f.polarity, f.extracted_at,
                    d.title, d.kind, f.embedding
             FROM facts f
             JOIN documents d ON d.id = f.document_id AND d.superseded_by IS NULL
             WHERE f.universe = ?1 AND f.embedding IS NOT NULL",
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![universe.as_str()], |row| {
            let blob: Vec<u8> = row.get(17)?;
            let fact = parse_fact_row(row)?;
            Ok((fact, blob))
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut scored = Vec::new();
    for row in rows {
        let (fact, blob) = row.map_err(|e| to_store_err(e.to_string()))?;
        let fact = fact?;
        let similarity = cosine_similarity(embedding, &embedding_from_blob(&blob));
        scored.push((fact, similarity));
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    Ok(scored)
}

/// Sanitize free text into an FTS5 OR-query. Returns `None` when the
/// text has no indexable tokens (punctuation-only input must not reach
/// the MATCH parser).
fn to_match_expr(query: &str) -> Option<String> {
    let tokens: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.len() >= 2)
        .map(|s| format!("\"{}\"", s.to_lowercase()))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" OR "))
    }
}
