//! Insert and query canon facts. Facts from superseded documents are
//! invisible to every read path.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use siloett_core::canon::{
    CanonFact, DocumentId, DocumentLocator, FactId, LineRange, UniverseId, ValidityScope,
};
use siloett_core::errors::SiloettResult;

use super::{
    embedding_to_blob, episode_from_column, episode_to_column, kind_from_column,
    polarity_from_column, polarity_to_column,
};
use crate::to_store_err;

/// Fact columns joined with the owning document's title and kind.
pub(crate) const FACT_SELECT: &str = "SELECT f.id, f.document_id, f.universe, f.subject, f.statement, f.quote,
            f.episode, f.page, f.line_start, f.line_end, f.section,
            f.scope_from, f.scope_until, f.polarity, f.extracted_at,
            d.title, d.kind
     FROM facts f
     JOIN documents d ON d.id = f.document_id AND d.superseded_by IS NULL";

pub fn insert_fact(conn: &Connection, fact: &CanonFact) -> SiloettResult<i64> {
    conn.execute(
        "INSERT INTO facts (
            id, document_id, universe, subject, statement, quote,
            episode, page, line_start, line_end, section,
            scope_from, scope_until, polarity, extracted_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            fact.id.as_str(),
            fact.document_id.as_str(),
            fact.universe.as_str(),
            fact.subject,
            fact.statement,
            fact.quote,
            episode_to_column(fact.locator.episode),
            fact.locator.page,
            fact.locator.lines.map(|r| r.start),
            fact.locator.lines.map(|r| r.end),
            fact.locator.section,
            episode_to_column(fact.scope.from),
            episode_to_column(fact.scope.until),
            polarity_to_column(fact.polarity),
            fact.extracted_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;

    let rowid = conn.last_insert_rowid();

    // Mirror into the FTS index (external-content table).
    conn.execute(
        "INSERT INTO fact_fts (rowid, subject, statement, quote) VALUES (?1, ?2, ?3, ?4)",
        params![rowid, fact.subject, fact.statement, fact.quote],
    )
    .map_err(|e| to_store_err(e.to_string()))?;

    Ok(rowid)
}

pub fn set_embedding(conn: &Connection, fact_id: &FactId, embedding: &[f32]) -> SiloettResult<()> {
    let changed = conn
        .execute(
            "UPDATE facts SET embedding = ?2 WHERE id = ?1",
            params![fact_id.as_str(), embedding_to_blob(embedding)],
        )
        .map_err(|e| to_store_err(e.to_string()))?;
    if changed == 0 {
        tracing::warn!(fact_id = %fact_id, "set_embedding: no such fact");
    }
    Ok(())
}

/// All facts for one subject, unsorted (precedence sorting is done by
/// the caller via `CanonFact::cmp_precedence`).
pub fn facts_for_subject(
    conn: &Connection,
    universe: &UniverseId,
    subject: &str,
) -> SiloettResult<Vec<CanonFact>> {
    let sql = format!("{FACT_SELECT} WHERE f.universe = ?1 AND f.subject = ?2");
    query_facts(conn, &sql, params![universe.as_str(), subject])
}

pub fn facts_with_subject_prefix(
    conn: &Connection,
    universe: &UniverseId,
    prefix: &str,
) -> SiloettResult<Vec<CanonFact>> {
    let pattern = format!("{}%", prefix.replace('%', ""));
    let sql = format!("{FACT_SELECT} WHERE f.universe = ?1 AND f.subject LIKE ?2");
    query_facts(conn, &sql, params![universe.as_str(), pattern])
}

pub fn facts_for_document(conn: &Connection, id: &DocumentId) -> SiloettResult<Vec<CanonFact>> {
    // Deliberately joins without the superseded filter: callers asking
    // by document id want that document's facts, active or not.
    let sql = "SELECT f.id, f.document_id, f.universe, f.subject, f.statement, f.quote,
            f.episode, f.page, f.line_start, f.line_end, f.section,
            f.scope_from, f.scope_until, f.polarity, f.extracted_at,
            d.title, d.kind
     FROM facts f
     JOIN documents d ON d.id = f.document_id
     WHERE f.document_id = ?1";
    query_facts(conn, sql, params![id.as_str()])
}

pub(crate) fn query_facts(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> SiloettResult<Vec<CanonFact>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, parse_fact_row)
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut facts = Vec::new();
    for row in rows {
        let fact = row.map_err(|e| to_store_err(e.to_string()))??;
        facts.push(fact);
    }
    Ok(facts)
}

pub(crate) fn parse_fact_row(row: &Row<'_>) -> rusqlite::Result<SiloettResult<CanonFact>> {
    let id: String = row.get(0)?;
    let document_id: String = row.get(1)?;
    let universe: String = row.get(2)?;
    let subject: String = row.get(3)?;
    let statement: String = row.get(4)?;
    let quote: String = row.get(5)?;
    let episode_raw: Option<String> = row.get(6)?;
    let page: Option<u32> = row.get(7)?;
    let line_start: Option<u32> = row.get(8)?;
    let line_end: Option<u32> = row.get(9)?;
    let section: Option<String> = row.get(10)?;
    let scope_from_raw: Option<String> = row.get(11)?;
    let scope_until_raw: Option<String> = row.get(12)?;
    let polarity_raw: String = row.get(13)?;
    let extracted_at_raw: String = row.get(14)?;
    let document_title: String = row.get(15)?;
    let kind_raw: String = row.get(16)?;

    let build = || -> SiloettResult<CanonFact> {
        let lines = match (line_start, line_end) {
            (Some(start), Some(end)) => Some(LineRange::new(start, end)),
            _ => None,
        };
        let extracted_at = DateTime::parse_from_rfc3339(&extracted_at_raw)
            .map_err(|e| to_store_err(format!("bad extracted_at: {e}")))?
            .with_timezone(&Utc);

        Ok(CanonFact {
            id: FactId::from_string(id),
            universe: UniverseId::new(universe),
            subject,
            statement,
            quote,
            document_id: DocumentId::from_string(document_id),
            document_title,
            document_kind: kind_from_column(&kind_raw)?,
            locator: DocumentLocator {
                episode: episode_from_column(episode_raw)?,
                page,
                lines,
                section,
            },
            scope: ValidityScope {
                from: episode_from_column(scope_from_raw)?,
                until: episode_from_column(scope_until_raw)?,
            },
            polarity: polarity_from_column(&polarity_raw)?,
            extracted_at,
        })
    };

    Ok(build())
}
