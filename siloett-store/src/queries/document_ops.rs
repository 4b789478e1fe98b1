//! Insert, fetch, and version documents.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use siloett_core::canon::{
    CanonDocument, DocumentId, DocumentKind, DocumentLocator, LineRange, UniverseId,
};
use siloett_core::errors::SiloettResult;

use super::{episode_from_column, episode_to_column, kind_from_column, kind_to_column};
use crate::to_store_err;

const DOCUMENT_COLUMNS: &str = "id, universe, title, kind, content, episode, page, \
     line_start, line_end, section, content_hash, ingested_at, superseded_by";

pub fn insert_document(conn: &Connection, doc: &CanonDocument) -> SiloettResult<()> {
    conn.execute(
        "INSERT INTO documents (
            id, universe, title, kind, content, episode, page,
            line_start, line_end, section, content_hash, ingested_at, superseded_by
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            doc.id.as_str(),
            doc.universe.as_str(),
            doc.title,
            kind_to_column(doc.kind),
            doc.content,
            episode_to_column(doc.locator.episode),
            doc.locator.page,
            doc.locator.lines.map(|r| r.start),
            doc.locator.lines.map(|r| r.end),
            doc.locator.section,
            doc.content_hash,
            doc.ingested_at.to_rfc3339(),
            doc.superseded_by.as_ref().map(|id| id.as_str().to_string()),
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

pub fn get_document(conn: &Connection, id: &DocumentId) -> SiloettResult<Option<CanonDocument>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"
        ))
        .map_err(|e| to_store_err(e.to_string()))?;
    let row = stmt
        .query_row(params![id.as_str()], parse_document_row)
        .optional()
        .map_err(|e| to_store_err(e.to_string()))?;
    row.transpose()
}

/// Latest non-superseded version of a (universe, title, kind) tuple.
pub fn find_active_version(
    conn: &Connection,
    universe: &UniverseId,
    title: &str,
    kind: DocumentKind,
) -> SiloettResult<Option<DocumentId>> {
    let id: Option<String> = conn
        .query_row(
            "SELECT id FROM documents
             WHERE universe = ?1 AND title = ?2 AND kind = ?3 AND superseded_by IS NULL",
            params![universe.as_str(), title, kind_to_column(kind)],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_store_err(e.to_string()))?;
    Ok(id.map(DocumentId::from_string))
}

/// Whether identical content is already active in the universe.
pub fn content_hash_exists(
    conn: &Connection,
    universe: &UniverseId,
    content_hash: &str,
) -> SiloettResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM documents
             WHERE universe = ?1 AND content_hash = ?2 AND superseded_by IS NULL",
            params![universe.as_str(), content_hash],
            |row| row.get(0),
        )
        .map_err(|e| to_store_err(e.to_string()))?;
    Ok(count > 0)
}

pub fn mark_superseded(
    conn: &Connection,
    old: &DocumentId,
    new: &DocumentId,
) -> SiloettResult<()> {
    conn.execute(
        "UPDATE documents SET superseded_by = ?2 WHERE id = ?1",
        params![old.as_str(), new.as_str()],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

pub fn document_count(conn: &Connection, universe: &UniverseId) -> SiloettResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM documents WHERE universe = ?1 AND superseded_by IS NULL",
            params![universe.as_str()],
            |row| row.get(0),
        )
        .map_err(|e| to_store_err(e.to_string()))?;
    Ok(count as usize)
}

pub(crate) fn parse_document_row(row: &Row<'_>) -> rusqlite::Result<SiloettResult<CanonDocument>> {
    let id: String = row.get(0)?;
    let universe: String = row.get(1)?;
    let title: String = row.get(2)?;
    let kind_raw: String = row.get(3)?;
    let content: String = row.get(4)?;
    let episode_raw: Option<String> = row.get(5)?;
    let page: Option<u32> = row.get(6)?;
    let line_start: Option<u32> = row.get(7)?;
    let line_end: Option<u32> = row.get(8)?;
    let section: Option<String> = row.get(9)?;
    let content_hash: String = row.get(10)?;
    let ingested_at: String = row.get(11)?;
    let superseded_by: Option<String> = row.get(12)?;

    Ok(build_document(
        id,
        universe,
        title,
        kind_raw,
        content,
        episode_raw,
        page,
        line_start,
        line_end,
        section,
        content_hash,
        ingested_at,
        superseded_by,
    ))
}

#[allow(clippy::too_many_arguments)]
fn build_document(
    id: String,
    universe: String,
    title: String,
    kind_raw: String,
    content: String,
    episode_raw: Option<String>,
    page: Option<u32>,
    line_start: Option<u32>,
    line_end: Option<u32>,
    section: Option<String>,
    content_hash: String,
    ingested_at: String,
    superseded_by: Option<String>,
) -> SiloettResult<CanonDocument> {
    let kind = kind_from_column(&kind_raw)?;
    let episode = episode_from_column(episode_raw)?;
    let lines = match (line_start, line_end) {
        (Some(start), Some(end)) => Some(LineRange::new(start, end)),
        _ => None,
    };
    let ingested_at = DateTime::parse_from_rfc3339(&ingested_at)
        .map_err(|e| to_store_err(format!("bad ingested_at: {e}")))?
        .with_timezone(&Utc);

    Ok(CanonDocument {
        id: DocumentId::from_string(id),
        title,
        kind,
        universe: UniverseId::new(universe),
        content,
        locator: DocumentLocator {
            episode,
            page,
            lines,
            section,
        },
        content_hash,
        ingested_at,
        superseded_by: superseded_by.map(DocumentId::from_string),
    })
}
