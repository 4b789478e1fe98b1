//! v001: documents, facts, fact_fts, audit_log.

use rusqlite::Connection;

use siloett_core::errors::SiloettResult;

use crate::to_store_err;

pub fn migrate(conn: &Connection) -> SiloettResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id              TEXT PRIMARY KEY,
            universe        TEXT NOT NULL,
            title           TEXT NOT NULL,
            kind            TEXT NOT NULL,
            content         TEXT NOT NULL,
            episode         TEXT,
            page            INTEGER,
            line_start      INTEGER,
            line_end        INTEGER,
            section         TEXT,
            content_hash    TEXT NOT NULL,
            ingested_at     TEXT NOT NULL,
            superseded_by   TEXT REFERENCES documents(id)
        );

        CREATE INDEX IF NOT EXISTS idx_documents_universe ON documents(universe);
        CREATE INDEX IF NOT EXISTS idx_documents_version
            ON documents(universe, title, kind, superseded_by);

        CREATE TABLE IF NOT EXISTS facts (
            id              TEXT PRIMARY KEY,
            document_id     TEXT NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            universe        TEXT NOT NULL,
            subject         TEXT NOT NULL,
            statement       TEXT NOT NULL,
            quote           TEXT NOT NULL,
            episode         TEXT,
            page            INTEGER,
            line_start      INTEGER,
            line_end        INTEGER,
            section         TEXT,
            scope_from      TEXT,
            scope_until     TEXT,
            polarity        TEXT NOT NULL,
            embedding       BLOB,
            extracted_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_facts_subject ON facts(universe, subject);
        CREATE INDEX IF NOT EXISTS idx_facts_document ON facts(document_id);

        CREATE VIRTUAL TABLE IF NOT EXISTS fact_fts USING fts5(
            subject, statement, quote,
            content='facts', content_rowid='rowid'
        );

        CREATE TABLE IF NOT EXISTS audit_log (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            operation       TEXT NOT NULL,
            document_id     TEXT NOT NULL,
            actor           TEXT NOT NULL,
            detail          TEXT,
            created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_audit_document ON audit_log(document_id);
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}
