//! Append-only audit trail for ingest and supersession events.

use rusqlite::{params, Connection};

use siloett_core::canon::DocumentId;
use siloett_core::errors::SiloettResult;

use crate::to_store_err;

pub struct AuditLogger;

impl AuditLogger {
    pub fn log_ingest(
        conn: &Connection,
        document_id: &DocumentId,
        fact_count: usize,
    ) -> SiloettResult<()> {
        Self::log(
            conn,
            "ingest",
            document_id,
            &format!("{{\"facts\": {fact_count}}}"),
        )
    }

    pub fn log_supersede(
        conn: &Connection,
        old: &DocumentId,
        new: &DocumentId,
    ) -> SiloettResult<()> {
        Self::log(
            conn,
            "supersede",
            old,
            &format!("{{\"superseded_by\": \"{new}\"}}"),
        )
    }

    fn log(
        conn: &Connection,
        operation: &str,
        document_id: &DocumentId,
        detail: &str,
    ) -> SiloettResult<()> {
        conn.execute(
            "INSERT INTO audit_log (operation, document_id, actor, detail)
             VALUES (?1, ?2, 'system', ?3)",
            params![operation, document_id.as_str(), detail],
        )
        .map_err(|e| to_store_err(e.to_string()))?;
        Ok(())
    }

    /// Number of audit rows for a document (used by tests).
    pub fn count_for(conn: &Connection, document_id: &DocumentId) -> SiloettResult<usize> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM audit_log WHERE document_id = ?1",
                params![document_id.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| to_store_err(e.to_string()))?;
        Ok(count as usize)
    }
}
