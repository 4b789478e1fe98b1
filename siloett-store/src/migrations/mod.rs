//! Schema migrations, applied in order and tracked via `user_version`.

pub mod v001_canon_tables;

use rusqlite::Connection;

use siloett_core::errors::{SiloettError, SiloettResult, StoreError};

use crate::to_store_err;

type Migration = fn(&Connection) -> SiloettResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_canon_tables::migrate)];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> SiloettResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_store_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            SiloettError::Store(StoreError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_store_err(e.to_string()))?;
        tracing::debug!(version, "applied migration");
    }
    Ok(())
}
