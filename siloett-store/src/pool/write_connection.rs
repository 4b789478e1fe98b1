//! The single write connection. All mutations funnel through its mutex,
//! serializing ingestion without blocking WAL readers.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use siloett_core::errors::{SiloettError, SiloettResult, StoreError};

use super::pragmas::apply_pragmas;
use crate::to_store_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> SiloettResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            SiloettError::Store(StoreError::Unavailable {
                reason: format!("cannot open {}: {e}", path.display()),
            })
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> SiloettResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            SiloettError::Store(StoreError::Unavailable {
                reason: format!("cannot open in-memory database: {e}"),
            })
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure holding the write lock.
    pub fn with_conn_sync<F, T>(&self, f: F) -> SiloettResult<T>
    where
        F: FnOnce(&Connection) -> SiloettResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_store_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
