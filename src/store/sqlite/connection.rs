//! Connection management for SqliteStore.

use super::transaction::Transaction;
use super::{PooledConnection, SqliteStore};
use crate::store::{NotesError, NotesResult, create_schema};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// How long a writer waits for a competing write lock before giving up.
const BUSY_TIMEOUT_MS: i64 = 5_000;

/// Upper bound on simultaneously open connections to a database file.
const MAX_POOL_SIZE: u32 = 8;

impl SqliteStore {
    // ===========================================
    // In-Memory Store
    // ===========================================

    /// Opens an in-memory store with the full schema.
    ///
    /// Every in-memory connection is its own database, so the pool holds
    /// exactly one connection and never recycles it.
    pub fn open_in_memory() -> NotesResult<Self> {
        let manager = SqliteConnectionManager::memory().with_init(|conn| {
            conn.pragma_update(None, "foreign_keys", "ON")?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_timeout(Duration::from_secs(5))
            .build(manager)?;

        let store = Self { pool };
        create_schema(&*store.conn()?)?;
        Ok(store)
    }

    // ===========================================
    // File-Based Store
    // ===========================================

    /// Opens or creates a store at the given path.
    ///
    /// Creates parent directories if they don't exist. Initializes the schema
    /// if this is a new database.
    pub fn open(path: &Path) -> NotesResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| NotesError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(MAX_POOL_SIZE)
            .min_idle(Some(1))
            .connection_timeout(Duration::from_secs(10))
            .build(manager)?;

        let store = Self { pool };
        {
            let conn = store.conn()?;
            let tx = Transaction::immediate(&conn)?;
            create_schema(tx.conn())?;
            tx.commit()?;
        }
        log::debug!("opened note store at {}", path.display());
        Ok(store)
    }

    // ===========================================
    // Connection Access
    // ===========================================

    /// Checks a connection out of the pool.
    ///
    /// The connection returns to the pool when dropped. Callers must not hold
    /// one connection while asking for another: an in-memory store has only
    /// one.
    pub fn conn(&self) -> NotesResult<PooledConnection> {
        Ok(self.pool.get()?)
    }
}
