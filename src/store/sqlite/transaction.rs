//! RAII-based transaction support for SQLite.

use crate::store::NotesResult;
use rusqlite::{Connection, Params};

/// A write transaction with RAII-based automatic rollback.
///
/// The transaction takes SQLite's write lock up front (`BEGIN IMMEDIATE`),
/// so checks made inside it cannot be invalidated by a concurrent writer
/// before it commits. It rolls back when dropped unless `commit()` is called.
pub struct Transaction<'a> {
    conn: &'a Connection,
    finished: bool,
}

impl<'a> Transaction<'a> {
    /// Begins an immediate transaction on the given connection.
    pub fn immediate(conn: &'a Connection) -> NotesResult<Self> {
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    /// Returns a reference to the underlying connection.
    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }

    /// Executes a SQL statement within the transaction.
    pub fn execute(&self, sql: &str, params: impl Params) -> NotesResult<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Commits the transaction.
    ///
    /// Consumes the transaction, preventing automatic rollback on drop.
    pub fn commit(mut self) -> NotesResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }

    /// Rolls back the transaction explicitly.
    ///
    /// Consumes the transaction. This is equivalent to dropping without commit,
    /// but makes the intent explicit.
    pub fn rollback(mut self) -> NotesResult<()> {
        self.conn.execute_batch("ROLLBACK")?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            // Attempt rollback, but ignore errors since we're in drop
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
