//! SQLite-backed note store implementation.

mod connection;
mod notes;
mod search;
mod shares;
mod transaction;
mod users;


use r2d2_sqlite::SqliteConnectionManager;

pub use transaction::Transaction;

/// Pool of SQLite connections.
pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

/// A connection checked out of a [`SqlitePool`].
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed note store.
///
/// Implements the note store, share ledger, search index and user directory
/// over one database. Each operation checks a connection out of the pool, so
/// a store can be shared between threads and every call is an independent
/// unit of work.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}
