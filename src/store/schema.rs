//! SQLite schema creation for the note store.

use rusqlite::Connection;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Brings an empty or existing database up to the note store layout.
///
/// Every statement uses `IF NOT EXISTS`, so opening an existing store
/// runs this again without touching its rows.
///
/// # Layout
/// - `users` - Known user identities
/// - `notes` - Note records, including the derived `search_text`
/// - `note_shares` - One row per (note, grantee) grant
/// - `notes_fts` - FTS5 index over `notes.search_text`
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    // ===========================================
    // Users
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY NOT NULL,
            created TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Notes
    // ===========================================
    // AUTOINCREMENT keeps ids of deleted notes from being handed out again.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL REFERENCES users(username),
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            note_type TEXT NOT NULL,
            description TEXT NOT NULL,
            created TEXT NOT NULL,
            completion_time TEXT,
            completion_date TEXT,
            status TEXT,
            delegation TEXT,
            search_text TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Share Grants
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS note_shares (
            note_id INTEGER NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
            username TEXT NOT NULL REFERENCES users(username) ON DELETE CASCADE,
            privilege TEXT NOT NULL,
            created TEXT NOT NULL,
            PRIMARY KEY (note_id, username)
        );",
    )?;

    // ===========================================
    // Indexes
    // ===========================================
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner);
         CREATE INDEX IF NOT EXISTS idx_note_shares_username ON note_shares(username);",
    )?;

    // ===========================================
    // FTS5 Virtual Table
    // ===========================================
    conn.execute_batch(
        "CREATE VIRTUAL TABLE IF NOT EXISTS notes_fts USING fts5(
            search_text,
            content='notes',
            content_rowid='id',
            tokenize='porter unicode61'
        );",
    )?;

    // ===========================================
    // FTS5 Sync Triggers
    // ===========================================
    // The triggers run inside the writing statement's transaction, so the
    // index can never lag behind the row it was derived from.
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS notes_fts_insert
        AFTER INSERT ON notes BEGIN
            INSERT INTO notes_fts(rowid, search_text)
            VALUES (NEW.id, NEW.search_text);
        END;",
    )?;

    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS notes_fts_delete
        AFTER DELETE ON notes BEGIN
            INSERT INTO notes_fts(notes_fts, rowid, search_text)
            VALUES ('delete', OLD.id, OLD.search_text);
        END;",
    )?;

    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS notes_fts_update
        AFTER UPDATE ON notes BEGIN
            INSERT INTO notes_fts(notes_fts, rowid, search_text)
            VALUES ('delete', OLD.id, OLD.search_text);
            INSERT INTO notes_fts(rowid, search_text)
            VALUES (NEW.id, NEW.search_text);
        END;",
    )?;

    // ===========================================
    // Schema Version Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Test Helpers
    // ===========================================

    fn test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    fn object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2",
            [kind, name],
            |_| Ok(()),
        )
        .is_ok()
    }

    fn insert_user(conn: &Connection, name: &str) {
        conn.execute(
            "INSERT INTO users (username, created) VALUES (?1, '2024-01-15T10:30:00Z')",
            [name],
        )
        .unwrap();
    }

    fn insert_note(conn: &Connection, owner: &str, title: &str, search_text: &str) -> i64 {
        conn.execute(
            "INSERT INTO notes (owner, title, note_type, description, created, search_text)
             VALUES (?1, ?2, '', '', '2024-01-15T10:30:00Z', ?3)",
            [owner, title, search_text],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn fts_hits(conn: &Connection, expr: &str) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM notes_fts WHERE notes_fts MATCH ?1",
            [expr],
            |row| row.get(0),
        )
        .unwrap()
    }

    // ===========================================
    // Tables
    // ===========================================

    #[test]
    fn creates_all_tables() {
        let conn = test_connection();
        for table in ["users", "notes", "note_shares", "notes_fts", "schema_version"] {
            assert!(object_exists(&conn, "table", table), "missing table {table}");
        }
    }

    #[test]
    fn creates_indexes() {
        let conn = test_connection();
        assert!(object_exists(&conn, "index", "idx_notes_owner"));
        assert!(object_exists(&conn, "index", "idx_note_shares_username"));
    }

    #[test]
    fn create_schema_is_idempotent() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn notes_reject_blank_title() {
        let conn = test_connection();
        insert_user(&conn, "alice");
        let result = conn.execute(
            "INSERT INTO notes (owner, title, note_type, description, created, search_text)
             VALUES ('alice', '  ', '', '', '2024-01-15T10:30:00Z', '')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn notes_require_known_owner() {
        let conn = test_connection();
        let result = conn.execute(
            "INSERT INTO notes (owner, title, note_type, description, created, search_text)
             VALUES ('ghost', 'Title', '', '', '2024-01-15T10:30:00Z', 'Title')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn note_ids_are_not_reused() {
        let conn = test_connection();
        insert_user(&conn, "alice");
        let first = insert_note(&conn, "alice", "One", "One");
        conn.execute("DELETE FROM notes WHERE id = ?1", [first]).unwrap();
        let second = insert_note(&conn, "alice", "Two", "Two");
        assert!(second > first);
    }

    // ===========================================
    // Share Grants
    // ===========================================

    #[test]
    fn note_shares_enforce_composite_primary_key() {
        let conn = test_connection();
        insert_user(&conn, "alice");
        insert_user(&conn, "bob");
        let id = insert_note(&conn, "alice", "Shared", "Shared");

        let insert = "INSERT INTO note_shares (note_id, username, privilege, created)
                      VALUES (?1, 'bob', 'read', '2024-01-15T10:30:00Z')";
        conn.execute(insert, [id]).unwrap();
        assert!(conn.execute(insert, [id]).is_err());
    }

    #[test]
    fn deleting_note_cascades_to_shares() {
        let conn = test_connection();
        insert_user(&conn, "alice");
        insert_user(&conn, "bob");
        let id = insert_note(&conn, "alice", "Shared", "Shared");
        conn.execute(
            "INSERT INTO note_shares (note_id, username, privilege, created)
             VALUES (?1, 'bob', 'read', '2024-01-15T10:30:00Z')",
            [id],
        )
        .unwrap();

        conn.execute("DELETE FROM notes WHERE id = ?1", [id]).unwrap();

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM note_shares", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    // ===========================================
    // FTS Triggers
    // ===========================================

    #[test]
    fn insert_trigger_indexes_search_text() {
        let conn = test_connection();
        insert_user(&conn, "alice");
        insert_note(&conn, "alice", "Trip plan", "Trip plan task Pack bags");
        assert_eq!(fts_hits(&conn, "\"bags\""), 1);
    }

    #[test]
    fn porter_tokenizer_matches_word_forms() {
        let conn = test_connection();
        insert_user(&conn, "alice");
        insert_note(&conn, "alice", "Packing", "Packing list");
        assert_eq!(fts_hits(&conn, "\"pack\""), 1);
    }

    #[test]
    fn update_trigger_replaces_index_entry() {
        let conn = test_connection();
        insert_user(&conn, "alice");
        let id = insert_note(&conn, "alice", "Trip plan", "Trip plan");

        conn.execute(
            "UPDATE notes SET title = 'Budget', search_text = 'Budget' WHERE id = ?1",
            [id],
        )
        .unwrap();

        assert_eq!(fts_hits(&conn, "\"trip\""), 0);
        assert_eq!(fts_hits(&conn, "\"budget\""), 1);
    }

    #[test]
    fn delete_trigger_removes_index_entry() {
        let conn = test_connection();
        insert_user(&conn, "alice");
        let id = insert_note(&conn, "alice", "Trip plan", "Trip plan");
        conn.execute("DELETE FROM notes WHERE id = ?1", [id]).unwrap();
        assert_eq!(fts_hits(&conn, "\"trip\""), 0);
    }
}
