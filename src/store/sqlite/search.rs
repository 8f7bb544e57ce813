//! SearchIndex implementation for SqliteStore.

use super::SqliteStore;
use super::notes::{NOTE_COLUMNS, NoteRow};
use crate::domain::{Note, Username, match_expression};
use crate::store::{NotesResult, SearchIndex};

impl SearchIndex for SqliteStore {
    fn search(&self, query: &str, owner: &Username) -> NotesResult<Vec<Note>> {
        let Some(expr) = match_expression(query) else {
            return Ok(Vec::new());
        };

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS}
             FROM notes_fts
             JOIN notes n ON n.id = notes_fts.rowid
             WHERE notes_fts MATCH ?1 AND n.owner = ?2
             ORDER BY n.id"
        ))?;

        let rows = stmt
            .query_map(rusqlite::params![expr, owner.as_str()], |row| {
                NoteRow::read(row, 0)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("search {:?} for {} matched {} note(s)", expr, owner, rows.len());
        rows.into_iter().map(NoteRow::into_note).collect()
    }
}
