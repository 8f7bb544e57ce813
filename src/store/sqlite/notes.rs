//! NoteRepository implementation for SqliteStore.

use super::SqliteStore;
use super::transaction::Transaction;
use crate::domain::{Note, NoteContent, NoteId, NoteUpdate, Username};
use crate::store::{NoteRepository, NotesError, NotesResult};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

/// Column list for reading notes; queries alias the notes table as `n`.
pub(super) const NOTE_COLUMNS: &str = "n.id, n.owner, n.created, n.title, n.note_type, \
     n.description, n.completion_time, n.completion_date, n.status, n.delegation, n.search_text";

/// A note row as read from the database, before validation.
pub(super) struct NoteRow {
    id: i64,
    owner: String,
    created: String,
    title: String,
    note_type: String,
    description: String,
    completion_time: Option<String>,
    completion_date: Option<String>,
    status: Option<String>,
    delegation: Option<String>,
    search_text: String,
}

impl NoteRow {
    /// Reads the [`NOTE_COLUMNS`] starting at `offset`.
    pub(super) fn read(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            owner: row.get(offset + 1)?,
            created: row.get(offset + 2)?,
            title: row.get(offset + 3)?,
            note_type: row.get(offset + 4)?,
            description: row.get(offset + 5)?,
            completion_time: row.get(offset + 6)?,
            completion_date: row.get(offset + 7)?,
            status: row.get(offset + 8)?,
            delegation: row.get(offset + 9)?,
            search_text: row.get(offset + 10)?,
        })
    }

    pub(super) fn into_note(self) -> NotesResult<Note> {
        let owner = Username::new(&self.owner).map_err(|e| {
            NotesError::InvalidData(format!("note {}: invalid owner: {}", self.id, e))
        })?;

        let created = DateTime::parse_from_rfc3339(&self.created)
            .map_err(|e| {
                NotesError::InvalidData(format!("note {}: invalid created timestamp: {}", self.id, e))
            })?
            .with_timezone(&Utc);

        let content = NoteContent::builder(self.title)
            .note_type(self.note_type)
            .description(self.description)
            .completion_time(self.completion_time)
            .completion_date(self.completion_date)
            .status(self.status)
            .delegation(self.delegation)
            .build()
            .map_err(|e| NotesError::InvalidData(format!("note {}: {}", self.id, e)))?;

        Ok(Note::from_parts(
            NoteId::from_raw(self.id),
            owner,
            created,
            content,
            self.search_text,
        ))
    }
}

/// Reads a single note by id on an existing connection.
pub(super) fn fetch_note(conn: &Connection, id: NoteId) -> NotesResult<Option<Note>> {
    let row = conn
        .query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes n WHERE n.id = ?1"),
            [id.get()],
            |row| NoteRow::read(row, 0),
        )
        .optional()?;

    row.map(NoteRow::into_note).transpose()
}

/// Returns true if `username` is registered.
pub(super) fn user_registered(conn: &Connection, username: &Username) -> NotesResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM users WHERE username = ?1",
            [username.as_str()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Writes content fields and freshly derived search text to an existing row.
fn write_content(tx: &Transaction<'_>, id: NoteId, content: &NoteContent) -> NotesResult<()> {
    tx.execute(
        "UPDATE notes SET
             title = ?1,
             note_type = ?2,
             description = ?3,
             completion_time = ?4,
             completion_date = ?5,
             status = ?6,
             delegation = ?7,
             search_text = ?8
         WHERE id = ?9",
        rusqlite::params![
            content.title(),
            content.note_type(),
            content.description(),
            content.completion_time(),
            content.completion_date(),
            content.status(),
            content.delegation(),
            content.search_text(),
            id.get(),
        ],
    )?;
    Ok(())
}

impl NoteRepository for SqliteStore {
    fn create_note(&self, owner: &Username, content: &NoteContent) -> NotesResult<NoteId> {
        let conn = self.conn()?;
        let tx = Transaction::immediate(&conn)?;

        if !user_registered(tx.conn(), owner)? {
            return Err(NotesError::NoSuchUser {
                username: owner.clone(),
            });
        }

        tx.execute(
            "INSERT INTO notes (owner, title, note_type, description, created,
                                completion_time, completion_date, status, delegation, search_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                owner.as_str(),
                content.title(),
                content.note_type(),
                content.description(),
                Utc::now().to_rfc3339(),
                content.completion_time(),
                content.completion_date(),
                content.status(),
                content.delegation(),
                content.search_text(),
            ],
        )?;
        let id = NoteId::from_raw(tx.conn().last_insert_rowid());

        tx.commit()?;
        log::debug!("created note {} for {}", id, owner);
        Ok(id)
    }

    fn get_note(&self, id: NoteId) -> NotesResult<Note> {
        let conn = self.conn()?;
        fetch_note(&conn, id)?.ok_or(NotesError::NotFound { id })
    }

    fn update_note(&self, id: NoteId, update: &NoteUpdate) -> NotesResult<Note> {
        let conn = self.conn()?;
        let tx = Transaction::immediate(&conn)?;

        let current = fetch_note(tx.conn(), id)?.ok_or(NotesError::NotFound { id })?;
        let mut content = current.content().clone();
        content.apply(update)?;

        write_content(&tx, id, &content)?;
        let updated = fetch_note(tx.conn(), id)?.ok_or(NotesError::NotFound { id })?;

        tx.commit()?;
        log::debug!("updated note {}", id);
        Ok(updated)
    }

    fn delete_note(&self, id: NoteId) -> NotesResult<()> {
        let conn = self.conn()?;
        let tx = Transaction::immediate(&conn)?;

        let grants = tx.execute("DELETE FROM note_shares WHERE note_id = ?1", [id.get()])?;
        let rows = tx.execute("DELETE FROM notes WHERE id = ?1", [id.get()])?;
        if rows == 0 {
            tx.rollback()?;
            return Err(NotesError::NotFound { id });
        }

        tx.commit()?;
        log::debug!("deleted note {} and {} grant(s)", id, grants);
        Ok(())
    }

    fn list_by_owner(&self, owner: &Username) -> NotesResult<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes n WHERE n.owner = ?1 ORDER BY n.id"
        ))?;

        let rows = stmt
            .query_map([owner.as_str()], |row| NoteRow::read(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(NoteRow::into_note).collect()
    }
}
