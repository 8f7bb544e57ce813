//! ShareLedger implementation for SqliteStore.

use super::SqliteStore;
use super::notes::{NOTE_COLUMNS, NoteRow, user_registered};
use super::transaction::Transaction;
use crate::domain::{Grantee, NoteId, Privilege, SharedNote, Username};
use crate::store::{NotesError, NotesResult, ShareLedger};
use chrono::Utc;
use rusqlite::{Connection, ErrorCode, OptionalExtension};

fn note_exists(conn: &Connection, id: NoteId) -> NotesResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM notes WHERE id = ?1", [id.get()], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn parse_privilege(note_id: i64, raw: &str) -> NotesResult<Privilege> {
    Privilege::new(raw).map_err(|e| {
        NotesError::InvalidData(format!("grant on note {}: {}", note_id, e))
    })
}

/// True for a primary-key or unique constraint failure.
pub(super) fn is_uniqueness_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
    )
}

impl ShareLedger for SqliteStore {
    fn grant(
        &self,
        note_id: NoteId,
        grantee: &Username,
        privilege: &Privilege,
    ) -> NotesResult<()> {
        let conn = self.conn()?;
        let tx = Transaction::immediate(&conn)?;

        if !note_exists(tx.conn(), note_id)? {
            return Err(NotesError::NoSuchNote { id: note_id });
        }
        if !user_registered(tx.conn(), grantee)? {
            return Err(NotesError::NoSuchUser {
                username: grantee.clone(),
            });
        }

        // The write lock is held from BEGIN IMMEDIATE, so a concurrent grant
        // for the same pair either committed before us and trips the primary
        // key here, or waits and trips it after we commit.
        let inserted = tx.execute(
            "INSERT INTO note_shares (note_id, username, privilege, created)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                note_id.get(),
                grantee.as_str(),
                privilege.as_str(),
                Utc::now().to_rfc3339(),
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(NotesError::Database(e)) if is_uniqueness_violation(&e) => {
                return Err(NotesError::DuplicateGrant {
                    note_id,
                    grantee: grantee.clone(),
                });
            }
            Err(e) => return Err(e),
        }

        tx.commit()?;
        log::debug!("granted note {} to {} ({})", note_id, grantee, privilege);
        Ok(())
    }

    fn revoke(&self, note_id: NoteId, grantee: &Username) -> NotesResult<()> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM note_shares WHERE note_id = ?1 AND username = ?2",
            rusqlite::params![note_id.get(), grantee.as_str()],
        )?;

        if removed == 0 {
            return Err(NotesError::NoSuchGrant {
                note_id,
                grantee: grantee.clone(),
            });
        }

        log::debug!("revoked note {} from {}", note_id, grantee);
        Ok(())
    }

    fn grant_for(&self, note_id: NoteId, user: &Username) -> NotesResult<Option<Privilege>> {
        let conn = self.conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT privilege FROM note_shares WHERE note_id = ?1 AND username = ?2",
                rusqlite::params![note_id.get(), user.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        raw.map(|p| parse_privilege(note_id.get(), &p)).transpose()
    }

    fn grants_for_grantee(&self, grantee: &Username) -> NotesResult<Vec<SharedNote>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT s.privilege, {NOTE_COLUMNS}
             FROM note_shares s
             JOIN notes n ON n.id = s.note_id
             WHERE s.username = ?1
             ORDER BY n.id"
        ))?;

        let rows = stmt
            .query_map([grantee.as_str()], |row| {
                Ok((row.get::<_, String>(0)?, NoteRow::read(row, 1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(privilege, note_row)| {
                let note = note_row.into_note()?;
                let privilege = parse_privilege(note.id().get(), &privilege)?;
                Ok(SharedNote { note, privilege })
            })
            .collect()
    }

    fn grantees_for_note(&self, note_id: NoteId) -> NotesResult<Vec<Grantee>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT username, privilege FROM note_shares
             WHERE note_id = ?1
             ORDER BY username",
        )?;

        let rows = stmt
            .query_map([note_id.get()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(username, privilege)| {
                let username = Username::new(&username).map_err(|e| {
                    NotesError::InvalidData(format!("grant on note {}: {}", note_id, e))
                })?;
                Ok(Grantee {
                    note_id,
                    username,
                    privilege: parse_privilege(note_id.get(), &privilege)?,
                })
            })
            .collect()
    }
}
