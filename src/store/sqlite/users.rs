//! UserDirectory implementation for SqliteStore.

use super::SqliteStore;
use super::notes::user_registered;
use super::shares::is_uniqueness_violation;
use crate::domain::Username;
use crate::store::{NotesError, NotesResult, UserDirectory};
use chrono::Utc;

impl UserDirectory for SqliteStore {
    fn user_exists(&self, username: &Username) -> NotesResult<bool> {
        let conn = self.conn()?;
        user_registered(&conn, username)
    }

    fn add_user(&self, username: &Username) -> NotesResult<()> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO users (username, created) VALUES (?1, ?2)",
            rusqlite::params![username.as_str(), Utc::now().to_rfc3339()],
        );

        match inserted {
            Ok(_) => {
                log::debug!("registered user {}", username);
                Ok(())
            }
            Err(e) if is_uniqueness_violation(&e) => Err(NotesError::DuplicateUser {
                username: username.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn list_users(&self) -> NotesResult<Vec<Username>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT username FROM users ORDER BY username")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        names
            .iter()
            .map(|name| {
                Username::new(name)
                    .map_err(|e| NotesError::InvalidData(format!("user '{}': {}", name, e)))
            })
            .collect()
    }
}
