//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{NoteshareCommand, TestNote};
use noteshare::access::NoteService;
use noteshare::domain::{NoteId, Username};
use noteshare::store::{SqliteStore, UserDirectory};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary database.
///
/// The temp directory also serves as the config and data home for spawned
/// commands, so the developer's own config never leaks into a test.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the database used by commands.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("notes.db")
    }

    /// Returns the directory used as `XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Opens the environment's database directly.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open test database")
    }

    /// Opens a service over the environment's database.
    pub fn service(&self) -> NoteService<SqliteStore> {
        NoteService::new(self.store())
    }

    /// Registers users directly in the database.
    pub fn add_users(&self, names: &[&str]) {
        let store = self.store();
        for name in names {
            let user = Username::new(name).expect("Invalid username");
            store.add_user(&user).expect("Failed to add user");
        }
    }

    /// Creates a note owned by `owner` and returns its id.
    pub fn add_note(&self, owner: &str, note: &TestNote) -> NoteId {
        let owner = Username::new(owner).expect("Invalid username");
        self.service()
            .create_note(&owner, note.to_draft())
            .expect("Failed to create note")
            .id()
    }

    /// Writes the config file read by spawned commands.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home().join("noteshare");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Creates a command against this environment's database, acting as nobody.
    pub fn cmd(&self) -> NoteshareCommand {
        NoteshareCommand::new()
            .home(&self.config_home(), &self.root.join("data"))
            .db(&self.db_path())
    }

    /// Creates a command acting as `user`.
    pub fn cmd_as(&self, user: &str) -> NoteshareCommand {
        self.cmd().user(user)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteshare::store::NoteRepository;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_db_path_is_inside_root() {
        let env = TestEnv::new();
        assert!(env.db_path().starts_with(env.root()));
    }

    #[test]
    fn test_env_add_note_persists() {
        let env = TestEnv::new();
        env.add_users(&["alice"]);
        let id = env.add_note("alice", &TestNote::new("Persisted"));

        let note = env.store().get_note(id).expect("note should exist");
        assert_eq!(note.title(), "Persisted");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd_as("alice");
        let args = cmd.get_args();
        assert!(args.contains(&"--db".to_string()));
        assert!(args.contains(&"--user".to_string()));
    }
}
