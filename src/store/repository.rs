//! Repository traits and the error type shared by every store operation.

use crate::domain::{
    Grantee, Note, NoteContent, NoteId, NoteUpdate, ParseNoteError, ParsePrivilegeError,
    ParseUsernameError, Privilege, SharedNote, Username,
};
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// Error Type
// ===========================================

/// Errors that can occur during store and access operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Malformed input, such as an empty title.
    #[error("{0}")]
    Validation(String),

    /// The note addressed by a note operation does not exist.
    #[error("note {id} does not exist")]
    NotFound { id: NoteId },

    /// The note referenced by a share operation does not exist.
    #[error("note {id} does not exist")]
    NoSuchNote { id: NoteId },

    /// No grant exists for the (note, grantee) pair.
    #[error("note {note_id} is not shared with {grantee}")]
    NoSuchGrant { note_id: NoteId, grantee: Username },

    /// The referenced user is not known to the user directory.
    #[error("user {username} is not registered")]
    NoSuchUser { username: Username },

    /// A grant for the (note, grantee) pair already exists.
    #[error("note {note_id} is already shared with {grantee}")]
    DuplicateGrant { note_id: NoteId, grantee: Username },

    /// A user with this name is already registered.
    #[error("user already exists: {username}")]
    DuplicateUser { username: Username },

    /// The requester's capability does not allow the operation.
    #[error("{user} may not {action} note {note_id}")]
    Forbidden {
        user: Username,
        note_id: NoteId,
        action: &'static str,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A stored row could not be turned back into a domain value.
    #[error("corrupt record: {0}")]
    InvalidData(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The caller-facing classification of a [`NotesError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    NoSuchNote,
    NoSuchGrant,
    NoSuchUser,
    DuplicateGrant,
    Forbidden,
    /// Persistence failure the core cannot remediate.
    Store,
}

impl NotesError {
    /// Classifies the error for the calling layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotesError::Validation(_) | NotesError::DuplicateUser { .. } => ErrorKind::Validation,
            NotesError::NotFound { .. } => ErrorKind::NotFound,
            NotesError::NoSuchNote { .. } => ErrorKind::NoSuchNote,
            NotesError::NoSuchGrant { .. } => ErrorKind::NoSuchGrant,
            NotesError::NoSuchUser { .. } => ErrorKind::NoSuchUser,
            NotesError::DuplicateGrant { .. } => ErrorKind::DuplicateGrant,
            NotesError::Forbidden { .. } => ErrorKind::Forbidden,
            NotesError::Database(_)
            | NotesError::Pool(_)
            | NotesError::InvalidData(_)
            | NotesError::Io { .. } => ErrorKind::Store,
        }
    }
}

impl From<ParseNoteError> for NotesError {
    fn from(err: ParseNoteError) -> Self {
        NotesError::Validation(err.to_string())
    }
}

impl From<ParseUsernameError> for NotesError {
    fn from(err: ParseUsernameError) -> Self {
        NotesError::Validation(err.to_string())
    }
}

impl From<ParsePrivilegeError> for NotesError {
    fn from(err: ParsePrivilegeError) -> Self {
        NotesError::Validation(err.to_string())
    }
}

/// Result type for store and access operations.
pub type NotesResult<T> = Result<T, NotesError>;

// ===========================================
// Note Store
// ===========================================

/// Owner-scoped CRUD over note records.
///
/// Every successful create or update stores a freshly derived search text
/// in the same transaction as the note fields.
pub trait NoteRepository {
    /// Creates a note owned by `owner` and returns its new id.
    fn create_note(&self, owner: &Username, content: &NoteContent) -> NotesResult<NoteId>;

    /// Retrieves a note by id, failing with `NotFound` if absent.
    fn get_note(&self, id: NoteId) -> NotesResult<Note>;

    /// Applies a partial update and returns the stored result.
    fn update_note(&self, id: NoteId, update: &NoteUpdate) -> NotesResult<Note>;

    /// Deletes a note and every grant on it.
    ///
    /// Deleting a note that does not exist fails with `NotFound`.
    fn delete_note(&self, id: NoteId) -> NotesResult<()>;

    /// Lists notes owned by `owner`, ordered by id ascending.
    fn list_by_owner(&self, owner: &Username) -> NotesResult<Vec<Note>>;
}

// ===========================================
// Share Ledger
// ===========================================

/// Grants and revocations of note access.
pub trait ShareLedger {
    /// Creates the grant for (note, grantee).
    ///
    /// Fails with `NoSuchNote`, `NoSuchUser` or `DuplicateGrant`; an existing
    /// grant is never overwritten.
    fn grant(
        &self,
        note_id: NoteId,
        grantee: &Username,
        privilege: &Privilege,
    ) -> NotesResult<()>;

    /// Removes the grant for (note, grantee), failing with `NoSuchGrant` if absent.
    fn revoke(&self, note_id: NoteId, grantee: &Username) -> NotesResult<()>;

    /// Returns the privilege `user` holds on the note, if any.
    fn grant_for(&self, note_id: NoteId, user: &Username) -> NotesResult<Option<Privilege>>;

    /// Lists notes shared with `grantee`, ordered by note id ascending.
    fn grants_for_grantee(&self, grantee: &Username) -> NotesResult<Vec<SharedNote>>;

    /// Lists the grantees of a note, ordered by username.
    fn grantees_for_note(&self, note_id: NoteId) -> NotesResult<Vec<Grantee>>;
}

// ===========================================
// Search
// ===========================================

/// Owner-private full-text search.
pub trait SearchIndex {
    /// Returns notes owned by `owner` whose search text contains every query
    /// term, ordered by id ascending.
    ///
    /// Query text without any terms yields an empty result.
    fn search(&self, query: &str, owner: &Username) -> NotesResult<Vec<Note>>;
}

// ===========================================
// User Directory
// ===========================================

/// The set of known user identities.
pub trait UserDirectory {
    fn user_exists(&self, username: &Username) -> NotesResult<bool>;

    /// Registers a user, failing with `DuplicateUser` if the name is taken.
    fn add_user(&self, username: &Username) -> NotesResult<()>;

    /// Lists all users ordered by name.
    fn list_users(&self) -> NotesResult<Vec<Username>>;
}
