//! Persistent note store: repository traits, schema and the SQLite backend

mod repository;
mod schema;
pub mod sqlite;

pub use repository::{
    ErrorKind, NoteRepository, NotesError, NotesResult, SearchIndex, ShareLedger, UserDirectory,
};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::SqliteStore;
