//! Core types: Note, NoteId, Username, Privilege, Capability

mod capability;
mod note;
mod note_id;
mod privilege;
mod search_text;
mod share;
mod username;

pub use capability::Capability;
pub use note::{Note, NoteContent, NoteContentBuilder, NoteUpdate, ParseNoteError};
pub use note_id::{NoteId, ParseNoteIdError};
pub use privilege::{ParsePrivilegeError, Privilege};
pub use search_text::{derive_search_text, match_expression, query_terms};
pub use share::{Grantee, SharedNote};
pub use username::{MAX_USERNAME_LEN, ParseUsernameError, Username};
