//! Share grant views returned by the ledger.

use crate::domain::{Note, NoteId, Privilege, Username};
use serde::Serialize;

/// A grantee of a note together with their privilege label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grantee {
    pub note_id: NoteId,
    pub username: Username,
    pub privilege: Privilege,
}

/// A note shared with the requesting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedNote {
    pub note: Note,
    pub privilege: Privilege,
}
