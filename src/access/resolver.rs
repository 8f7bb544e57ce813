//! Capability resolution for (user, note) pairs.

use crate::domain::{Capability, Note, NoteId, Username};
use crate::store::{NoteRepository, NotesError, NotesResult, ShareLedger};

/// Computes what a user may do with a note.
///
/// Ownership comes from the note store and shared access from the share
/// ledger; nothing else grants a capability.
pub struct AccessResolver<'a, S> {
    store: &'a S,
}

impl<'a, S> AccessResolver<'a, S>
where
    S: NoteRepository + ShareLedger,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolves the capability of `user` on an already loaded note.
    pub fn capability_for(&self, user: &Username, note: &Note) -> NotesResult<Capability> {
        if note.is_owned_by(user) {
            return Ok(Capability::Owner);
        }

        Ok(match self.store.grant_for(note.id(), user)? {
            Some(privilege) => Capability::Shared(privilege),
            None => Capability::None,
        })
    }

    /// Loads a note and resolves the capability of `user` on it.
    ///
    /// Returns `Ok(None)` if the note does not exist, leaving the choice of
    /// error kind to the caller.
    pub fn resolve(&self, user: &Username, id: NoteId) -> NotesResult<Option<(Note, Capability)>> {
        let note = match self.store.get_note(id) {
            Ok(note) => note,
            Err(NotesError::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let capability = self.capability_for(user, &note)?;
        Ok(Some((note, capability)))
    }
}
