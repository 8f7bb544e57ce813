//! Access-checked note operations for the calling layer.

use super::AccessResolver;
use crate::domain::{
    Capability, Grantee, Note, NoteContentBuilder, NoteId, NoteUpdate, Privilege, SharedNote,
    Username,
};
use crate::store::{
    NoteRepository, NotesError, NotesResult, SearchIndex, ShareLedger, UserDirectory,
};
use serde::Serialize;

/// A note together with the requester's capability on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibleNote {
    pub note: Note,
    pub capability: Capability,
}

/// Everything a user can see: the notes they own and the notes shared with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteListing {
    pub owned: Vec<Note>,
    pub shared: Vec<SharedNote>,
}

/// The entry point for every note operation.
///
/// Each method takes the requester explicitly and checks their capability
/// before touching the store:
///
/// | operation            | owner | grantee          | anyone else |
/// |----------------------|-------|------------------|-------------|
/// | read                 | yes   | yes              | Forbidden   |
/// | update, delete       | yes   | Forbidden        | Forbidden   |
/// | share, list grantees | yes   | Forbidden        | Forbidden   |
/// | revoke               | any   | own grant only   | Forbidden   |
pub struct NoteService<S> {
    store: S,
}

impl<S> NoteService<S>
where
    S: NoteRepository + ShareLedger + SearchIndex + UserDirectory,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn resolver(&self) -> AccessResolver<'_, S> {
        AccessResolver::new(&self.store)
    }

    /// Resolves the note for a note-store operation (`NotFound` if absent).
    fn load(&self, requester: &Username, id: NoteId) -> NotesResult<(Note, Capability)> {
        self.resolver()
            .resolve(requester, id)?
            .ok_or(NotesError::NotFound { id })
    }

    /// Resolves the note for a share-ledger operation (`NoSuchNote` if absent).
    fn load_for_sharing(
        &self,
        requester: &Username,
        id: NoteId,
    ) -> NotesResult<(Note, Capability)> {
        self.resolver()
            .resolve(requester, id)?
            .ok_or(NotesError::NoSuchNote { id })
    }

    fn require_owner(
        requester: &Username,
        id: NoteId,
        capability: &Capability,
        action: &'static str,
    ) -> NotesResult<()> {
        if capability.is_owner() {
            Ok(())
        } else {
            Err(NotesError::Forbidden {
                user: requester.clone(),
                note_id: id,
                action,
            })
        }
    }

    // ===========================================
    // Notes
    // ===========================================

    /// Returns the capability of `requester` on a note.
    pub fn capability(&self, requester: &Username, id: NoteId) -> NotesResult<Capability> {
        self.load(requester, id).map(|(_, capability)| capability)
    }

    /// Creates a note owned by `requester`.
    pub fn create_note(&self, requester: &Username, draft: NoteContentBuilder) -> NotesResult<Note> {
        let content = draft.build()?;
        let id = self.store.create_note(requester, &content)?;
        self.store.get_note(id)
    }

    /// Reads a note the requester owns or has been granted.
    pub fn get_note(&self, requester: &Username, id: NoteId) -> NotesResult<AccessibleNote> {
        let (note, capability) = self.load(requester, id)?;
        if !capability.can_read() {
            return Err(NotesError::Forbidden {
                user: requester.clone(),
                note_id: id,
                action: "read",
            });
        }
        Ok(AccessibleNote { note, capability })
    }

    /// Updates a note; only its owner may do so.
    pub fn update_note(
        &self,
        requester: &Username,
        id: NoteId,
        update: &NoteUpdate,
    ) -> NotesResult<Note> {
        let (_, capability) = self.load(requester, id)?;
        Self::require_owner(requester, id, &capability, "update")?;
        self.store.update_note(id, update)
    }

    /// Deletes a note and all of its grants; only its owner may do so.
    pub fn delete_note(&self, requester: &Username, id: NoteId) -> NotesResult<()> {
        let (_, capability) = self.load(requester, id)?;
        Self::require_owner(requester, id, &capability, "delete")?;
        self.store.delete_note(id)?;
        log::info!("{} deleted note {}", requester, id);
        Ok(())
    }

    /// Lists the requester's own notes and the notes shared with them.
    ///
    /// The two halves come from independent queries and are only combined
    /// here.
    pub fn list_visible(&self, requester: &Username) -> NotesResult<NoteListing> {
        Ok(NoteListing {
            owned: self.store.list_by_owner(requester)?,
            shared: self.store.grants_for_grantee(requester)?,
        })
    }

    /// Full-text search over the requester's own notes.
    pub fn search(&self, requester: &Username, query: &str) -> NotesResult<Vec<Note>> {
        self.store.search(query, requester)
    }

    // ===========================================
    // Sharing
    // ===========================================

    /// Shares a note with another user.
    ///
    /// Only the owner may share, and never with themself.
    pub fn share_note(
        &self,
        requester: &Username,
        id: NoteId,
        grantee: &Username,
        privilege: &Privilege,
    ) -> NotesResult<()> {
        let (note, capability) = self.load_for_sharing(requester, id)?;
        Self::require_owner(requester, id, &capability, "share")?;

        if note.is_owned_by(grantee) {
            return Err(NotesError::Validation(format!(
                "note {} cannot be shared with its owner",
                id
            )));
        }
        if !self.store.user_exists(grantee)? {
            return Err(NotesError::NoSuchUser {
                username: grantee.clone(),
            });
        }

        self.store.grant(id, grantee, privilege)?;
        log::info!("{} shared note {} with {} ({})", requester, id, grantee, privilege);
        Ok(())
    }

    /// Revokes a grant.
    ///
    /// The owner may revoke any grant on the note; a grantee may only give up
    /// their own. Giving up a grant you no longer hold is `NoSuchGrant`, the
    /// same as an owner repeating a revoke.
    pub fn revoke_share(
        &self,
        requester: &Username,
        id: NoteId,
        grantee: &Username,
    ) -> NotesResult<()> {
        let (_, capability) = self.load_for_sharing(requester, id)?;

        let allowed = match &capability {
            Capability::Owner => true,
            Capability::Shared(_) => requester == grantee,
            Capability::None if requester == grantee => {
                return Err(NotesError::NoSuchGrant {
                    note_id: id,
                    grantee: grantee.clone(),
                });
            }
            Capability::None => false,
        };
        if !allowed {
            return Err(NotesError::Forbidden {
                user: requester.clone(),
                note_id: id,
                action: "revoke a grant on",
            });
        }

        self.store.revoke(id, grantee)?;
        log::info!("{} revoked note {} from {}", requester, id, grantee);
        Ok(())
    }

    /// Lists who a note is shared with; owner only.
    pub fn grantees(&self, requester: &Username, id: NoteId) -> NotesResult<Vec<Grantee>> {
        let (_, capability) = self.load_for_sharing(requester, id)?;
        Self::require_owner(requester, id, &capability, "list grantees of")?;
        self.store.grantees_for_note(id)
    }

    /// Lists users the note could still be shared with: everyone except the
    /// owner and existing grantees.
    pub fn share_candidates(&self, requester: &Username, id: NoteId) -> NotesResult<Vec<Username>> {
        let (note, capability) = self.load_for_sharing(requester, id)?;
        Self::require_owner(requester, id, &capability, "share")?;

        let grantees = self.store.grantees_for_note(id)?;
        let candidates = self
            .store
            .list_users()?
            .into_iter()
            .filter(|user| !note.is_owned_by(user))
            .filter(|user| !grantees.iter().any(|g| &g.username == user))
            .collect();
        Ok(candidates)
    }
}
