//! Note records, their authored content, and content patches.

use crate::domain::search_text::derive_search_text;
use crate::domain::{NoteId, Username};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The kind of error that occurred when building note content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyTitle,
}

/// Error returned when constructing or patching note content with invalid values.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
        }
    }
}

impl std::error::Error for ParseNoteError {}

fn validate_title(title: &str) -> Result<String, ParseNoteError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ParseNoteError {
            kind: ParseNoteErrorKind::EmptyTitle,
        });
    }
    Ok(trimmed.to_string())
}

// ===========================================
// Note Content
// ===========================================

/// The owner-authored part of a note.
///
/// The four task fields are present-or-absent: `None` means the field was
/// never set, while `Some("")` is a field that was set to empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteContent {
    title: String,
    note_type: String,
    description: String,
    completion_time: Option<String>,
    completion_date: Option<String>,
    status: Option<String>,
    delegation: Option<String>,
}

impl NoteContent {
    /// Starts building content for a new note with the given title.
    ///
    /// Title validation happens in [`NoteContentBuilder::build`].
    pub fn builder(title: impl Into<String>) -> NoteContentBuilder {
        NoteContentBuilder {
            title: title.into(),
            note_type: String::new(),
            description: String::new(),
            completion_time: None,
            completion_date: None,
            status: None,
            delegation: None,
        }
    }

    /// Returns the note's title (never empty).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-form note type, e.g. `task`.
    pub fn note_type(&self) -> &str {
        &self.note_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completion_time(&self) -> Option<&str> {
        self.completion_time.as_deref()
    }

    pub fn completion_date(&self) -> Option<&str> {
        self.completion_date.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn delegation(&self) -> Option<&str> {
        self.delegation.as_deref()
    }

    /// Derives the searchable text for this content.
    pub fn search_text(&self) -> String {
        derive_search_text(self)
    }

    /// Applies a patch, replacing every supplied field.
    ///
    /// The content is left untouched if the patch is invalid.
    pub fn apply(&mut self, update: &NoteUpdate) -> Result<(), ParseNoteError> {
        let title = update.title.as_deref().map(validate_title).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(note_type) = &update.note_type {
            self.note_type = note_type.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(value) = &update.completion_time {
            self.completion_time = value.clone();
        }
        if let Some(value) = &update.completion_date {
            self.completion_date = value.clone();
        }
        if let Some(value) = &update.status {
            self.status = value.clone();
        }
        if let Some(value) = &update.delegation {
            self.delegation = value.clone();
        }
        Ok(())
    }
}

/// Builder for [`NoteContent`].
#[derive(Debug, Clone)]
pub struct NoteContentBuilder {
    title: String,
    note_type: String,
    description: String,
    completion_time: Option<String>,
    completion_date: Option<String>,
    status: Option<String>,
    delegation: Option<String>,
}

impl NoteContentBuilder {
    pub fn note_type(mut self, note_type: impl Into<String>) -> Self {
        self.note_type = note_type.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn completion_time(mut self, value: Option<String>) -> Self {
        self.completion_time = value;
        self
    }

    pub fn completion_date(mut self, value: Option<String>) -> Self {
        self.completion_date = value;
        self
    }

    pub fn status(mut self, value: Option<String>) -> Self {
        self.status = value;
        self
    }

    pub fn delegation(mut self, value: Option<String>) -> Self {
        self.delegation = value;
        self
    }

    /// Validates and builds the content.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    pub fn build(self) -> Result<NoteContent, ParseNoteError> {
        Ok(NoteContent {
            title: validate_title(&self.title)?,
            note_type: self.note_type,
            description: self.description,
            completion_time: self.completion_time,
            completion_date: self.completion_date,
            status: self.status,
            delegation: self.delegation,
        })
    }
}

// ===========================================
// Note Update
// ===========================================

/// A partial update of note content.
///
/// Fields left as `None` are not touched. For the four task fields the inner
/// option is the new value, so `Some(None)` clears a field.
///
/// # Examples
///
/// ```
/// use noteshare::domain::{NoteContent, NoteUpdate};
///
/// let mut content = NoteContent::builder("Trip plan")
///     .status(Some("open".to_string()))
///     .build()
///     .unwrap();
///
/// let update = NoteUpdate::new().description("Pack bags").status(None);
/// content.apply(&update).unwrap();
///
/// assert_eq!(content.description(), "Pack bags");
/// assert_eq!(content.status(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    title: Option<String>,
    note_type: Option<String>,
    description: Option<String>,
    completion_time: Option<Option<String>>,
    completion_date: Option<Option<String>>,
    status: Option<Option<String>>,
    delegation: Option<Option<String>>,
}

impl NoteUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn note_type(mut self, note_type: impl Into<String>) -> Self {
        self.note_type = Some(note_type.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completion_time(mut self, value: Option<String>) -> Self {
        self.completion_time = Some(value);
        self
    }

    pub fn completion_date(mut self, value: Option<String>) -> Self {
        self.completion_date = Some(value);
        self
    }

    pub fn status(mut self, value: Option<String>) -> Self {
        self.status = Some(value);
        self
    }

    pub fn delegation(mut self, value: Option<String>) -> Self {
        self.delegation = Some(value);
        self
    }

    /// Returns true if the update supplies no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ===========================================
// Note
// ===========================================

/// A stored note.
///
/// Identity, owner and creation time are fixed by the store. The search text
/// is whatever the store derived on the last successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    id: NoteId,
    owner: Username,
    created: DateTime<Utc>,
    #[serde(flatten)]
    content: NoteContent,
    #[serde(skip)]
    search_text: String,
}

impl Note {
    /// Reassembles a note from stored parts.
    pub(crate) fn from_parts(
        id: NoteId,
        owner: Username,
        created: DateTime<Utc>,
        content: NoteContent,
        search_text: String,
    ) -> Self {
        Self {
            id,
            owner,
            created,
            content,
            search_text,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn owner(&self) -> &Username {
        &self.owner
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn content(&self) -> &NoteContent {
        &self.content
    }

    pub fn title(&self) -> &str {
        self.content.title()
    }

    /// Returns the search text stored alongside the note.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Returns true if `user` owns this note.
    pub fn is_owned_by(&self, user: &Username) -> bool {
        &self.owner == user
    }
}
