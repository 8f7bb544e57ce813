//! Builder for test notes with sensible defaults.

#![allow(dead_code)]

use noteshare::domain::{NoteContent, NoteContentBuilder};

/// Builder for creating test notes with sensible defaults.
///
/// Only the title is required; every other field starts empty.
#[derive(Debug, Clone)]
pub struct TestNote {
    title: String,
    note_type: String,
    description: String,
    status: Option<String>,
    delegation: Option<String>,
}

impl TestNote {
    /// Creates a new test note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note_type: String::new(),
            description: String::new(),
            status: None,
            delegation: None,
        }
    }

    /// Sets the note type.
    pub fn note_type(mut self, note_type: impl Into<String>) -> Self {
        self.note_type = note_type.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn delegation(mut self, delegation: impl Into<String>) -> Self {
        self.delegation = Some(delegation.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Converts to a content builder ready for `NoteService::create_note`.
    pub fn to_draft(&self) -> NoteContentBuilder {
        NoteContent::builder(self.title.as_str())
            .note_type(self.note_type.as_str())
            .description(self.description.as_str())
            .status(self.status.clone())
            .delegation(self.delegation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults() {
        let content = TestNote::new("Trip plan").to_draft().build().unwrap();
        assert_eq!(content.title(), "Trip plan");
        assert_eq!(content.description(), "");
        assert_eq!(content.status(), None);
    }

    #[test]
    fn test_note_builder_sets_fields() {
        let content = TestNote::new("Trip plan")
            .note_type("task")
            .description("Pack bags")
            .status("open")
            .delegation("bob")
            .to_draft()
            .build()
            .unwrap();
        assert_eq!(content.note_type(), "task");
        assert_eq!(content.description(), "Pack bags");
        assert_eq!(content.status(), Some("open"));
        assert_eq!(content.delegation(), Some("bob"));
    }
}
