//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Note;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Renders the wrapper as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteSummary {
    pub id: i64,
    pub title: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privilege: Option<String>,
}

impl NoteSummary {
    pub fn owned(note: &Note) -> Self {
        Self {
            id: note.id().get(),
            title: note.title().to_string(),
            owner: note.owner().to_string(),
            privilege: None,
        }
    }

    pub fn shared(note: &Note, privilege: &str) -> Self {
        Self {
            privilege: Some(privilege.to_string()),
            ..Self::owned(note)
        }
    }
}
