//! Command handlers for the CLI.
//!
//! Handlers write to any `io::Write` so tests can capture their output.

mod list;
mod notes;
mod search;
mod share;
mod users;


use anyhow::Result;
use clap::CommandFactory;
use std::io::Write;

use super::{Cli, CompletionsArgs};
use crate::access::NoteService;
use crate::store::{ErrorKind, NotesError, SqliteStore};

// Re-export public items
pub use list::handle_list;
pub use notes::{handle_edit, handle_new, handle_rm, handle_show};
pub use search::handle_search;
pub use share::{handle_grantees, handle_share, handle_unshare};
pub use users::{handle_user_add, handle_user_list};

/// The service every handler operates on.
pub type Service = NoteService<SqliteStore>;

// ===========================================
// Shared Utilities
// ===========================================

/// Returns the message prefix shown for each kind of failure.
pub fn error_prefix(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "invalid input",
        ErrorKind::NotFound => "not found",
        ErrorKind::NoSuchNote => "no such note",
        ErrorKind::NoSuchGrant => "no such grant",
        ErrorKind::NoSuchUser => "unknown user",
        ErrorKind::DuplicateGrant => "already shared",
        ErrorKind::Forbidden => "permission denied",
        ErrorKind::Store => "storage failure",
    }
}

/// Converts a core error into a CLI error carrying its kind prefix.
pub(crate) fn report(err: NotesError) -> anyhow::Error {
    let prefix = error_prefix(err.kind());
    anyhow::Error::new(err).context(prefix)
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

pub fn handle_completions<W: Write>(args: &CompletionsArgs, out: &mut W) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "noteshare", out);
    Ok(())
}
