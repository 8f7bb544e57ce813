//! Handlers for creating, showing, editing and deleting notes.

use anyhow::Result;
use std::io::Write;

use super::{Service, report};
use crate::access::AccessibleNote;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::session::Session;
use crate::cli::{ClearableField, EditArgs, NewArgs, RmArgs, ShowArgs};
use crate::domain::{Capability, Note, NoteContent, NoteUpdate};
use crate::store::NotesError;

pub fn handle_new<W: Write>(
    args: &NewArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let owner = session.require_user()?;

    let draft = NoteContent::builder(args.title.as_str())
        .note_type(args.note_type.as_str())
        .description(args.desc.as_str())
        .completion_time(args.completion_time.clone())
        .completion_date(args.completion_date.clone())
        .status(args.status.clone())
        .delegation(args.delegation.clone());

    let note = service.create_note(&owner, draft).map_err(report)?;

    match args.format {
        OutputFormat::Human => writeln!(out, "Created: {} [#{}]", note.title(), note.id())?,
        OutputFormat::Json => writeln!(out, "{}", Output::new(&note).to_json()?)?,
    }
    Ok(())
}

pub fn handle_show<W: Write>(
    args: &ShowArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let requester = session.require_user()?;
    let accessible = service.get_note(&requester, args.id).map_err(report)?;

    match args.format {
        OutputFormat::Human => write_note(out, &accessible)?,
        OutputFormat::Json => writeln!(out, "{}", Output::new(&accessible).to_json()?)?,
    }
    Ok(())
}

fn write_note<W: Write>(out: &mut W, accessible: &AccessibleNote) -> Result<()> {
    let note = &accessible.note;
    let content = note.content();

    writeln!(out, "# {}", note.title())?;
    writeln!(out)?;

    if !content.description().is_empty() {
        writeln!(out, "{}", content.description())?;
        writeln!(out)?;
    }

    let access = match &accessible.capability {
        Capability::Owner => "owner".to_string(),
        Capability::Shared(privilege) => format!("shared ({})", privilege),
        Capability::None => "none".to_string(),
    };
    writeln!(
        out,
        "ID: #{}  Owner: {}  Created: {}  Access: {}",
        note.id(),
        note.owner(),
        note.created().format("%Y-%m-%d"),
        access
    )?;

    if !content.note_type().is_empty() {
        writeln!(out, "Type: {}", content.note_type())?;
    }
    if let Some(status) = content.status() {
        writeln!(out, "Status: {}", status)?;
    }
    match (content.completion_date(), content.completion_time()) {
        (Some(date), Some(time)) => writeln!(out, "Due: {} {}", date, time)?,
        (Some(date), None) => writeln!(out, "Due: {}", date)?,
        (None, Some(time)) => writeln!(out, "Due: {}", time)?,
        (None, None) => {}
    }
    if let Some(delegation) = content.delegation() {
        writeln!(out, "Delegated to: {}", delegation)?;
    }

    Ok(())
}

/// Builds the field update described by `edit` arguments.
pub(crate) fn update_from_args(args: &EditArgs) -> Result<NoteUpdate, NotesError> {
    let mut update = NoteUpdate::new();

    if let Some(title) = &args.title {
        update = update.title(title.as_str());
    }
    if let Some(note_type) = &args.note_type {
        update = update.note_type(note_type.as_str());
    }
    if let Some(desc) = &args.desc {
        update = update.description(desc.as_str());
    }
    if args.completion_time.is_some() {
        update = update.completion_time(args.completion_time.clone());
    }
    if args.completion_date.is_some() {
        update = update.completion_date(args.completion_date.clone());
    }
    if args.status.is_some() {
        update = update.status(args.status.clone());
    }
    if args.delegation.is_some() {
        update = update.delegation(args.delegation.clone());
    }

    for field in &args.clear {
        let (flag, set) = match field {
            ClearableField::CompletionTime => ("completion-time", &args.completion_time),
            ClearableField::CompletionDate => ("completion-date", &args.completion_date),
            ClearableField::Status => ("status", &args.status),
            ClearableField::Delegation => ("delegation", &args.delegation),
        };
        if set.is_some() {
            return Err(NotesError::Validation(format!(
                "--{flag} cannot be combined with --clear {flag}"
            )));
        }

        update = match field {
            ClearableField::CompletionTime => update.completion_time(None),
            ClearableField::CompletionDate => update.completion_date(None),
            ClearableField::Status => update.status(None),
            ClearableField::Delegation => update.delegation(None),
        };
    }

    Ok(update)
}

pub fn handle_edit<W: Write>(
    args: &EditArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let requester = session.require_user()?;

    let update = update_from_args(args).map_err(report)?;
    if update.is_empty() {
        return Err(report(NotesError::Validation(
            "nothing to change; pass at least one field".to_string(),
        )));
    }

    let note: Note = service
        .update_note(&requester, args.id, &update)
        .map_err(report)?;

    match args.format {
        OutputFormat::Human => writeln!(out, "Updated: {} [#{}]", note.title(), note.id())?,
        OutputFormat::Json => writeln!(out, "{}", Output::new(&note).to_json()?)?,
    }
    Ok(())
}

pub fn handle_rm<W: Write>(
    args: &RmArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let requester = session.require_user()?;
    service.delete_note(&requester, args.id).map_err(report)?;
    writeln!(out, "Deleted note #{}", args.id)?;
    Ok(())
}
