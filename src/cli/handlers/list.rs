//! List command handler.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use super::{Service, report, truncate_str};
use crate::cli::ListArgs;
use crate::cli::output::{NoteSummary, Output, OutputFormat};
use crate::cli::session::Session;

#[derive(Debug, Serialize)]
struct VisibleNotes {
    owned: Vec<NoteSummary>,
    shared: Vec<NoteSummary>,
}

pub fn handle_list<W: Write>(
    args: &ListArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let requester = session.require_user()?;
    let listing = service.list_visible(&requester).map_err(report)?;

    let visible = VisibleNotes {
        owned: listing.owned.iter().map(NoteSummary::owned).collect(),
        shared: listing
            .shared
            .iter()
            .map(|s| NoteSummary::shared(&s.note, s.privilege.as_str()))
            .collect(),
    };

    match args.format {
        OutputFormat::Human => {
            if visible.owned.is_empty() && visible.shared.is_empty() {
                writeln!(out, "No notes found.")?;
                return Ok(());
            }

            if !visible.owned.is_empty() {
                writeln!(out, "Your notes")?;
                writeln!(out, "{:<6}  {:<50}", "ID", "Title")?;
                writeln!(out, "{:<6}  {:<50}", "------", "-".repeat(50))?;
                for note in &visible.owned {
                    writeln!(out, "{:<6}  {:<50}", format!("#{}", note.id), truncate_str(&note.title, 50))?;
                }
            }

            if !visible.shared.is_empty() {
                if !visible.owned.is_empty() {
                    writeln!(out)?;
                }
                writeln!(out, "Shared with you")?;
                writeln!(out, "{:<6}  {:<40}  {:<16}  {:<10}", "ID", "Title", "Owner", "Privilege")?;
                writeln!(
                    out,
                    "{:<6}  {:<40}  {:<16}  {:<10}",
                    "------",
                    "-".repeat(40),
                    "-".repeat(16),
                    "-".repeat(10)
                )?;
                for note in &visible.shared {
                    writeln!(
                        out,
                        "{:<6}  {:<40}  {:<16}  {:<10}",
                        format!("#{}", note.id),
                        truncate_str(&note.title, 40),
                        truncate_str(&note.owner, 16),
                        note.privilege.as_deref().unwrap_or("")
                    )?;
                }
            }

            writeln!(out)?;
            writeln!(
                out,
                "{} owned, {} shared",
                visible.owned.len(),
                visible.shared.len()
            )?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", Output::new(&visible).to_json()?)?;
        }
    }

    Ok(())
}
