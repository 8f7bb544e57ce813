//! Search command handler.

use anyhow::Result;
use std::io::Write;

use super::{Service, report};
use crate::cli::SearchArgs;
use crate::cli::output::{NoteSummary, Output, OutputFormat};
use crate::cli::session::Session;

pub fn handle_search<W: Write>(
    args: &SearchArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let requester = session.require_user()?;
    let results = service.search(&requester, &args.query).map_err(report)?;
    log::debug!("search {:?} matched {} note(s)", args.query, results.len());

    match args.format {
        OutputFormat::Human => {
            if results.is_empty() {
                writeln!(out, "No matching notes found.")?;
            } else {
                for note in &results {
                    writeln!(out, "#{} {}", note.id(), note.title())?;
                    let description = note.content().description();
                    if !description.is_empty() {
                        writeln!(out, "  {}", description)?;
                    }
                }
                writeln!(out)?;
                writeln!(out, "{} result(s)", results.len())?;
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteSummary> = results.iter().map(NoteSummary::owned).collect();
            writeln!(out, "{}", Output::new(listings).to_json()?)?;
        }
    }
    Ok(())
}
