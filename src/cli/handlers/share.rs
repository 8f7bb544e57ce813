//! Sharing command handlers.

use anyhow::Result;
use std::io::Write;

use super::{Service, report};
use crate::cli::output::{Output, OutputFormat};
use crate::cli::session::Session;
use crate::cli::{GranteesArgs, ShareArgs, UnshareArgs};

pub fn handle_share<W: Write>(
    args: &ShareArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let requester = session.require_user()?;

    let Some(grantee) = &args.grantee else {
        let candidates = service
            .share_candidates(&requester, args.id)
            .map_err(report)?;
        match args.format {
            OutputFormat::Human => {
                if candidates.is_empty() {
                    writeln!(out, "No users to share with.")?;
                }
                for user in &candidates {
                    writeln!(out, "{}", user)?;
                }
            }
            OutputFormat::Json => writeln!(out, "{}", Output::new(&candidates).to_json()?)?,
        }
        return Ok(());
    };

    service
        .share_note(&requester, args.id, grantee, &args.privilege)
        .map_err(report)?;
    writeln!(
        out,
        "Shared #{} with {} ({})",
        args.id, grantee, args.privilege
    )?;
    Ok(())
}

pub fn handle_unshare<W: Write>(
    args: &UnshareArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let requester = session.require_user()?;
    let grantee = args.grantee.as_ref().unwrap_or(&requester);

    service
        .revoke_share(&requester, args.id, grantee)
        .map_err(report)?;
    writeln!(out, "Revoked {}'s access to #{}", grantee, args.id)?;
    Ok(())
}

pub fn handle_grantees<W: Write>(
    args: &GranteesArgs,
    service: &Service,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let requester = session.require_user()?;
    let grantees = service.grantees(&requester, args.id).map_err(report)?;

    match args.format {
        OutputFormat::Human => {
            if grantees.is_empty() {
                writeln!(out, "Note #{} is not shared with anyone.", args.id)?;
            } else {
                for grantee in &grantees {
                    writeln!(out, "{:<20}  {}", grantee.username.as_str(), grantee.privilege)?;
                }
            }
        }
        OutputFormat::Json => writeln!(out, "{}", Output::new(&grantees).to_json()?)?,
    }
    Ok(())
}
