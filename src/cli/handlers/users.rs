//! User directory command handlers.

use anyhow::Result;
use std::io::Write;

use super::{Service, report};
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{UserAddArgs, UserListArgs};
use crate::store::UserDirectory;

pub fn handle_user_add<W: Write>(args: &UserAddArgs, service: &Service, out: &mut W) -> Result<()> {
    service.store().add_user(&args.name).map_err(report)?;
    writeln!(out, "Added user: {}", args.name)?;
    Ok(())
}

pub fn handle_user_list<W: Write>(
    args: &UserListArgs,
    service: &Service,
    out: &mut W,
) -> Result<()> {
    let users = service.store().list_users().map_err(report)?;

    match args.format {
        OutputFormat::Human => {
            if users.is_empty() {
                writeln!(out, "No users registered.")?;
            } else {
                for user in &users {
                    writeln!(out, "{}", user)?;
                }
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", Output::new(&users).to_json()?)?;
        }
    }

    Ok(())
}
