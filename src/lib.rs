//! noteshare - multi-user notes with sharing and full-text search

pub mod access;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod store;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;

use access::NoteService;
use cli::{
    Cli, Command, UserCommand,
    config::Config,
    handlers::{
        handle_completions, handle_edit, handle_grantees, handle_list, handle_new, handle_rm,
        handle_search, handle_share, handle_show, handle_unshare, handle_user_add,
        handle_user_list, report,
    },
    session::Session,
};
use store::SqliteStore;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logging(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args, &mut out);
    }

    let config = Config::load()?;
    let db_path = config.database_path(cli.db.as_ref());
    let store = SqliteStore::open(&db_path)
        .map_err(report)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    let service = NoteService::new(store);
    let session = Session::new(cli.user.as_ref(), &config);

    match &cli.command {
        Command::User(UserCommand::Add(args)) => handle_user_add(args, &service, &mut out),
        Command::User(UserCommand::List(args)) => handle_user_list(args, &service, &mut out),
        Command::New(args) => handle_new(args, &service, &session, &mut out),
        Command::Show(args) => handle_show(args, &service, &session, &mut out),
        Command::Edit(args) => handle_edit(args, &service, &session, &mut out),
        Command::Rm(args) => handle_rm(args, &service, &session, &mut out),
        Command::List(args) => handle_list(args, &service, &session, &mut out),
        Command::Search(args) => handle_search(args, &service, &session, &mut out),
        Command::Share(args) => handle_share(args, &service, &session, &mut out),
        Command::Unshare(args) => handle_unshare(args, &service, &session, &mut out),
        Command::Grantees(args) => handle_grantees(args, &service, &session, &mut out),
        Command::Completions(_) => Ok(()),
    }?;

    out.flush()?;
    Ok(())
}
