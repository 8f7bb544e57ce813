//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;
pub mod session;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{NoteId, Privilege, Username};
use output::OutputFormat;

/// noteshare - multi-user notes with sharing and full-text search
#[derive(Parser, Debug)]
#[command(name = "noteshare", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Act as this user
    #[arg(short, long, global = true, env = "NOTESHARE_USER")]
    pub user: Option<Username>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the user directory
    #[command(subcommand)]
    User(UserCommand),

    /// Create a new note
    New(NewArgs),

    /// Show a note you own or that is shared with you
    Show(ShowArgs),

    /// Change fields of a note you own
    Edit(EditArgs),

    /// Delete a note you own
    Rm(RmArgs),

    /// List your notes and the notes shared with you
    #[command(name = "ls")]
    List(ListArgs),

    /// Full-text search across your notes
    Search(SearchArgs),

    /// Share a note with another user
    Share(ShareArgs),

    /// Revoke a share
    Unshare(UnshareArgs),

    /// List who a note is shared with
    Grantees(GranteesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user
    Add(UserAddArgs),

    /// List registered users
    #[command(name = "ls")]
    List(UserListArgs),
}

/// Arguments for the `user add` command
#[derive(Parser, Debug)]
pub struct UserAddArgs {
    /// Username to register
    pub name: Username,
}

/// Arguments for the `user ls` command
#[derive(Parser, Debug)]
pub struct UserListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    pub title: String,

    /// Note type, e.g. "task"
    #[arg(short = 't', long = "type", default_value = "")]
    pub note_type: String,

    /// Description
    #[arg(short = 'D', long, default_value = "")]
    pub desc: String,

    #[arg(long)]
    pub completion_time: Option<String>,

    #[arg(long)]
    pub completion_date: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    /// Who the note is delegated to
    #[arg(long)]
    pub delegation: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID (e.g. 12 or #12)
    pub id: NoteId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// An optional note field that `edit --clear` can remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClearableField {
    CompletionTime,
    CompletionDate,
    Status,
    Delegation,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID (e.g. 12 or #12)
    pub id: NoteId,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New note type
    #[arg(short = 't', long = "type")]
    pub note_type: Option<String>,

    /// New description
    #[arg(short = 'D', long)]
    pub desc: Option<String>,

    #[arg(long)]
    pub completion_time: Option<String>,

    #[arg(long)]
    pub completion_date: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub delegation: Option<String>,

    /// Remove an optional field (can be specified multiple times)
    #[arg(long = "clear", value_enum, action = ArgAction::Append)]
    pub clear: Vec<ClearableField>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID (e.g. 12 or #12)
    pub id: NoteId,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `share` command
#[derive(Parser, Debug)]
pub struct ShareArgs {
    /// Note ID (e.g. 12 or #12)
    pub id: NoteId,

    /// User to share with. Required unless --candidates is used.
    #[arg(required_unless_present = "candidates")]
    pub grantee: Option<Username>,

    /// Privilege label recorded on the grant
    #[arg(short, long, default_value = "read")]
    pub privilege: Privilege,

    /// List users the note could be shared with instead of sharing
    #[arg(long, conflicts_with = "grantee")]
    pub candidates: bool,

    /// Output format (for --candidates)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `unshare` command
#[derive(Parser, Debug)]
pub struct UnshareArgs {
    /// Note ID (e.g. 12 or #12)
    pub id: NoteId,

    /// Grantee to revoke (defaults to yourself)
    pub grantee: Option<Username>,
}

/// Arguments for the `grantees` command
#[derive(Parser, Debug)]
pub struct GranteesArgs {
    /// Note ID (e.g. 12 or #12)
    pub id: NoteId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
