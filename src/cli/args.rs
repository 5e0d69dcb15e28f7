//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `create`: Annotate fields whose values match the configured setters
//! - `list`: Report how often each setter is referenced by existing annotations
//! - `init`: Initialize the project configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing::Level;

use crate::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Diagnostic log level (a valid RUST_LOG takes precedence)
    #[arg(long, global = true, value_name = "LEVEL", env = "KPT_SETTERS_LOG_LEVEL")]
    pub log_level: Option<Level>,

    /// Diagnostic log format
    #[arg(long, global = true, value_enum, default_value_t)]
    pub log_format: LogFormat,
}

impl Arguments {
    /// Take the command if one was provided, otherwise print help and return None.
    pub fn command_or_help(self) -> Option<Command> {
        if self.command.is_none() {
            Self::command().print_help().ok();
        }
        self.command
    }
}

/// Common arguments shared by `create` and `list`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Package directory to process
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Setter config file (overrides config file)
    #[arg(long)]
    pub setters: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CreateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write annotations (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct CreateCommand {
    #[command(flatten)]
    pub args: CreateArgs,
}

#[derive(Debug, Parser)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the setter table as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub args: ListArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add kpt-set annotations to fields matching the setter values
    Create(CreateCommand),
    /// List setters with the number of fields that reference them
    List(ListCommand),
    /// Initialize a new .settersrc.json configuration file
    Init,
}
