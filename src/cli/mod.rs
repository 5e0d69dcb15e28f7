use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs, CreateArgs, CreateCommand, ListArgs, ListCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(command) = args.command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(command)
}
