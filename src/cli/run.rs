//! Dispatch a parsed command to its command handler.

use anyhow::Result;

use super::{
    args::Command,
    commands::{create::create, init::init, list::list},
    exit_status::ExitStatus,
};

pub fn run(command: Command) -> Result<ExitStatus> {
    match command {
        Command::Create(cmd) => create(cmd),
        Command::List(cmd) => list(cmd),
        Command::Init => init(),
    }
}
