use std::process::ExitCode;

use clap::Parser;
use kpt_setters::cli::{Arguments, ExitStatus};
use kpt_setters::logging::setup_logging;

fn main() -> ExitCode {
    let args = Arguments::parse();

    if let Err(err) = setup_logging(args.log_level, args.log_format) {
        eprintln!("Error: {:#}", err);
        return ExitStatus::Error.into();
    }

    match kpt_setters::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
