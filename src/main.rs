//! `tstat`: summarise linked checkbox tasks by section.

use std::process::ExitCode;

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> ExitCode {
    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            cli::notify_failure(&error);
            ExitCode::FAILURE
        }
    }
}
