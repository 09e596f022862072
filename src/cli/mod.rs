//! Command-line interface layer.

pub mod args;
mod exit_status;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use anyhow::Result;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
