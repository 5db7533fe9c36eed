//! Command-line layer: argument parsing, command dispatch and reporting.

use std::time::Instant;

use anyhow::Result;
use colored::Colorize;

pub mod args;
pub mod commands;
pub mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

/// Set to any value to suppress the elapsed-time line.
pub const DISABLE_TIMING_ENV: &str = "TLBRIDGE_DISABLE_TIMING";

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let started = Instant::now();
    let result = run::run(args)?;
    report::print(&result, verbose);

    if std::env::var_os(DISABLE_TIMING_ENV).is_none() {
        eprintln!(
            "{} in {:.2}s",
            "Finished".bold().green(),
            started.elapsed().as_secs_f64()
        );
    }

    if result.error_count > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
