//! Dispatches a parsed command line to its command handler.
//!
//! # Returns
//! - `Ok(CommandResult)` with the summary and every collected issue
//! - `Err` if the command was aborted (config error, unreadable table, missing directory)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, export::export, import::import, init::init, patch::patch},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Export(cmd)) => export(cmd),
        Some(Command::Patch(cmd)) => patch(cmd),
        Some(Command::Import(cmd)) => import(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
