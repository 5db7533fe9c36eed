//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `export`: Translation scripts → table
//! - `patch`: Original scripts + table → Condition column
//! - `import`: Table → rewritten translation scripts
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Export(cmd)) => cmd.common.verbose,
            Some(Command::Patch(cmd)) => cmd.common.verbose,
            Some(Command::Import(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Target language, e.g. `chinese` (overrides config file)
    #[arg(short, long, env = "TLBRIDGE_LANGUAGE")]
    pub language: Option<String>,

    /// Project root directory containing the game directory
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct PatchCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ImportCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export translation scripts into <language>.table
    Export(ExportCommand),
    /// Record the if/elif/else condition of each dialogue line in the table
    Patch(PatchCommand),
    /// Write translations from the table back into the translation scripts
    Import(ImportCommand),
    /// Initialize a new .tlbridgerc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_with_common_args() {
        let args =
            Arguments::try_parse_from(["tlbridge", "export", "-l", "chinese", "--root", "proj", "-v"])
                .unwrap();
        let Some(Command::Export(cmd)) = &args.command else {
            panic!("expected export command");
        };
        assert_eq!(cmd.common.language.as_deref(), Some("chinese"));
        assert_eq!(cmd.common.root, Some(PathBuf::from("proj")));
        assert!(args.verbose());
    }

    #[test]
    fn test_parse_init_has_no_verbose() {
        let args = Arguments::try_parse_from(["tlbridge", "init"]).unwrap();
        assert!(matches!(args.command, Some(Command::Init)));
        assert!(!args.verbose());
    }

    #[test]
    fn test_verify_cli() {
        Arguments::command().debug_assert();
    }
}
