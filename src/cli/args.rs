//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Classify every defined translation key and emit the report
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
            Some(Command::Analyze(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by analysis commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Key document path (overrides config file)
    #[arg(long)]
    pub key_document: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when unused keys are found
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    pub args: AnalyzeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify translation keys as used, possibly dynamic, or unused
    Analyze(AnalyzeCommand),
    /// Initialize a new .lokeyrc.json configuration file
    Init,
}
