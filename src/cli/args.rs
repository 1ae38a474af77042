//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all qtl commands.
//! It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `check`: Run translation checks (placeholders, unfinished, missing messages, etc.)
//! - `clean`: Remove obsolete/vanished messages from translation files
//! - `stats`: Print per-file translation progress
//! - `init`: Initialize qtl configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use super::commands::check::CheckRule;

#[derive(Debug, Parser)]
#[command(name = "qtl", author, version, about, long_about = None)]
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
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Clean(cmd)) => cmd.args.common.verbose,
            Some(Command::Stats(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root, where .qtlrc.json is looked up (default: current directory)
    #[arg(long, env = "QTL_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Directory holding the .ts files (overrides config file)
    #[arg(long)]
    pub translations_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CleanRule {
    Obsolete,
    Vanished,
}

#[derive(Debug, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually remove messages (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Rules to clean (default: all)
    /// Can be specified multiple times: --rules obsolete --rules vanished
    #[arg(long, value_enum)]
    pub rules: Vec<CleanRule>,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub args: CleanArgs,
}

#[derive(Debug, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    #[command(flatten)]
    pub args: StatsArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check translation files for problems (placeholders, unfinished, missing and unused messages)
    Check(CheckCommand),
    /// Remove obsolete or vanished messages from .ts files
    Clean(CleanCommand),
    /// Show translation progress for each .ts file
    Stats(StatsCommand),
    /// Initialize a new .qtlrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
