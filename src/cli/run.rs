/// Main entry point for the qtl CLI.
///
/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with error counts and exit behavior
/// - `Err` if the command fails (e.g., invalid config, no translation files)
///
/// # Example
/// ```ignore
/// let args = Arguments::parse();
/// let result = run(args)?;
/// if result.exit_on_errors && result.error_count > 0 {
///     std::process::exit(1);
/// }
/// ```
use std::path::Path;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{check::check, clean::clean, init::init, stats::stats},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Clean(cmd)) => clean(cmd),
        Some(Command::Stats(cmd)) => stats(cmd),
        Some(Command::Init) => init(Path::new(".")),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
