//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Logging setup or exit codes (see `main()`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let output_file = cli.output_file.as_deref();

    match cli.command {
        Commands::Show {
            filter,
            ignore_case,
            extras,
            view,
        } => commands::show::run(
            &cli.loader,
            filter.as_deref(),
            ignore_case,
            extras,
            view,
            output_file,
        ),
        Commands::Files => commands::files::run(&cli.loader, output_file),
        Commands::Check => commands::check::run(&cli.loader, output_file),
    }
}
