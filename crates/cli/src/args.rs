//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `KEY=VALUE` extras for projections.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not load `.env` files (see `commands`).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clientenv")]
#[command(about = "Load layered .env files and project them for a bundler", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  clientenv show --filter '^REACT_APP_' --ignore-case --extra NODE_ENV=production\n  clientenv --mode test files\n  clientenv --dir ./web check\n"
)]
pub struct Cli {
    #[command(flatten)]
    pub loader: LoaderArgs,

    /// Write output to a file instead of stdout
    #[arg(long, global = true)]
    pub output_file: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options that shape how `.env` files are located and loaded.
#[derive(Args, Debug, Clone)]
pub struct LoaderArgs {
    /// Application directory containing the .env files (default: current directory)
    #[arg(short, long, global = true, env = "CLIENTENV_DIR")]
    pub dir: Option<PathBuf>,

    /// Mode to load; overrides the mode variable when given
    #[arg(short, long, global = true)]
    pub mode: Option<String>,

    /// Base name of the environment files
    #[arg(long, global = true, default_value = ".env")]
    pub base_name: String,

    /// Accept empty values for keys listed in the example file
    #[arg(long, global = true)]
    pub allow_empty_values: bool,

    /// Skip reading .env files (mode default and NODE_PATH still apply)
    #[arg(long, global = true, env = "DOTENV_DISABLED")]
    pub no_dotenv: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the environment and print the client projection as JSON
    Show {
        /// Regular expression selecting variable names (default: all)
        #[arg(short, long)]
        filter: Option<String>,

        /// Match the filter case-insensitively
        #[arg(short = 'i', long)]
        ignore_case: bool,

        /// Extra KEY=VALUE pairs merged under the environment
        #[arg(short, long = "extra", value_parser = parse_key_val)]
        extras: Vec<(String, String)>,

        /// Which part of the projection to print
        #[arg(long, value_enum, default_value_t = View::Both)]
        view: View,
    },

    /// List candidate files for the resolved mode
    Files,

    /// Load the environment and print a report of what was loaded
    Check,
}

/// Projection output selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Raw,
    Stringified,
    Both,
}

/// Parse a `KEY=VALUE` pair. The value may itself contain `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
