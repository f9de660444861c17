//! clientenv - load layered `.env` files and project them for a bundler.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load `.env`, `.env.<mode>`, `.env.local` and `.env.<mode>.local` into the process environment.
//! - Print projections, candidate lists and load reports as JSON.
//!
//! Does NOT handle:
//! - Loading or projection rules (see `crates/config`).
//!
//! Invariants:
//! - Logging goes to stderr; stdout carries only command output.
//! - The process environment is written before any other thread exists.

mod args;
mod commands;
mod dispatch;
mod error;
mod output;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
