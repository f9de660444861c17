//! Check command implementation.

use anyhow::Result;
use std::path::Path;

use crate::args::LoaderArgs;
use crate::output::emit_json;

pub fn run(loader_args: &LoaderArgs, output_file: Option<&Path>) -> Result<()> {
    let (_env, report) = super::load_process_env(loader_args)?;

    if report.dotenv_disabled {
        tracing::warn!("dotenv loading disabled; no .env files were read");
    }

    emit_json(&report, output_file)
}
