//! Show command implementation.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::path::Path;

use crate::args::{LoaderArgs, View};
use crate::output::emit_json;
use clientenv_config::client_environment;

pub fn run(
    loader_args: &LoaderArgs,
    filter: Option<&str>,
    ignore_case: bool,
    extras: Vec<(String, String)>,
    view: View,
    output_file: Option<&Path>,
) -> Result<()> {
    // Validate the pattern before touching the environment.
    let filter = filter
        .map(|pattern| build_filter(pattern, ignore_case))
        .transpose()?;

    let (env, _report) = super::load_process_env(loader_args)?;

    let extras: BTreeMap<String, String> = extras.into_iter().collect();
    let projected = client_environment(&env, filter.as_ref(), Some(extras));
    tracing::info!(keys = projected.raw.len(), "projected client environment");

    match view {
        View::Raw => emit_json(&projected.raw, output_file),
        View::Stringified => emit_json(&projected.stringified, output_file),
        View::Both => emit_json(&projected, output_file),
    }
}

fn build_filter(pattern: &str, ignore_case: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .with_context(|| format!("Invalid filter pattern `{pattern}`"))
}
