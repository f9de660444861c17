//! CLI command implementations.

pub mod check;
pub mod files;
pub mod show;

use anyhow::{Context, Result};
use clientenv_config::{EnvLoader, EnvStore, LoadReport, ProcessEnv};

use crate::args::LoaderArgs;

/// Build a loader from the global loader options.
pub fn build_loader(args: &LoaderArgs) -> Result<EnvLoader> {
    let loader = match &args.dir {
        Some(dir) => EnvLoader::new(dir),
        None => EnvLoader::from_current_dir(),
    }
    .context("Failed to resolve application directory")?;

    Ok(loader
        .with_base_name(args.base_name.clone())
        .with_allow_empty_values(args.allow_empty_values)
        .with_dotenv_disabled(args.no_dotenv))
}

/// Apply `--mode` to the process environment before loading.
pub fn apply_mode(loader: &EnvLoader, args: &LoaderArgs, env: &mut ProcessEnv) {
    if let Some(mode) = args.mode.as_deref().filter(|m| !m.is_empty()) {
        tracing::debug!(var = loader.mode_var(), mode, "mode set from command line");
        env.set(loader.mode_var(), mode);
    }
}

/// Load the layered files into the process environment.
pub fn load_process_env(args: &LoaderArgs) -> Result<(ProcessEnv, LoadReport)> {
    let loader = build_loader(args)?;
    let mut env = ProcessEnv::new();
    apply_mode(&loader, args, &mut env);

    let report = loader
        .load(&mut env)
        .context("Failed to load environment")?;
    Ok((env, report))
}
