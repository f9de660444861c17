//! Files command implementation.
//!
//! Lists the candidate files for the resolved mode without reading them.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::args::LoaderArgs;
use crate::output::emit_json;
use clientenv_config::{CandidateKind, ProcessEnv};

#[derive(Debug, Serialize)]
struct FileEntry {
    kind: Option<CandidateKind>,
    path: PathBuf,
    exists: bool,
}

#[derive(Debug, Serialize)]
struct FilesOutput {
    mode: String,
    app_dir: PathBuf,
    /// Highest precedence first.
    candidates: Vec<FileEntry>,
    template: FileEntry,
}

pub fn run(loader_args: &LoaderArgs, output_file: Option<&Path>) -> Result<()> {
    let loader = super::build_loader(loader_args)?;
    let mut env = ProcessEnv::new();
    super::apply_mode(&loader, loader_args, &mut env);
    let mode = loader.resolve_mode(&mut env);

    let candidates = loader
        .candidates(&mode)
        .into_iter()
        .map(|candidate| FileEntry {
            kind: Some(candidate.kind),
            exists: candidate.exists(),
            path: candidate.path,
        })
        .collect();

    let template_path = loader.template_path();
    let output = FilesOutput {
        mode,
        app_dir: loader.app_dir().to_path_buf(),
        candidates,
        template: FileEntry {
            kind: None,
            exists: template_path.is_file(),
            path: template_path,
        },
    };

    emit_json(&output, output_file)
}
