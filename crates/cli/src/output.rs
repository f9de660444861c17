//! Writing command output to stdout or a file.
//!
//! Invariants:
//! - File output is written atomically (temp file + rename).
//! - Output always ends with a newline.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Pretty-print `value` as JSON to `output_file`, or stdout when `None`.
pub fn emit_json<T: Serialize>(value: &T, output_file: Option<&Path>) -> Result<()> {
    let mut rendered =
        serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    rendered.push('\n');

    match output_file {
        Some(path) => {
            write_to_file(&rendered, path)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            eprintln!("Results written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// Write `content` to `path` via a temp file in the same directory.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    // If path has no parent (e.g., just "env.json"), use current directory
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(parent_dir)
        .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
