//! Tests for the layered environment loader.
//!
//! Responsibilities:
//! - Test candidate precedence and the first-writer-wins rule.
//! - Test mode defaulting and the test-mode exclusion of `.env.local`.
//! - Test template validation, expansion and search path normalization.
//! - Test the dotenv-disabled switch and parse error propagation.
//!
//! Invariants:
//! - Tests load into `MemoryEnv`, so they do not touch the process environment.
//! - Each test gets its own temporary application directory via `tempfile`.

use std::fs;
use tempfile::TempDir;

use crate::loader::builder::EnvLoader;
use crate::store::MemoryEnv;

pub mod dotenv_tests;

/// A temporary application directory containing `files`.
pub fn app_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("Failed to write env file");
    }
    dir
}

pub fn loader_for(dir: &TempDir) -> EnvLoader {
    EnvLoader::new(dir.path()).expect("temp dir should canonicalize")
}

/// Table with only the given entries.
pub fn env(vars: &[(&str, &str)]) -> MemoryEnv {
    vars.iter().copied().collect()
}
