//! Shared test utilities for clientenv integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory rooted in a temp application directory.
//! - Write `.env`-style fixture files.
//!
//! Invariants / Assumptions:
//! - Variables the loader reads are cleared so the host environment cannot leak in.
//! - Commands run with the temp directory as their working directory.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Variables the loader consults; cleared for every test command.
const LOADER_VARS: [&str; 6] = [
    "NODE_ENV",
    "NODE_PATH",
    "NO_EXPAND",
    "DOTENV_DISABLED",
    "CLIENTENV_DIR",
    "RUST_LOG",
];

/// A temp application directory containing `files`.
pub fn app_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("Failed to write env file");
    }
    dir
}

/// Returns a hermetic `clientenv` command running inside `dir`.
pub fn clientenv_cmd(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("clientenv");
    cmd.current_dir(dir.path());
    for var in LOADER_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Run `clientenv` with `args` and parse stdout as JSON.
#[allow(dead_code)]
pub fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = clientenv_cmd(dir)
        .args(args)
        .output()
        .expect("Failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}
