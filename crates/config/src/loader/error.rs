//! Error types for environment loading.
//!
//! Responsibilities:
//! - Define error variants for all loading failures.
//! - Strip the remediation paragraph from template-check failures.
//!
//! Does NOT handle:
//! - Formatting parse errors; those pass through exactly as the parser reports them.
//!
//! Invariants:
//! - Errors NEVER include raw .env line contents to prevent secret leakage.
//! - A missing candidate file is not represented here at all.

use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

use crate::parse::{ParseError, ParseFileError};
use crate::validate::{MissingVarsError, ValidateError};

/// Errors that can occur while loading `.env` files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to resolve application directory {}", .path.display())]
    AppDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Keys declared in the template file are missing after a load step.
    #[error("{message}")]
    MissingVars {
        message: String,
        missing: Vec<String>,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ParseFileError> for LoadError {
    fn from(error: ParseFileError) -> Self {
        match error {
            ParseFileError::Read { path, source } => LoadError::Io { path, source },
            ParseFileError::Syntax(e) => LoadError::Parse(e),
        }
    }
}

impl From<ValidateError> for LoadError {
    fn from(error: ValidateError) -> Self {
        match error {
            ValidateError::Missing(e) => e.into(),
            ValidateError::Template(e) => e.into(),
        }
    }
}

impl From<MissingVarsError> for LoadError {
    fn from(error: MissingVarsError) -> Self {
        LoadError::MissingVars {
            message: strip_remediation(&error.message),
            missing: error.missing,
        }
    }
}

fn remediation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)If you expect any of these variables.*\z")
            .expect("remediation pattern is valid")
    })
}

/// Drop the "If you expect any of these variables..." paragraph and trim.
pub(crate) fn strip_remediation(message: &str) -> String {
    remediation_pattern()
        .replace(message, "")
        .trim()
        .to_string()
}
