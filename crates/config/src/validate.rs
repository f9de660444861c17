//! Presence checks against a template (`.env.example`) file.
//!
//! The template lists every key the application expects. Its values are
//! ignored; only the key names matter.

use std::path::Path;
use thiserror::Error;

use crate::parse::{ParseFileError, parse_file};
use crate::store::EnvStore;

/// Remediation paragraph appended to [`MissingVarsError`] messages.
pub const EMPTY_VALUES_HINT: &str = "If you expect any of these variables to be empty, you can set the allow_empty_values option to true.";

/// One or more template keys are missing from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct MissingVarsError {
    /// Missing keys, in template order.
    pub missing: Vec<String>,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error(transparent)]
    Missing(#[from] MissingVarsError),

    #[error(transparent)]
    Template(#[from] ParseFileError),
}

/// Check that every key declared in `template` is set in `store`.
///
/// Unless `allow_empty` is set, an empty value counts as missing.
pub fn check_template<S: EnvStore + ?Sized>(
    store: &S,
    template: &Path,
    allow_empty: bool,
) -> Result<(), ValidateError> {
    let declared = parse_file(template)?;

    let missing: Vec<String> = declared
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| match store.get(key) {
            None => true,
            Some(value) => value.is_empty() && !allow_empty,
        })
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let mut message = format!(
        "The following variables were defined in {} but are not present in the environment:\n  {}\nMake sure to add them to .env or directly to the environment.",
        template.display(),
        missing.join(", ")
    );
    if !allow_empty {
        message.push_str("\n\n");
        message.push_str(EMPTY_VALUES_HINT);
    }

    Err(MissingVarsError { missing, message }.into())
}
