//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map LoadError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use clientenv_config::LoadError;

/// Structured exit codes for clientenv.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Keys declared in the example file are missing from the environment.
    ///
    /// Scripts should define the listed variables and run again.
    MissingVariables = 2,

    /// An environment file has invalid syntax.
    ParseError = 3,

    /// The `--filter` pattern is not a valid regular expression.
    InvalidFilter = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&LoadError> for ExitCode {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::MissingVars { .. } => ExitCode::MissingVariables,
            LoadError::Parse(_) => ExitCode::ParseError,
            LoadError::AppDir { .. } | LoadError::Io { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(load_err) = cause.downcast_ref::<LoadError>() {
                return ExitCode::from(load_err);
            }
            if cause.downcast_ref::<regex::Error>().is_some() {
                return ExitCode::InvalidFilter;
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::MissingVariables.as_i32(), 2);
        assert_eq!(ExitCode::ParseError.as_i32(), 3);
        assert_eq!(ExitCode::InvalidFilter.as_i32(), 4);
    }

    #[test]
    fn test_missing_vars_maps_to_missing_variables() {
        let err = LoadError::MissingVars {
            message: "missing".to_string(),
            missing: vec!["A".to_string()],
        };
        assert_eq!(ExitCode::from(&err), ExitCode::MissingVariables);
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let err = anyhow::Error::new(LoadError::MissingVars {
            message: "missing".to_string(),
            missing: vec![],
        })
        .context("Failed to load environment");
        assert_eq!(err.exit_code(), ExitCode::MissingVariables);
    }

    #[test]
    fn test_invalid_regex_maps_to_invalid_filter() {
        let result: anyhow::Result<regex::Regex> =
            regex::Regex::new("(unclosed").context("Invalid filter pattern");
        assert_eq!(result.unwrap_err().exit_code(), ExitCode::InvalidFilter);
    }

    #[test]
    fn test_unknown_error_is_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
