//! Tests for dotenv gating and file error handling.
//!
//! Responsibilities:
//! - Test that invalid `.env` files return errors without leaking secrets.
//! - Test that a loader built with dotenv loading disabled skips every file.
//! - Test that a malformed file adds nothing to the table.

use super::{app_dir, env, loader_for};
use crate::loader::error::LoadError;
use crate::parse::ParseErrorKind;
use crate::store::{EnvStore, MemoryEnv};

#[test]
fn test_invalid_dotenv_returns_parse_error() {
    let dir = app_dir(&[(".env", "INVALID_LINE_WITHOUT_EQUALS")]);

    let result = loader_for(&dir).load(&mut MemoryEnv::new());

    match result {
        Err(LoadError::Parse(e)) => {
            assert_eq!(e.kind, ParseErrorKind::MissingEquals);
            assert_eq!(e.line, 1);
        }
        Err(other) => panic!("Invalid .env should return Parse error, got {}", other),
        Ok(_) => panic!("Invalid .env should return Parse error, got Ok"),
    }
}

#[test]
fn test_parse_error_message_is_passed_through() {
    let dir = app_dir(&[(".env.local", "OK=1\n\"broken")]);

    let err = loader_for(&dir).load(&mut MemoryEnv::new()).unwrap_err();

    let LoadError::Parse(inner) = &err else {
        panic!("expected Parse error, got {err}");
    };
    assert_eq!(err.to_string(), inner.to_string());
    assert!(err.to_string().contains(".env.local"));
}

#[test]
fn test_dotenv_parse_error_does_not_leak_secrets() {
    let secret_value = "supersecret_token_12345";
    let contents = format!("API_TOKEN={secret_value}\nINVALID_LINE {secret_value}");
    let dir = app_dir(&[(".env", contents.as_str())]);

    let err = loader_for(&dir).load(&mut MemoryEnv::new()).unwrap_err();
    let error_string = err.to_string();

    assert!(
        !error_string.contains(secret_value),
        "Error message should NOT contain the secret value: {}",
        error_string
    );
    assert!(
        error_string.contains(".env"),
        "Error message should mention .env file: {}",
        error_string
    );
}

#[test]
fn test_malformed_file_adds_no_keys() {
    let dir = app_dir(&[(".env", "GOOD=1\nBAD LINE")]);
    let mut store = MemoryEnv::new();

    assert!(loader_for(&dir).load(&mut store).is_err());

    assert!(!store.contains("GOOD"));
}

#[test]
fn test_dotenv_disabled_skips_invalid_file() {
    let dir = app_dir(&[(".env", "INVALID_LINE_WITHOUT_EQUALS")]);
    let mut store = MemoryEnv::new();

    let report = loader_for(&dir)
        .with_dotenv_disabled(true)
        .load(&mut store)
        .unwrap();

    assert!(report.dotenv_disabled);
    assert!(report.loaded_files.is_empty());
}

#[test]
fn test_dotenv_disabled_skips_files_and_template() {
    let dir = app_dir(&[(".env", "FROM_FILE=1"), (".env.example", "MISSING=")]);
    let mut store = MemoryEnv::new();

    loader_for(&dir)
        .with_dotenv_disabled(true)
        .load(&mut store)
        .unwrap();

    assert!(!store.contains("FROM_FILE"));
    assert_eq!(store.get("NODE_ENV").as_deref(), Some("development"));
}

#[test]
fn test_dotenv_disabled_variable_in_table_is_ignored() {
    let dir = app_dir(&[(".env", "BASIC=basic")]);

    for value in ["1", "true"] {
        let mut store = env(&[("DOTENV_DISABLED", value)]);

        let report = loader_for(&dir).load(&mut store).unwrap();

        assert!(!report.dotenv_disabled);
        assert_eq!(store.get("BASIC").as_deref(), Some("basic"));
    }
}
