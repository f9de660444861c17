//! Environment tables the loader writes into and the projector reads from.
//!
//! Responsibilities:
//! - Define the `EnvStore` seam used by the loader, expander, validator and projector.
//! - Provide `ProcessEnv` (the real process environment) and `MemoryEnv` (an isolated table).
//!
//! Does NOT handle:
//! - Precedence between sources (see `loader`).
//!
//! Invariants:
//! - Keys are case-sensitive.
//! - `set_if_absent` never replaces a value that is already present, even an empty one.
//! - `ProcessEnv` hides entries whose key or value is not valid UTF-8.

use std::collections::BTreeMap;

/// A mutable string-to-string variable table.
pub trait EnvStore {
    /// Current value of `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any existing value.
    fn set(&mut self, key: &str, value: &str);

    /// Snapshot of every entry in the table.
    fn vars(&self) -> Vec<(String, String)>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key` only when it is not already present.
    ///
    /// Returns `true` when the value was written.
    fn set_if_absent(&mut self, key: &str, value: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        self.set(key, value);
        true
    }
}

/// Truthiness of an environment value: set and non-empty.
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// The environment of the running process.
///
/// Writes go through `std::env::set_var`, which is only sound while no other
/// thread reads or writes the environment. Load before spawning threads.
/// `set_var` also panics on a NUL byte anywhere or an `=` in the key. The
/// parser never yields either.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: loading happens during single-threaded startup, before any
        // other thread can observe the environment.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// An in-memory environment table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
