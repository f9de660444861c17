//! Client environment projection.
//!
//! Responsibilities:
//! - Select environment entries whose key matches a filter.
//! - Merge them over caller-supplied extras.
//! - Produce a JSON-stringified copy keyed under `process.env` for define-style substitution.
//!
//! Invariants:
//! - Pure: the table is only read.
//! - Environment values win over extras with the same key.
//! - Extras are kept even when their key does not match the filter.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::PROCESS_ENV_NAMESPACE;
use crate::store::EnvStore;

/// Snapshot of the environment prepared for a bundler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEnvironment {
    pub raw: BTreeMap<String, String>,
    /// `{"process.env": {KEY: "\"value\""}}`
    pub stringified: BTreeMap<String, BTreeMap<String, String>>,
}

impl ClientEnvironment {
    /// The stringified entries under the `process.env` namespace.
    pub fn process_env(&self) -> Option<&BTreeMap<String, String>> {
        self.stringified.get(PROCESS_ENV_NAMESPACE)
    }
}

/// Project `store` through `filter`, seeded with `extras`.
///
/// A `None` filter matches every key.
pub fn client_environment<S: EnvStore + ?Sized>(
    store: &S,
    filter: Option<&Regex>,
    extras: Option<BTreeMap<String, String>>,
) -> ClientEnvironment {
    let raw = store
        .vars()
        .into_iter()
        .filter(|(key, _)| filter.is_none_or(|re| re.is_match(key)))
        .fold(extras.unwrap_or_default(), |mut raw, (key, value)| {
            raw.insert(key, value);
            raw
        });

    let encoded = raw
        .iter()
        .map(|(key, value)| (key.clone(), json_string(value)))
        .collect();

    ClientEnvironment {
        raw,
        stringified: BTreeMap::from([(PROCESS_ENV_NAMESPACE.to_string(), encoded)]),
    }
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
