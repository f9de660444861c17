//! `$VAR` / `${VAR}` interpolation over an environment table.
//!
//! Responsibilities:
//! - Rewrite values loaded from files so references to other variables are replaced.
//! - Support `$NAME`, `${NAME}`, `${NAME:-default}` and the `\$` escape.
//!
//! Does NOT handle:
//! - Deciding whether expansion runs at all (`NO_EXPAND` is checked by the loader).
//!
//! Invariants:
//! - Only tracked keys are rewritten; variables that were already present are never touched.
//! - A tracked key is expanded at most once, so running the pass again is a no-op.
//! - References resolve against the whole table. Unknown names expand to the empty string.
//! - Self-referential chains terminate; a name already being resolved expands to empty.

use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use crate::store::EnvStore;

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\\?\$(?:\{([A-Za-z0-9_]+)(?::-([^}]*))?\}|([A-Za-z0-9_]+))")
            .expect("reference pattern is valid")
    })
}

/// Tracks file-sourced keys and expands them against an [`EnvStore`].
#[derive(Debug, Default, Clone)]
pub struct Expander {
    pending: BTreeSet<String>,
}

impl Expander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue keys whose values should be expanded on the next pass.
    pub fn track<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.pending.extend(keys.into_iter().map(Into::into));
    }

    /// Expand every pending key in place.
    ///
    /// Returns the number of values that changed.
    pub fn expand<S: EnvStore + ?Sized>(&mut self, store: &mut S) -> usize {
        if self.pending.is_empty() {
            return 0;
        }

        let pending = std::mem::take(&mut self.pending);
        let mut resolver = Resolver {
            snapshot: store.vars().into_iter().collect(),
            pending: &pending,
            resolved: HashMap::new(),
            visiting: HashSet::new(),
        };
        for key in &pending {
            resolver.resolve(key);
        }

        let mut changed = 0;
        for (key, value) in resolver.resolved {
            if resolver.snapshot.get(&key) != Some(&value) {
                tracing::debug!(key = %key, "expanded variable references");
                store.set(&key, &value);
                changed += 1;
            }
        }
        changed
    }
}

struct Resolver<'a> {
    snapshot: HashMap<String, String>,
    pending: &'a BTreeSet<String>,
    resolved: HashMap<String, String>,
    visiting: HashSet<String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, key: &str) -> String {
        if let Some(value) = self.resolved.get(key) {
            return value.clone();
        }
        if !self.visiting.insert(key.to_string()) {
            return String::new();
        }

        let raw = self.snapshot.get(key).cloned().unwrap_or_default();
        let value = reference_pattern()
            .replace_all(&raw, |caps: &Captures| self.substitute(caps))
            .into_owned();

        self.visiting.remove(key);
        self.resolved.insert(key.to_string(), value.clone());
        value
    }

    fn substitute(&mut self, caps: &Captures) -> String {
        let whole = &caps[0];
        if let Some(literal) = whole.strip_prefix('\\') {
            return literal.to_string();
        }

        let name = caps
            .get(1)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let value = self.lookup(name);

        match caps.get(2) {
            Some(default) if value.as_deref().is_none_or(str::is_empty) => {
                default.as_str().to_string()
            }
            _ => value.unwrap_or_default(),
        }
    }

    fn lookup(&mut self, name: &str) -> Option<String> {
        if self.pending.contains(name) {
            if self.visiting.contains(name) {
                return Some(String::new());
            }
            return Some(self.resolve(name));
        }
        self.snapshot.get(name).cloned()
    }
}
