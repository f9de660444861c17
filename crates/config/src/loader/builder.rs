//! Environment loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `EnvLoader` rooted at a canonical application directory.
//! - Run the layered load sequence against any `EnvStore`.
//! - Summarize what happened in a `LoadReport`.
//!
//! Does NOT handle:
//! - Line syntax (delegated to parse.rs).
//! - Reference expansion rules (delegated to expand.rs).
//!
//! Invariants / Assumptions:
//! - The mode default is written back before candidate names are computed.
//! - The template file's existence is checked once, before any candidate is read.
//! - A template failure aborts the sequence; later candidates are not read.
//! - The search path variable is normalized even when no candidate exists.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::candidates::{Candidate, candidate_files, template_file};
use super::error::LoadError;
use super::search_path::normalize_search_path;
use crate::constants::{
    DEFAULT_BASE_NAME, DEFAULT_MODE, DEFAULT_MODE_VAR, DEFAULT_SEARCH_PATH_VAR, NO_EXPAND_VAR,
};
use crate::expand::Expander;
use crate::parse::parse_file;
use crate::store::{EnvStore, is_truthy};
use crate::validate::check_template;

/// Loads layered `.env` files from an application directory.
#[derive(Debug, Clone)]
pub struct EnvLoader {
    app_dir: PathBuf,
    base_name: String,
    mode_var: String,
    search_path_var: String,
    allow_empty_values: bool,
    dotenv_disabled: bool,
}

/// Outcome of a successful [`EnvLoader::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub mode: String,
    pub app_dir: PathBuf,
    /// Files that were read, in load order.
    pub loaded_files: Vec<PathBuf>,
    /// Keys written by the loader, in load order.
    pub added_keys: Vec<String>,
    pub template_present: bool,
    pub dotenv_disabled: bool,
    /// Value written to the search path variable.
    pub search_path: String,
}

impl EnvLoader {
    /// Create a loader rooted at `dir`, resolving symlinks first.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let app_dir = std::fs::canonicalize(dir).map_err(|source| LoadError::AppDir {
            path: dir.to_path_buf(),
            source,
        })?;

        Ok(Self {
            app_dir,
            base_name: DEFAULT_BASE_NAME.to_string(),
            mode_var: DEFAULT_MODE_VAR.to_string(),
            search_path_var: DEFAULT_SEARCH_PATH_VAR.to_string(),
            allow_empty_values: false,
            dotenv_disabled: false,
        })
    }

    /// Create a loader rooted at the process working directory.
    pub fn from_current_dir() -> Result<Self, LoadError> {
        let cwd = std::env::current_dir().map_err(|source| LoadError::AppDir {
            path: PathBuf::from("."),
            source,
        })?;
        Self::new(cwd)
    }

    /// Override the base file name (default `.env`).
    pub fn with_base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    /// Override the mode variable (default `NODE_ENV`).
    pub fn with_mode_var(mut self, var: impl Into<String>) -> Self {
        self.mode_var = var.into();
        self
    }

    /// Override the search path variable (default `NODE_PATH`).
    pub fn with_search_path_var(mut self, var: impl Into<String>) -> Self {
        self.search_path_var = var.into();
        self
    }

    /// Accept empty values for keys declared in the template file.
    pub fn with_allow_empty_values(mut self, allow: bool) -> Self {
        self.allow_empty_values = allow;
        self
    }

    /// Skip every candidate file. The mode default and search path
    /// normalization still apply.
    pub fn with_dotenv_disabled(mut self, disabled: bool) -> Self {
        self.dotenv_disabled = disabled;
        self
    }

    /// Canonical application directory.
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn mode_var(&self) -> &str {
        &self.mode_var
    }

    fn base_path(&self) -> PathBuf {
        self.app_dir.join(&self.base_name)
    }

    /// Candidate files for `mode`, highest precedence first.
    pub fn candidates(&self, mode: &str) -> Vec<Candidate> {
        candidate_files(&self.base_path(), mode)
    }

    /// Path of the template file (`<base>.example`).
    pub fn template_path(&self) -> PathBuf {
        template_file(&self.base_path())
    }

    /// Current mode, writing the default back into `store` when unset or empty.
    pub fn resolve_mode<S: EnvStore + ?Sized>(&self, store: &mut S) -> String {
        match store.get(&self.mode_var).filter(|mode| !mode.is_empty()) {
            Some(mode) => mode,
            None => {
                tracing::debug!(var = %self.mode_var, mode = DEFAULT_MODE, "mode unset, using default");
                store.set(&self.mode_var, DEFAULT_MODE);
                DEFAULT_MODE.to_string()
            }
        }
    }

    /// Load every existing candidate file into `store`.
    ///
    /// With [`EnvLoader::with_dotenv_disabled`] no file is read; the mode
    /// default and search path normalization still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A candidate file has invalid syntax (`LoadError::Parse`)
    /// - A candidate file exists but cannot be read (`LoadError::Io`)
    /// - `<base>.example` exists and declares a key that is still missing
    ///   after a file is loaded (`LoadError::MissingVars`)
    ///
    /// Missing candidate files are silently skipped.
    pub fn load<S: EnvStore + ?Sized>(&self, store: &mut S) -> Result<LoadReport, LoadError> {
        let mode = self.resolve_mode(store);
        let template = self.template_path();
        let template_present = template.is_file();
        let dotenv_disabled = self.dotenv_disabled;

        let mut report = LoadReport {
            mode,
            app_dir: self.app_dir.clone(),
            loaded_files: Vec::new(),
            added_keys: Vec::new(),
            template_present,
            dotenv_disabled,
            search_path: String::new(),
        };

        if dotenv_disabled {
            tracing::debug!("dotenv loading disabled, skipping .env files");
        } else {
            self.load_candidates(store, &template, &mut report)?;
        }

        report.search_path = self.normalize_search_path(store);

        tracing::info!(
            mode = %report.mode,
            files = report.loaded_files.len(),
            keys = report.added_keys.len(),
            "environment loaded"
        );
        Ok(report)
    }

    fn load_candidates<S: EnvStore + ?Sized>(
        &self,
        store: &mut S,
        template: &Path,
        report: &mut LoadReport,
    ) -> Result<(), LoadError> {
        let mut expander = Expander::new();

        for candidate in self.candidates(&report.mode) {
            if !candidate.exists() {
                tracing::debug!(path = %candidate.path.display(), "candidate not found, skipping");
                continue;
            }

            let pairs = parse_file(&candidate.path)?;
            let added: Vec<String> = pairs
                .into_iter()
                .filter_map(|(key, value)| store.set_if_absent(&key, &value).then_some(key))
                .collect();
            tracing::debug!(
                path = %candidate.path.display(),
                kind = ?candidate.kind,
                added = added.len(),
                "loaded candidate"
            );

            if report.template_present {
                check_template(&*store, template, self.allow_empty_values)?;
            }

            expander.track(added.iter().cloned());
            if !is_truthy(store.get(NO_EXPAND_VAR).as_deref()) {
                expander.expand(store);
            }

            report.loaded_files.push(candidate.path);
            report.added_keys.extend(added);
        }

        Ok(())
    }

    fn normalize_search_path<S: EnvStore + ?Sized>(&self, store: &mut S) -> String {
        let current = store.get(&self.search_path_var).unwrap_or_default();
        let normalized = normalize_search_path(&current, &self.app_dir);
        store.set(&self.search_path_var, &normalized);
        normalized
    }
}
