//! Candidate file list for a mode.

use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::constants::{EXAMPLE_SUFFIX, LOCAL_SUFFIX, TEST_MODE};

/// Which layer a candidate file belongs to, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// `<base>.<mode>.local`
    ModeLocal,
    /// `<base>.<mode>`
    Mode,
    /// `<base>.local`, never used in test mode
    Local,
    /// `<base>`
    Base,
}

/// A file that may contribute variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub path: PathBuf,
}

impl Candidate {
    fn new(kind: CandidateKind, path: PathBuf) -> Self {
        Self { kind, path }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// `base` with `.part` appended for each part, e.g. `.env` + `["test", "local"]`.
pub(crate) fn with_suffixes(base: &Path, parts: &[&str]) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    for part in parts {
        name.push(".");
        name.push(part);
    }
    PathBuf::from(name)
}

/// Ordered candidates for `mode`, highest precedence first.
pub(crate) fn candidate_files(base: &Path, mode: &str) -> Vec<Candidate> {
    // `<base>.local` is never read in test mode.
    let local = (mode != TEST_MODE)
        .then(|| Candidate::new(CandidateKind::Local, with_suffixes(base, &[LOCAL_SUFFIX])));

    [
        Some(Candidate::new(
            CandidateKind::ModeLocal,
            with_suffixes(base, &[mode, LOCAL_SUFFIX]),
        )),
        Some(Candidate::new(
            CandidateKind::Mode,
            with_suffixes(base, &[mode]),
        )),
        local,
        Some(Candidate::new(CandidateKind::Base, base.to_path_buf())),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub(crate) fn template_file(base: &Path) -> PathBuf {
    with_suffixes(base, &[EXAMPLE_SUFFIX])
}
