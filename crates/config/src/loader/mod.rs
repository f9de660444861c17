//! Layered `.env` file loader.
//!
//! Responsibilities:
//! - Resolve the mode and the ordered list of candidate files.
//! - Load each existing candidate into an `EnvStore` without overwriting present keys.
//! - Validate against `<base>.example`, expand references, normalize the search path.
//! - Skip every file when the loader is built with dotenv loading disabled.
//!
//! Does NOT handle:
//! - Line syntax (see `parse`), interpolation rules (see `expand`), or template checks (see `validate`).
//! - Projecting the environment for a bundler (see `projector`).
//!
//! Invariants / Assumptions:
//! - The first writer wins: pre-existing variables beat every file, earlier candidates beat later ones.
//! - The application directory is canonicalized before any path is derived from it.
//! - A missing candidate file is never an error; a failed template check always is.

mod builder;
mod candidates;
mod error;
mod search_path;

pub use builder::{EnvLoader, LoadReport};
pub use candidates::{Candidate, CandidateKind};
pub use error::LoadError;

#[cfg(test)]
mod tests;
