//! Layered `.env` loading and client environment projection.
//!
//! This crate loads variable definitions from `.env`, `.env.<mode>`,
//! `.env.local` and `.env.<mode>.local` into an environment table, then
//! projects a filtered view of that table into a shape suitable for a
//! bundler's global-define mechanism.

pub mod constants;
pub mod expand;
mod loader;
pub mod parse;
pub mod projector;
pub mod store;
pub mod validate;

pub use expand::Expander;
pub use loader::{Candidate, CandidateKind, EnvLoader, LoadError, LoadReport};
pub use parse::{ParseError, ParseErrorKind};
pub use projector::{ClientEnvironment, client_environment};
pub use store::{EnvStore, MemoryEnv, ProcessEnv, is_truthy};
pub use validate::MissingVarsError;

