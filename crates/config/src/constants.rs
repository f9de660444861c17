//! Centralized constants for the clientenv workspace.
//!
//! File names, variable names and sentinel values used by the loader and
//! the CLI live here so both crates agree on them.

// =============================================================================
// File Names
// =============================================================================

/// Base name of the layered environment files.
pub const DEFAULT_BASE_NAME: &str = ".env";

/// Suffix of machine-local override files.
pub const LOCAL_SUFFIX: &str = "local";

/// Suffix of the template file listing required keys.
pub const EXAMPLE_SUFFIX: &str = "example";

// =============================================================================
// Variable Names
// =============================================================================

/// Variable holding the mode indicator.
pub const DEFAULT_MODE_VAR: &str = "NODE_ENV";

/// Variable holding the module search path list.
pub const DEFAULT_SEARCH_PATH_VAR: &str = "NODE_PATH";

/// When truthy, the expansion pass is skipped.
pub const NO_EXPAND_VAR: &str = "NO_EXPAND";

// =============================================================================
// Modes
// =============================================================================

/// Mode written back when the mode variable is unset.
pub const DEFAULT_MODE: &str = "development";

/// Mode in which `<base>.local` is never consulted.
pub const TEST_MODE: &str = "test";

// =============================================================================
// Projection
// =============================================================================

/// Top-level key of the stringified projection.
pub const PROCESS_ENV_NAMESPACE: &str = "process.env";

/// Path list delimiter for the search path variable.
#[cfg(windows)]
pub const PATH_LIST_DELIMITER: char = ';';

/// Path list delimiter for the search path variable.
#[cfg(not(windows))]
pub const PATH_LIST_DELIMITER: char = ':';
