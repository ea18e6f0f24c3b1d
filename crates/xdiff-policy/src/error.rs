//! Error types for the policy crate.

use std::path::PathBuf;

/// Errors that can occur while loading a ruleset.
///
/// A ruleset that is absent or unreadable is not an error: classification is
/// skipped. Only a ruleset that exists but does not parse is.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A ruleset file exists but is not a valid ruleset.
    #[error("malformed ruleset {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An in-memory ruleset document is not a valid ruleset.
    #[error("malformed ruleset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience alias for policy results.
pub type PolicyResult<T> = Result<T, PolicyError>;
