//! Error types for the engine crate.
//!
//! Alignment itself is infallible over well-formed trees; only loading a
//! configuration can fail.

use std::path::PathBuf;

/// Errors that can occur while preparing a diff run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for [`crate::DiffConfig`].
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
