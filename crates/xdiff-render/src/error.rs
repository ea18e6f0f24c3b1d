//! Error types for the render crate.

/// Errors that can occur while rendering records.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("json rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for render results.
pub type RenderResult<T> = Result<T, RenderError>;
