//! Error types for the tree crate.

use std::path::PathBuf;

/// Errors that can occur while reading a document into a tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The document file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying XML reader rejected the input.
    #[error("XML parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// Element or attribute names were not valid UTF-8.
    #[error("invalid UTF-8 in XML: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// An element or attribute name uses a prefix with no `xmlns:` binding
    /// in scope.
    #[error("unbound namespace prefix '{0}'")]
    UnboundPrefix(String),

    /// An end tag appeared without a matching start tag, or the input ended
    /// with elements still open.
    #[error("unbalanced XML tags")]
    UnbalancedTags,

    /// A second top-level element followed the root.
    #[error("multiple root elements: found <{0}> after the document root")]
    MultipleRoots(String),

    /// The input contained no element at all.
    #[error("document has no root element")]
    NoRoot,
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
