//! Structural diff engine for xdiff.
//!
//! Compares two parsed XML trees and produces an ordered list of
//! [`DiffRecord`]s: tag, namespace, attribute and text modifications, child
//! additions and deletions, and moves detected by content signature. The
//! engine does not classify records; see `xdiff-policy` for that.
//!
//! # Key Types
//!
//! - [`Aligner`] -- Recursive child-sequence alignment with move detection
//! - [`compare_nodes`] -- Local (non-recursive) comparison of a node pair
//! - [`DiffRecord`] / [`DiffKind`] / [`DiffValue`] -- One reported difference
//! - [`DiffStore`] -- Append-only record collection for one run
//! - [`DiffConfig`] -- Per-invocation configuration

pub mod align;
pub mod compare;
pub mod config;
pub mod error;
pub mod record;

pub use align::Aligner;
pub use compare::compare_nodes;
pub use config::{DiffConfig, DEFAULT_POLICY_DIR, POLICY_DIR_ENV};
pub use error::{EngineError, EngineResult};
pub use record::{DiffKind, DiffRecord, DiffStore, DiffValue, Verdict};

use xdiff_tree::{Document, Node};

/// Path of a document root, e.g. `/EXPERIMENT`.
pub fn root_path(root: &Node) -> String {
    format!("/{}", root.name())
}

/// Diff two root nodes, starting at the path of the old root.
pub fn diff_nodes(old: &Node, new: &Node, config: &DiffConfig) -> DiffStore {
    let mut store = DiffStore::new();
    Aligner::from_config(config).align(old, new, &root_path(old), &mut store);
    tracing::debug!(records = store.len(), "diff complete");
    store
}

/// Diff two documents. Records carry no policy; classification is a
/// separate pass.
pub fn diff_documents(old: &Document, new: &Document, config: &DiffConfig) -> DiffStore {
    diff_nodes(old.root(), new.root(), config)
}
