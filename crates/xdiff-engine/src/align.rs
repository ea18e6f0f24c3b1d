//! Structural aligner: walks two trees in step and decides how their child
//! sequences correspond.
//!
//! At every level the aligner first compares the node pair itself, then
//! picks one of two strategies for the children:
//!
//! - **Positional**: used when both child lists have the same length and every
//!   positional pair is shallowly equal (same name, namespace, attributes,
//!   text and grandchild count). Each pair is aligned recursively.
//! - **Fallback**: used otherwise. Children are fingerprinted by signature
//!   (namespace, name, attributes, text) to report moves, and then, as a
//!   separate pass, paired purely by index: surplus new children are adds,
//!   surplus old children are deletes, and overlapping indices recurse.
//!
//! The two fallback passes pair children differently, so a relocated child
//! may be reported both as a `move` and as a positional change. Both records
//! are kept by default; [`Aligner::suppress_positional_after_move`] turns the
//! positional pass off for levels where a move was found.

use tracing::debug;
use xdiff_tree::{Attributes, Node};

use crate::compare::compare_nodes;
use crate::config::DiffConfig;
use crate::record::{DiffRecord, DiffStore};

/// Content fingerprint of a node, excluding its children.
#[derive(Debug, PartialEq, Eq)]
struct Signature<'a> {
    namespace: Option<&'a str>,
    local: &'a str,
    attributes: &'a Attributes,
    text: &'a str,
}

impl<'a> Signature<'a> {
    fn of(node: &'a Node) -> Self {
        Self {
            namespace: node.namespace(),
            local: node.local_name(),
            attributes: node.attributes(),
            text: node.text(),
        }
    }
}

/// One-level equality: signature plus the number of children.
fn shallow_eq(a: &Node, b: &Node) -> bool {
    Signature::of(a) == Signature::of(b) && a.child_count() == b.child_count()
}

/// Path of the child at `index` (0-based) under `parent`.
fn child_path(parent: &str, child: &Node, index: usize) -> String {
    format!("{parent}/{}[{}]", child.name(), index + 1)
}

/// Recursive tree aligner.
#[derive(Clone, Debug, Default)]
pub struct Aligner {
    suppress_positional_after_move: bool,
}

impl Aligner {
    /// An aligner with the default behaviour (move and positional passes
    /// both run).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            suppress_positional_after_move: config.suppress_positional_after_move,
        }
    }

    /// Skip the positional pass at any fallback level where at least one
    /// move was recorded.
    pub fn suppress_positional_after_move(mut self, suppress: bool) -> Self {
        self.suppress_positional_after_move = suppress;
        self
    }

    /// Compare `old` and `new`, which the caller has already matched to the
    /// same position `path`, and align their children recursively.
    pub fn align(&self, old: &Node, new: &Node, path: &str, store: &mut DiffStore) {
        if !compare_nodes(old, new, path, store) {
            return;
        }

        let (children1, children2) = (old.children(), new.children());

        if children1.len() == children2.len()
            && children1.iter().zip(children2).all(|(a, b)| shallow_eq(a, b))
        {
            for (i, (a, b)) in children1.iter().zip(children2).enumerate() {
                self.align(a, b, &child_path(path, a, i), store);
            }
            return;
        }

        debug!(
            path,
            old_children = children1.len(),
            new_children = children2.len(),
            "positional alignment failed, using fallback"
        );

        let moves = detect_moves(children1, children2, path, store);
        if moves > 0 && self.suppress_positional_after_move {
            debug!(path, moves, "positional pass suppressed after move");
            return;
        }

        for i in 0..children1.len().max(children2.len()) {
            match (children1.get(i), children2.get(i)) {
                (Some(a), Some(b)) => self.align(a, b, &child_path(path, a, i), store),
                (Some(a), None) => store.push(DiffRecord::delete(child_path(path, a, i), a.to_xml())),
                (None, Some(b)) => store.push(DiffRecord::add(child_path(path, b, i), b.to_xml())),
                (None, None) => unreachable!("index bounded by the longer child list"),
            }
        }
    }
}

/// Record a `move` for every old child whose signature first occurs in the
/// new list at a different index. First match wins; there is no attempt at
/// a globally optimal assignment. Returns the number of moves recorded.
fn detect_moves(children1: &[Node], children2: &[Node], path: &str, store: &mut DiffStore) -> usize {
    let sigs2: Vec<Signature<'_>> = children2.iter().map(Signature::of).collect();
    let mut moves = 0;

    for (i, child) in children1.iter().enumerate() {
        let sig = Signature::of(child);
        if let Some(j) = sigs2.iter().position(|s| *s == sig) {
            if i != j {
                store.push(DiffRecord::moved(child_path(path, child, i), i, j));
                moves += 1;
            }
        }
    }

    moves
}
