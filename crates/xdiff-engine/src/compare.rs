//! Node comparator: local differences between two nodes that occupy the same
//! structural position. Never looks at children.

use xdiff_tree::Node;

use crate::record::{DiffRecord, DiffStore};

/// Compare the tag, namespace, attributes and text of `old` and `new`,
/// appending one record per differing aspect.
///
/// A local-name mismatch is reported alone and treated as a total
/// replacement: nothing else is compared and `false` is returned, telling the
/// caller not to descend into the children either. Otherwise returns `true`.
pub fn compare_nodes(old: &Node, new: &Node, path: &str, store: &mut DiffStore) -> bool {
    if old.local_name() != new.local_name() {
        store.push(DiffRecord::modify_tag(path, old.local_name(), new.local_name()));
        return false;
    }

    if old.namespace() != new.namespace() {
        store.push(DiffRecord::modify_ns(path, old.namespace(), new.namespace()));
    }

    if old.attributes() != new.attributes() {
        store.push(DiffRecord::modify_attr(path, old.attributes(), new.attributes()));
    }

    if old.text() != new.text() {
        store.push(DiffRecord::modify_text(path, old.text(), new.text()));
    }

    true
}
