//! Rendering-facing tree views.
//!
//! [`filter_non_entries`] builds the tree actually offered for navigation
//! and selection: action nodes and invisible nodes are pruned together
//! with their subtrees. Exclusion is subtree-scoped — a pruned node's
//! visible children are NOT promoted to the parent, matching the
//! kind/visibility filter being applied at each level independently
//! during the recursive copy.

use crate::node::{CanonicalNode, NodeKind};

/// Copy of the tree excluding [`NodeKind::Action`] nodes and nodes
/// explicitly marked not visible. Parent/child structure is preserved for
/// the nodes that remain.
pub fn filter_non_entries(nodes: &[CanonicalNode]) -> Vec<CanonicalNode> {
    nodes
        .iter()
        .filter(|node| node.kind != NodeKind::Action && node.visible)
        .map(|node| {
            let children = node
                .children
                .as_deref()
                .map(filter_non_entries)
                .filter(|kids| !kids.is_empty());
            CanonicalNode {
                children,
                ..node.clone()
            }
        })
        .collect()
}

/// Stable-sort every sibling group by weight, recursively.
///
/// The normalizer never reorders siblings; hosts that want the backend's
/// weight-based display order apply this separately.
pub fn sort_siblings_by_weight(nodes: &mut [CanonicalNode]) {
    nodes.sort_by_key(|node| node.weight);
    for node in nodes {
        if let Some(children) = node.children.as_deref_mut() {
            sort_siblings_by_weight(children);
        }
    }
}
