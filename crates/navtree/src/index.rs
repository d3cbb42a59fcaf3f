//! Pre-order flattening and id-based lookup.
//!
//! [`flatten`] yields every node regardless of visibility or kind — the
//! lookup surface deliberately sees more than the rendering surface, so a
//! hidden node or an action button can still be resolved by id.
//! [`FlattenedIndex`] is the owned variant rebuilt alongside each tree,
//! carrying an id→position map for amortized O(1) lookup.

use fxhash::FxHashMap;

use crate::node::CanonicalNode;

/// Pre-order sequence of references to all nodes in the tree.
pub fn flatten(nodes: &[CanonicalNode]) -> Vec<&CanonicalNode> {
    let mut out = Vec::new();
    collect(nodes, &mut out);
    out
}

fn collect<'a>(nodes: &'a [CanonicalNode], out: &mut Vec<&'a CanonicalNode>) {
    for node in nodes {
        out.push(node);
        if let Some(children) = node.children.as_deref() {
            collect(children, out);
        }
    }
}

/// Derived, order-preserving snapshot of all canonical nodes.
///
/// Rebuilt wholesale whenever the canonical tree is rebuilt; never
/// patched incrementally. Duplicate ids keep the first pre-order
/// occurrence in the map, matching first-match-wins traversal order.
#[derive(Debug, Clone, Default)]
pub struct FlattenedIndex {
    nodes: Vec<CanonicalNode>,
    by_id: FxHashMap<String, usize>,
}

impl FlattenedIndex {
    /// Build the index from a canonical tree.
    pub fn from_tree(tree: &[CanonicalNode]) -> Self {
        let nodes: Vec<CanonicalNode> = flatten(tree).into_iter().cloned().collect();
        let mut by_id = FxHashMap::default();
        for (position, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.clone()).or_insert(position);
        }
        Self { nodes, by_id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalNode> {
        self.nodes.iter()
    }

    /// Lookup by id, amortized O(1).
    pub fn get(&self, id: &str) -> Option<&CanonicalNode> {
        self.by_id.get(id).map(|&position| &self.nodes[position])
    }

    /// First node whose declared path equals `path` exactly.
    pub fn node_by_path(&self, path: &str) -> Option<&CanonicalNode> {
        self.nodes
            .iter()
            .find(|node| node.path.as_deref() == Some(path))
    }
}
