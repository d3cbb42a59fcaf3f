//! Core data model types for the navigation tree crate.
//!
//! Two shapes live here: the untrusted [`RawNode`] as delivered by a
//! navigation-tree endpoint, and the [`CanonicalNode`] every downstream
//! consumer works with. They are designed to be:
//!
//! - **Serializable**: JSON in, JSON out via serde
//! - **Cloneable**: cheap to clone for tree transforms
//! - **Comparable**: equality checks for testing
//!
//! # Shape tolerance
//!
//! Backends disagree about where fields live. One variant puts `url`,
//! `perms`, and `type` at the top level; another nests them under an
//! `extra` bag. Identifiers arrive as numbers or strings. Permission
//! lists arrive comma-joined or as arrays. [`RawNode`] absorbs all of
//! these with `#[serde(default)]` and untagged field enums so decoding a
//! payload never fails on a missing or oddly-typed field; resolution
//! precedence is applied in one place, [`normalize`](crate::normalize).
//!
//! ```text
//! RawNode                          CanonicalNode
//! ├── id: number | string          ├── id: String            (coerced)
//! ├── parentId: number | string    ├── parent_id: String     (default "0")
//! ├── name                         ├── name: String
//! ├── url / path                   ├── path: Option<String>
//! ├── perms: "a,b" | ["a","b"]     ├── permissions: Vec<String>
//! ├── type: 0 | "menu" | absent    ├── kind: NodeKind        (default Entry)
//! ├── visible / hidden             ├── visible: bool
//! ├── weight                       ├── weight: i64
//! ├── extra { title, icon, ... }   ├── meta: NodeMeta
//! └── children: [RawNode]          └── children: Option<Vec<CanonicalNode>>
//! ```

use serde::{Deserialize, Serialize};

/// Sentinel `parent_id` assigned to nodes without a declared parent.
pub const ROOT_PARENT_ID: &str = "0";

/// An identifier that may arrive as a JSON number or string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// String coercion used for canonical ids. Empty strings are treated
    /// as absent by the normalizer.
    pub fn coerce(&self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.trim().to_string(),
        }
    }
}

/// A permission field that may be a comma-joined string or an array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawPermissions {
    Joined(String),
    List(Vec<String>),
}

/// A type discriminator that may be an integer code or a string code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawKindCode {
    Number(i64),
    Text(String),
}

/// Optional metadata bag nested under `extra` in one payload variant.
///
/// Fields here are fallbacks: a top-level `RawNode` field of the same
/// meaning always wins during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawExtra {
    pub title: Option<String>,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub hidden: Option<bool>,
    pub visible: Option<bool>,
    pub cache: Option<bool>,
    pub keep_alive: Option<bool>,
    pub target: Option<String>,
    pub affix: Option<bool>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<RawKindCode>,
    pub perms: Option<RawPermissions>,
    pub weight: Option<i64>,
}

/// Untrusted tree node as received from the navigation-tree source.
///
/// Received once per fetch, immutable after receipt, superseded wholesale
/// by the next fetch. Every field is optional; [`normalize`](crate::normalize)
/// applies the resolution precedence and drops only nodes with no
/// derivable id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawNode {
    pub id: Option<RawId>,
    #[serde(alias = "parent_id")]
    pub parent_id: Option<RawId>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub path: Option<String>,
    #[serde(alias = "permissions")]
    pub perms: Option<RawPermissions>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: Option<RawKindCode>,
    pub weight: Option<i64>,
    pub visible: Option<bool>,
    pub hidden: Option<bool>,
    /// Metadata bag; `meta` is accepted as an alias so a re-fed canonical
    /// tree keeps its resolved hints.
    #[serde(alias = "meta")]
    pub extra: Option<RawExtra>,
    pub children: Option<Vec<RawNode>>,
}

/// Resolved node kind.
///
/// Numeric codes map 1:1 (`0`/`1`/`2`); string codes map through a fixed
/// name table; unrecognized or missing codes default to [`Entry`](NodeKind::Entry).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Navigable page.
    #[default]
    Entry,
    /// Permission-guarded UI action, e.g. a button.
    Action,
    /// Permission-guarded API resource.
    Resource,
}

/// Rendering hints carried through from the raw payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeMeta {
    pub title: String,
    pub icon: Option<String>,
    pub cache: bool,
    pub target: Option<String>,
    pub affix: bool,
}

/// Normalized, strongly-typed tree node.
///
/// Only nodes with `kind == Entry` and a non-empty `path` are considered
/// routable. A node that is not `visible` is excluded from the
/// rendering-facing tree produced by [`filter_non_entries`](crate::filter_non_entries)
/// but remains reachable through [`flatten`](crate::flatten) and
/// [`FlattenedIndex`](crate::FlattenedIndex).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalNode {
    pub id: String,
    /// Parent reference; [`ROOT_PARENT_ID`] when no parent was declared.
    pub parent_id: String,
    pub name: String,
    /// Routable path, if any. Empty strings collapse to `None`.
    pub path: Option<String>,
    pub kind: NodeKind,
    pub permissions: Vec<String>,
    pub visible: bool,
    /// Sibling ordering weight: explicit field, else extra-provided weight,
    /// else positional index. Stable across re-normalization.
    pub weight: i64,
    pub meta: NodeMeta,
    /// Recursively normalized children; empty arrays collapse to `None` so
    /// "has children" stays unambiguous.
    pub children: Option<Vec<CanonicalNode>>,
}

impl CanonicalNode {
    /// Whether this node can be the target of location matching.
    pub fn is_routable(&self) -> bool {
        self.kind == NodeKind::Entry && self.path.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Number of nodes in this subtree, self included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(CanonicalNode::subtree_len)
            .sum::<usize>()
    }
}
