//! Navigation tree normalization layer.
//!
//! This crate turns a raw, loosely-typed navigation tree — the shape a
//! user/role/menu backend actually delivers — into a canonical,
//! strongly-typed model that navigation state engines can rely on.
//!
//! ## What we do
//!
//! - Coerce numeric-or-string identifiers to stable string ids
//! - Resolve type codes (integer, string, or absent) to a fixed kind enum
//! - Split comma-joined permission strings into trimmed token lists
//! - Resolve visibility with explicit-flag-wins precedence
//! - Preserve sibling order; derive stable weights for hosts that sort
//! - Build rendering-facing filtered views and a pre-order lookup index
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls. Give us the same payload, you get the same
//! canonical tree on any machine, and normalizing an already-canonical
//! tree is a no-op up to field order.
//!
//! ## Failure policy
//!
//! Normalization never fails. A node with no derivable id is dropped
//! silently — the sole filtering performed — and every other shape
//! problem degrades to a best-effort canonical node, so a partially
//! malformed payload yields a partially useful tree rather than none.
//! The only fallible surface is [`decode_raw_nodes`], which rejects
//! payloads that are not a tree at all.

mod decode;
mod error;
mod filter;
mod index;
mod node;
mod normalize;

pub use crate::decode::decode_raw_nodes;
pub use crate::error::TreeError;
pub use crate::filter::{filter_non_entries, sort_siblings_by_weight};
pub use crate::index::{flatten, FlattenedIndex};
pub use crate::node::{
    CanonicalNode, NodeKind, NodeMeta, RawExtra, RawId, RawKindCode, RawNode, RawPermissions,
    ROOT_PARENT_ID,
};
pub use crate::normalize::{normalize, normalize_tree, resolve_kind, resolve_permissions};
