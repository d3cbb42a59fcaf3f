//! Raw-to-canonical tree normalization.
//!
//! [`normalize`] turns an arbitrarily-shaped payload tree into the
//! canonical model. It is a pure function over its input: no I/O, no
//! clock, no mutation of the raw nodes. Same payload in, same canonical
//! tree out, on any machine.
//!
//! ## Resolution precedence
//!
//! - id / parent id: string coercion of the raw value; a node with no
//!   derivable id is dropped (the sole filtering performed here)
//! - path: top-level `path`, else top-level `url`, else `extra.url`
//! - kind: top-level code, else `extra` code, else [`NodeKind::Entry`]
//! - permissions: top-level `perms`, else `extra.perms`
//! - visibility: explicit `visible` wins, else `!hidden`, else `true`
//! - weight: explicit field, else `extra` weight, else positional index
//!
//! ## What this does NOT do
//!
//! Siblings are never resorted — ordering as received is preserved, and
//! [`sort_siblings_by_weight`](crate::sort_siblings_by_weight) exists
//! separately for hosts that want display order. Parent references are
//! never validated: a dangling `parent_id` is preserved as-is and the
//! node simply never matches during ancestor traversal.

use tracing::warn;

use crate::node::{
    CanonicalNode, NodeKind, NodeMeta, RawExtra, RawId, RawKindCode, RawNode, RawPermissions,
    ROOT_PARENT_ID,
};

/// Normalize a sequence of raw nodes under the given parent id.
///
/// Never fails and never mutates its input. A node whose id cannot be
/// derived is dropped silently (logged at `warn`); every other shape
/// problem degrades to a best-effort canonical node. Normalizing data
/// that already matches the canonical shape is a no-op up to field order.
pub fn normalize(nodes: &[RawNode], parent_id: &str) -> Vec<CanonicalNode> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| normalize_node(raw, parent_id, index))
        .collect()
}

/// Normalize a whole tree, rooting parentless nodes at [`ROOT_PARENT_ID`].
pub fn normalize_tree(nodes: &[RawNode]) -> Vec<CanonicalNode> {
    normalize(nodes, ROOT_PARENT_ID)
}

fn normalize_node(raw: &RawNode, inherited_parent: &str, index: usize) -> Option<CanonicalNode> {
    let Some(id) = raw.id.as_ref().map(RawId::coerce).filter(|s| !s.is_empty()) else {
        warn!(position = index, "dropping navigation node without a derivable id");
        return None;
    };

    let extra = raw.extra.clone().unwrap_or_default();

    let parent_id = raw
        .parent_id
        .as_ref()
        .map(RawId::coerce)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| inherited_parent.to_string());

    let name = raw
        .name
        .clone()
        .or_else(|| extra.name.clone())
        .unwrap_or_default();

    let path = first_nonempty([raw.path.as_deref(), raw.url.as_deref(), extra.url.as_deref()]);

    let kind = raw
        .kind
        .as_ref()
        .or(extra.kind.as_ref())
        .map(resolve_kind)
        .unwrap_or_default();

    let permissions = resolve_permissions(raw.perms.as_ref().or(extra.perms.as_ref()));

    let visible = resolve_visibility(raw, &extra);

    let weight = raw.weight.or(extra.weight).unwrap_or(index as i64);

    // Children inherit this node's id as their parent when they carry none.
    let children = raw
        .children
        .as_deref()
        .map(|kids| normalize(kids, &id))
        .filter(|kids| !kids.is_empty());

    let meta = NodeMeta {
        title: extra.title.clone().unwrap_or_else(|| name.clone()),
        icon: extra.icon.clone(),
        cache: extra.cache.or(extra.keep_alive).unwrap_or(false),
        target: extra.target.clone(),
        affix: extra.affix.unwrap_or(false),
    };

    Some(CanonicalNode {
        id,
        parent_id,
        name,
        path,
        kind,
        permissions,
        visible,
        weight,
        meta,
        children,
    })
}

/// Resolve a permission field into a trimmed token list.
///
/// Comma-joined strings are split, trimmed, and stripped of empty tokens
/// in original order; arrays pass through; absent resolves to an empty
/// list.
pub fn resolve_permissions(perms: Option<&RawPermissions>) -> Vec<String> {
    match perms {
        None => Vec::new(),
        Some(RawPermissions::List(list)) => list.clone(),
        Some(RawPermissions::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Resolve a raw type discriminator to a [`NodeKind`].
///
/// Numeric codes map 1:1 (`0`/`1`/`2`); string codes map through a fixed
/// name table covering both the backend names and the canonical serde
/// names; anything unrecognized defaults to [`NodeKind::Entry`].
pub fn resolve_kind(code: &RawKindCode) -> NodeKind {
    match code {
        RawKindCode::Number(0) => NodeKind::Entry,
        RawKindCode::Number(1) => NodeKind::Action,
        RawKindCode::Number(2) => NodeKind::Resource,
        RawKindCode::Number(_) => NodeKind::Entry,
        RawKindCode::Text(name) => match name.trim().to_ascii_lowercase().as_str() {
            "menu" | "directory" | "entry" => NodeKind::Entry,
            "button" | "action" => NodeKind::Action,
            "interface" | "api" | "resource" => NodeKind::Resource,
            _ => NodeKind::Entry,
        },
    }
}

fn resolve_visibility(raw: &RawNode, extra: &RawExtra) -> bool {
    if let Some(visible) = raw.visible.or(extra.visible) {
        return visible;
    }
    !raw.hidden.or(extra.hidden).unwrap_or(false)
}

fn first_nonempty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawNode {
        serde_json::from_value(value).expect("raw node decodes")
    }

    #[test]
    fn numeric_fields_are_coerced_to_strings() {
        let nodes = normalize_tree(&[raw(json!({"id": 12, "parentId": 3, "name": "Roles"}))]);
        assert_eq!(nodes[0].id, "12");
        assert_eq!(nodes[0].parent_id, "3");
    }

    #[test]
    fn missing_parent_defaults_to_root_sentinel() {
        let nodes = normalize_tree(&[raw(json!({"id": "a"}))]);
        assert_eq!(nodes[0].parent_id, ROOT_PARENT_ID);
    }

    #[test]
    fn children_inherit_parent_id() {
        let nodes = normalize_tree(&[raw(json!({
            "id": 1,
            "children": [{"id": 2}, {"id": 3, "parentId": 99}]
        }))]);
        let kids = nodes[0].children.as_deref().expect("children kept");
        assert_eq!(kids[0].parent_id, "1");
        // A declared parent, even a dangling one, is preserved untouched.
        assert_eq!(kids[1].parent_id, "99");
    }

    #[test]
    fn node_without_id_is_dropped_children_of_it_too() {
        let nodes = normalize_tree(&[
            raw(json!({"name": "ghost", "children": [{"id": 5}]})),
            raw(json!({"id": 9})),
        ]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "9");
    }

    #[test]
    fn whitespace_only_id_is_not_derivable() {
        let nodes = normalize_tree(&[raw(json!({"id": "   "}))]);
        assert!(nodes.is_empty());
    }

    #[test]
    fn empty_children_collapse_to_none() {
        let nodes = normalize_tree(&[raw(json!({"id": 1, "children": []}))]);
        assert!(nodes[0].children.is_none());
    }

    #[test]
    fn kind_resolution_table() {
        assert_eq!(resolve_kind(&RawKindCode::Number(0)), NodeKind::Entry);
        assert_eq!(resolve_kind(&RawKindCode::Number(1)), NodeKind::Action);
        assert_eq!(resolve_kind(&RawKindCode::Number(2)), NodeKind::Resource);
        assert_eq!(resolve_kind(&RawKindCode::Number(42)), NodeKind::Entry);
        assert_eq!(
            resolve_kind(&RawKindCode::Text("Button".into())),
            NodeKind::Action
        );
        assert_eq!(
            resolve_kind(&RawKindCode::Text("interface".into())),
            NodeKind::Resource
        );
        assert_eq!(
            resolve_kind(&RawKindCode::Text("whatever".into())),
            NodeKind::Entry
        );
    }

    #[test]
    fn permission_string_splits_and_trims() {
        let perms = RawPermissions::Joined(" sys:user:add , sys:user:edit ,, ".into());
        assert_eq!(
            resolve_permissions(Some(&perms)),
            vec!["sys:user:add".to_string(), "sys:user:edit".to_string()]
        );
    }

    #[test]
    fn permission_empty_and_absent_agree() {
        let empty = RawPermissions::Joined(String::new());
        assert_eq!(resolve_permissions(Some(&empty)), Vec::<String>::new());
        assert_eq!(resolve_permissions(None), Vec::<String>::new());
    }

    #[test]
    fn permission_array_passes_through() {
        let perms = RawPermissions::List(vec!["a".into(), "b".into()]);
        assert_eq!(resolve_permissions(Some(&perms)), vec!["a", "b"]);
    }

    #[test]
    fn explicit_visible_wins_over_hidden() {
        let nodes = normalize_tree(&[raw(json!({
            "id": 1,
            "extra": {"visible": true, "hidden": true}
        }))]);
        assert!(nodes[0].visible);
    }

    #[test]
    fn hidden_alone_makes_invisible() {
        let nodes = normalize_tree(&[raw(json!({"id": 1, "extra": {"hidden": true}}))]);
        assert!(!nodes[0].visible);
    }

    #[test]
    fn default_is_visible() {
        let nodes = normalize_tree(&[raw(json!({"id": 1}))]);
        assert!(nodes[0].visible);
    }

    #[test]
    fn weight_precedence_node_extra_index() {
        let nodes = normalize_tree(&[
            raw(json!({"id": 1, "weight": 7, "extra": {"weight": 3}})),
            raw(json!({"id": 2, "extra": {"weight": 3}})),
            raw(json!({"id": 3})),
        ]);
        assert_eq!(nodes[0].weight, 7);
        assert_eq!(nodes[1].weight, 3);
        assert_eq!(nodes[2].weight, 2);
    }

    #[test]
    fn path_precedence_path_url_extra() {
        let nodes = normalize_tree(&[
            raw(json!({"id": 1, "path": "a", "url": "b", "extra": {"url": "c"}})),
            raw(json!({"id": 2, "url": "b", "extra": {"url": "c"}})),
            raw(json!({"id": 3, "extra": {"url": "c"}})),
            raw(json!({"id": 4, "url": "  "})),
        ]);
        assert_eq!(nodes[0].path.as_deref(), Some("a"));
        assert_eq!(nodes[1].path.as_deref(), Some("b"));
        assert_eq!(nodes[2].path.as_deref(), Some("c"));
        assert_eq!(nodes[3].path, None);
    }

    #[test]
    fn meta_hints_carry_through() {
        let nodes = normalize_tree(&[raw(json!({
            "id": 1,
            "name": "Users",
            "extra": {"title": "User admin", "icon": "user", "keepAlive": true, "affix": true}
        }))]);
        let meta = &nodes[0].meta;
        assert_eq!(meta.title, "User admin");
        assert_eq!(meta.icon.as_deref(), Some("user"));
        assert!(meta.cache);
        assert!(meta.affix);
    }

    #[test]
    fn title_falls_back_to_name() {
        let nodes = normalize_tree(&[raw(json!({"id": 1, "name": "Users"}))]);
        assert_eq!(nodes[0].meta.title, "Users");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_tree(&[raw(json!({
            "id": 10,
            "parentId": 0,
            "name": "System",
            "extra": {"url": "system", "type": 0, "perms": "sys:view", "title": "系统"},
            "children": [
                {"id": 11, "extra": {"type": 1, "perms": "sys:user:add,sys:user:del"}}
            ]
        }))]);

        let as_raw: Vec<RawNode> =
            serde_json::from_value(serde_json::to_value(&first).expect("serialize canonical"))
                .expect("canonical re-decodes as raw");
        let second = normalize_tree(&as_raw);

        assert_eq!(first, second);
    }
}
