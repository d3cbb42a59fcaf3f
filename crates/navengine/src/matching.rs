//! Location matching over the canonical navigation tree.
//!
//! Depth-first pre-order search comparing the current location against
//! each node's *resolved* route for exact equality — aliasing and slash
//! normalization happen before comparison, never during (no prefix
//! matching, no trailing-slash tolerance). First match wins in traversal
//! order; no match is an expected outcome, not an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use navtree::CanonicalNode;

use crate::types::NavigationMatch;

/// Legacy/alias route table keyed by node id.
///
/// Covers trees whose nodes predate explicit paths: an alias entry maps a
/// node id straight to a route, taking precedence over the name-derived
/// slug but never over an explicit node path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteAliases {
    routes: BTreeMap<String, String>,
}

impl RouteAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_id: impl Into<String>, route: impl Into<String>) {
        self.routes.insert(node_id.into(), route.into());
    }

    pub fn with_route(mut self, node_id: impl Into<String>, route: impl Into<String>) -> Self {
        self.insert(node_id, route);
        self
    }

    fn get(&self, node_id: &str) -> Option<&str> {
        self.routes.get(node_id).map(String::as_str)
    }
}

/// Resolve the route a node answers to, if any.
///
/// Precedence: explicit node path, else alias table, else a slug derived
/// from the node name. The result always carries exactly one leading `/`.
pub fn resolve_route_path(node: &CanonicalNode, aliases: &RouteAliases) -> Option<String> {
    if let Some(path) = node.path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        return Some(with_leading_slash(path));
    }
    if let Some(alias) = aliases.get(&node.id) {
        return Some(with_leading_slash(alias));
    }
    name_slug(&node.name)
}

fn with_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn name_slug(name: &str) -> Option<String> {
    let slug = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        None
    } else {
        Some(format!("/{slug}"))
    }
}

/// Match a location path against a canonical (entries-only) tree.
pub fn match_location(tree: &[CanonicalNode], path: &str) -> NavigationMatch {
    match_location_with(tree, path, &RouteAliases::default())
}

/// [`match_location`] with an alias table.
///
/// Pure over its inputs: for a fixed tree and aliases, the same path
/// yields an identical result every time.
pub fn match_location_with(
    tree: &[CanonicalNode],
    path: &str,
    aliases: &RouteAliases,
) -> NavigationMatch {
    let mut ancestors: Vec<&CanonicalNode> = Vec::new();
    search(tree, path, aliases, &mut ancestors).unwrap_or_else(NavigationMatch::none)
}

fn search<'a>(
    nodes: &'a [CanonicalNode],
    path: &str,
    aliases: &RouteAliases,
    ancestors: &mut Vec<&'a CanonicalNode>,
) -> Option<NavigationMatch> {
    for node in nodes {
        if resolve_route_path(node, aliases).as_deref() == Some(path) {
            return Some(NavigationMatch {
                selected_id: Some(node.id.clone()),
                expanded_ancestor_ids: ancestors.iter().map(|n| n.id.clone()).collect(),
            });
        }
        if let Some(children) = node.children.as_deref() {
            ancestors.push(node);
            let found = search(children, path, aliases, ancestors);
            ancestors.pop();
            if found.is_some() {
                return found;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use navtree::{filter_non_entries, normalize_tree, RawNode};
    use serde_json::json;

    fn entries(value: serde_json::Value) -> Vec<CanonicalNode> {
        let raw: Vec<RawNode> = serde_json::from_value(value).expect("raw tree decodes");
        filter_non_entries(&normalize_tree(&raw))
    }

    fn sample() -> Vec<CanonicalNode> {
        entries(json!([
            {"id": 1, "name": "System", "children": [
                {"id": 2, "name": "Users", "url": "system/user"},
                {"id": 3, "name": "Deep", "children": [
                    {"id": 4, "name": "Leaf", "url": "/system/deep/leaf"}
                ]}
            ]},
            {"id": 5, "name": "Home", "url": "home"}
        ]))
    }

    #[test]
    fn exact_match_with_ancestor_chain() {
        let tree = sample();
        let m = match_location(&tree, "/system/deep/leaf");
        assert_eq!(m.selected_id.as_deref(), Some("4"));
        assert_eq!(m.expanded_ancestor_ids, vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn top_level_match_has_no_ancestors() {
        let m = match_location(&sample(), "/home");
        assert_eq!(m.selected_id.as_deref(), Some("5"));
        assert!(m.expanded_ancestor_ids.is_empty());
    }

    #[test]
    fn leading_slash_is_normalized_before_comparison() {
        // Node path "system/user" answers to the absolute location.
        let m = match_location(&sample(), "/system/user");
        assert_eq!(m.selected_id.as_deref(), Some("2"));
    }

    #[test]
    fn trailing_slash_and_query_variants_do_not_match() {
        assert_eq!(match_location(&sample(), "/system/user/").selected_id, None);
        assert_eq!(match_location(&sample(), "/system/user?tab=1").selected_id, None);
    }

    #[test]
    fn no_match_is_an_empty_result() {
        let m = match_location(&sample(), "/dashboard");
        assert_eq!(m, NavigationMatch::none());
    }

    #[test]
    fn alias_beats_slug_but_not_explicit_path() {
        let tree = entries(json!([
            {"id": "a", "name": "Reports"},
            {"id": "b", "name": "Audit", "url": "audit/log"}
        ]));
        let aliases = RouteAliases::new()
            .with_route("a", "legacy/reports")
            .with_route("b", "legacy/audit");

        let m = match_location_with(&tree, "/legacy/reports", &aliases);
        assert_eq!(m.selected_id.as_deref(), Some("a"));
        // Explicit path wins; the alias for "b" never applies.
        assert_eq!(match_location_with(&tree, "/legacy/audit", &aliases).selected_id, None);
        assert_eq!(
            match_location_with(&tree, "/audit/log", &aliases).selected_id.as_deref(),
            Some("b")
        );
    }

    #[test]
    fn pathless_node_falls_back_to_name_slug() {
        let tree = entries(json!([{"id": "x", "name": "Download Center"}]));
        let m = match_location(&tree, "/download-center");
        assert_eq!(m.selected_id.as_deref(), Some("x"));
    }

    #[test]
    fn first_preorder_match_wins_on_duplicate_routes() {
        let tree = entries(json!([
            {"id": "first", "url": "dup"},
            {"id": "second", "url": "dup"}
        ]));
        let m = match_location(&tree, "/dup");
        assert_eq!(m.selected_id.as_deref(), Some("first"));
    }

    #[test]
    fn matching_is_repeatable() {
        let tree = sample();
        let a = match_location(&tree, "/system/user");
        let b = match_location(&tree, "/system/user");
        assert_eq!(a, b);
    }
}
