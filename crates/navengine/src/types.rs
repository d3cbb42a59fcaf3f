//! Core types for the navigation state engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Secondary-view action encoded in the location path.
///
/// `Delete` is reserved: it parses and validates like the others when a
/// section declares it, but by convention hosts handle deletion as a
/// non-navigational confirmation instead of a routed view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Edit,
    View,
    Delete,
}

impl Action {
    /// Path segment for this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Edit => "edit",
            Action::View => "view",
            Action::Delete => "delete",
        }
    }

    /// Parse a path segment; unknown segments are simply not actions.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "create" => Some(Action::Create),
            "edit" => Some(Action::Edit),
            "view" => Some(Action::View),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }

    /// Whether this action is meaningless without an entity id.
    pub fn requires_entity_id(self) -> bool {
        !matches!(self, Action::Create)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured decomposition of the current location path.
///
/// Derived purely from the path on every change; carries no persisted
/// identity. `action == None` means the path is the plain list view (or
/// something outside this section entirely).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewIntent {
    pub base_path: String,
    pub action: Option<Action>,
    pub entity_id: Option<String>,
    pub extra_params: BTreeMap<String, String>,
}

impl ViewIntent {
    /// Intent for the plain list view of a section.
    pub fn closed(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            action: None,
            entity_id: None,
            extra_params: BTreeMap::new(),
        }
    }
}

/// Whether a secondary view is open, and with which parameters.
///
/// Always a pure function of (current path, section config); there is no
/// other source of truth for open/closed, which is what makes browser
/// back/forward, reload, and deep links all land in the right state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SecondaryView {
    #[default]
    Closed,
    Open {
        action: Action,
        entity_id: Option<String>,
        params: BTreeMap<String, String>,
    },
}

impl SecondaryView {
    pub fn is_open(&self) -> bool {
        matches!(self, SecondaryView::Open { .. })
    }
}

/// Result of matching the current location against the canonical tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationMatch {
    /// Id of the node whose resolved route equals the location exactly.
    pub selected_id: Option<String>,
    /// Ids of the matched node's ancestors, outermost first.
    pub expanded_ancestor_ids: Vec<String>,
}

impl NavigationMatch {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Outward navigation command emitted to the hosting application.
///
/// Fire-and-forget: the engine never awaits completion, it expects the
/// host's location-changed signal to drive the next recomputation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum NavCommand {
    Push { path: String },
    Replace { path: String },
    Back,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_segments_round_trip() {
        for action in [Action::Create, Action::Edit, Action::View, Action::Delete] {
            assert_eq!(Action::from_segment(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_segment("publish"), None);
    }

    #[test]
    fn only_create_is_id_free() {
        assert!(!Action::Create.requires_entity_id());
        assert!(Action::Edit.requires_entity_id());
        assert!(Action::View.requires_entity_id());
        assert!(Action::Delete.requires_entity_id());
    }
}
