//! Location-path parsing and modal-path generation.
//!
//! The path convention is `{base}/modal/{action}[/{id}][/{key}/{value}]*`.
//! Id-requiring actions carry the entity id as the first segment after the
//! action; extra parameters follow as nested key/value pairs. `Create`
//! carries no id, so its pairs start directly after the action segment —
//! generation and parsing agree on this, which keeps the round trip exact.
//!
//! Parsing never fails: a path outside the section, an undeclared action,
//! a missing required id, or a trailing key without a value all derive the
//! closed view.

use std::collections::BTreeMap;

use crate::config::SectionConfig;
use crate::types::{Action, SecondaryView, ViewIntent};

const MODAL_SEGMENT: &str = "modal";

/// Decompose a location path against a section's static configuration.
///
/// Pure and total: same inputs, same intent, and anything that does not
/// match the convention is the closed intent for the section.
pub fn parse_view_intent(path: &str, section: &SectionConfig) -> ViewIntent {
    let closed = || ViewIntent::closed(section.base_path.clone());

    let Some(rest) = path.strip_prefix(section.base_path.as_str()) else {
        return closed();
    };
    let Some(rest) = rest.strip_prefix('/') else {
        // Either the bare list view or an unrelated path sharing a prefix.
        return closed();
    };

    let mut segments = rest.split('/').filter(|s| !s.is_empty());
    if segments.next() != Some(MODAL_SEGMENT) {
        return closed();
    }
    let Some(action) = segments.next().and_then(Action::from_segment) else {
        return closed();
    };
    if !section.supports(action) {
        return closed();
    }

    let entity_id = if action.requires_entity_id() {
        match segments.next() {
            Some(id) => Some(id.to_string()),
            // An id-requiring action without an id is malformed, not open.
            None => return closed(),
        }
    } else {
        None
    };

    let mut extra_params = BTreeMap::new();
    while let Some(key) = segments.next() {
        let Some(value) = segments.next() else {
            // Dangling key without a value: ignore the remainder.
            break;
        };
        extra_params.insert(key.to_string(), value.to_string());
    }

    ViewIntent {
        base_path: section.base_path.clone(),
        action: Some(action),
        entity_id,
        extra_params,
    }
}

/// Pure open/closed derivation from a location path.
pub fn derive_secondary(path: &str, section: &SectionConfig) -> SecondaryView {
    let intent = parse_view_intent(path, section);
    match intent.action {
        Some(action) => SecondaryView::Open {
            action,
            entity_id: intent.entity_id,
            params: intent.extra_params,
        },
        None => SecondaryView::Closed,
    }
}

/// Generate the modal path for an action under a section.
///
/// Inverse of [`parse_view_intent`] for declared actions: parsing the
/// generated path yields the same action, id, and params.
pub fn modal_path(
    section: &SectionConfig,
    action: Action,
    entity_id: Option<&str>,
    params: &BTreeMap<String, String>,
) -> String {
    let mut path = format!("{}/{}/{}", section.base_path, MODAL_SEGMENT, action.as_str());
    if let Some(id) = entity_id {
        path.push('/');
        path.push_str(id);
    }
    for (key, value) in params {
        if key == "id" || value.is_empty() {
            continue;
        }
        path.push('/');
        path.push_str(key);
        path.push('/');
        path.push_str(value);
    }
    path
}
