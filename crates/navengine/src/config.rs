//! Configuration for sections and engine behavior.
//!
//! A *section* is one base path — a resource's list view such as
//! `/system/menu` — together with the secondary-view actions it declares.
//! Sections are static configuration: the engine derives every piece of
//! runtime state from (current path, section config, canonical tree), so
//! two engines built from equal configs observing equal inputs agree on
//! everything.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Action;

/// Static description of one navigable section.
///
/// Cheap to clone and serde-friendly so hosts can embed it in their own
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionConfig {
    /// Base location path of the section's list view, with a leading `/`.
    pub base_path: String,
    /// Secondary-view actions this section supports.
    pub actions: Vec<Action>,
    /// Human-readable resource name for titles; defaults to the last
    /// segment of `base_path`.
    pub resource_name: Option<String>,
    /// Per-action display titles; falls back to the action segment.
    pub action_titles: BTreeMap<Action, String>,
}

impl SectionConfig {
    /// Section with the conventional create/edit/view action set.
    pub fn new(base_path: impl AsRef<str>) -> Self {
        Self {
            base_path: normalize_base_path(base_path.as_ref()),
            actions: vec![Action::Create, Action::Edit, Action::View],
            resource_name: None,
            action_titles: BTreeMap::new(),
        }
    }

    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    pub fn with_action_title(mut self, action: Action, title: impl Into<String>) -> Self {
        self.action_titles.insert(action, title.into());
        self
    }

    pub fn supports(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Display title for an action, falling back to its path segment.
    pub fn action_title(&self, action: Action) -> &str {
        self.action_titles
            .get(&action)
            .map(String::as_str)
            .unwrap_or_else(|| action.as_str())
    }

    /// Resource name for titles, derived from the base path when unset.
    pub fn resource_title(&self) -> &str {
        self.resource_name.as_deref().unwrap_or_else(|| {
            self.base_path
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or(self.base_path.as_str())
        })
    }
}

/// Engine-level tunables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grace period during which a manual expand/collapse suppresses
    /// route-driven expansion sync, in milliseconds on the wire.
    #[serde(with = "crate::serde_millis")]
    pub grace_period: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_millis(3000),
        }
    }
}

impl EngineConfig {
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace_period = grace;
        self
    }
}

/// Ensure exactly one leading `/` and no trailing slash.
pub(crate) fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
