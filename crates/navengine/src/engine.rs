//! The per-section navigation state engine.

use std::collections::BTreeMap;

use tracing::debug;

use navtree::{filter_non_entries, CanonicalNode, FlattenedIndex};

use crate::config::{EngineConfig, SectionConfig};
use crate::error::NavError;
use crate::intent::{derive_secondary, modal_path, parse_view_intent};
use crate::matching::{match_location_with, resolve_route_path, RouteAliases};
use crate::types::{Action, NavCommand, NavigationMatch, SecondaryView, ViewIntent};
use crate::window::InteractionWindow;


/// Stateful coordinator for one section of the navigation surface.
///
/// The engine consumes two opaque event sources — tree payload arrival
/// via [`set_tree`](SectionEngine::set_tree) and location changes via
/// [`observe_path`](SectionEngine::observe_path) — and derives all of its
/// state from the latest pair. Derivation is keyed on
/// `(tree_version, path)` and happens once per observed event, never as a
/// cascade of incremental updates, so a tree and a path arriving together
/// are always seen atomically.
///
/// Outward navigation requests are collected as [`NavCommand`]s and
/// drained by the host; they are fire-and-forget. Commands that change
/// the location are additionally applied to the engine's own view of the
/// path immediately, which keeps the in-memory state equal to what the
/// eventual location-changed echo will derive — observing that echo is a
/// no-op.
///
/// Sections are independent: one engine per section, no shared state. A
/// page hosting several sections simply constructs several engines.
#[derive(Debug)]
pub struct SectionEngine {
    section: SectionConfig,
    config: EngineConfig,
    aliases: RouteAliases,
    /// Full canonical tree as provided by the host.
    tree: Vec<CanonicalNode>,
    /// Entries-only view used for location matching.
    entries: Vec<CanonicalNode>,
    /// Lookup surface over the full tree, visibility and kind included.
    index: FlattenedIndex,
    tree_version: u64,
    path: String,
    secondary: SecondaryView,
    nav_match: NavigationMatch,
    expanded: Vec<String>,
    window: InteractionWindow,
    commands: Vec<NavCommand>,
    active: bool,
}

impl SectionEngine {
    pub fn new(section: SectionConfig, config: EngineConfig) -> Self {
        let path = section.base_path.clone();
        let mut engine = Self {
            section,
            config,
            aliases: RouteAliases::default(),
            tree: Vec::new(),
            entries: Vec::new(),
            index: FlattenedIndex::default(),
            tree_version: 0,
            path,
            secondary: SecondaryView::Closed,
            nav_match: NavigationMatch::none(),
            expanded: Vec::new(),
            window: InteractionWindow::new(),
            commands: Vec::new(),
            active: true,
        };
        engine.recompute();
        engine
    }

    pub fn with_aliases(mut self, aliases: RouteAliases) -> Self {
        self.aliases = aliases;
        self.recompute();
        self
    }

    // ── Event sources ───────────────────────────────────────────────────

    /// Replace the canonical tree wholesale.
    ///
    /// Matching never runs against a partially normalized tree: the host
    /// normalizes first, then hands the finished tree over here.
    pub fn set_tree(&mut self, tree: Vec<CanonicalNode>) {
        if !self.active {
            return;
        }
        self.entries = filter_non_entries(&tree);
        self.index = FlattenedIndex::from_tree(&tree);
        self.tree = tree;
        self.tree_version += 1;
        debug!(version = self.tree_version, nodes = self.index.len(), "navigation tree replaced");
        self.recompute();
    }

    /// Observe a location change from any origin: programmatic push, a
    /// typed URL, a reload, or history back/forward traversal.
    ///
    /// All of them re-derive state from scratch — a back-navigation to the
    /// list view closes the secondary view the same way forward
    /// navigation opened it, with no undo bookkeeping.
    pub fn observe_path(&mut self, path: &str) {
        if !self.active {
            return;
        }
        self.path = path.to_string();
        self.recompute();
    }

    // ── Navigation intents ──────────────────────────────────────────────

    /// Request a secondary view.
    ///
    /// An undeclared action or an id-requiring action without an `id`
    /// param is a caller error: reported synchronously, no location
    /// change, no state mutation.
    pub fn open_secondary(
        &mut self,
        action: Action,
        params: &BTreeMap<String, String>,
    ) -> Result<(), NavError> {
        let target = self.secondary_path(action, params)?;
        self.navigate(target, false);
        Ok(())
    }

    /// Switch an open secondary view to another parameterization, e.g.
    /// view → edit, replacing instead of stacking history. A no-op when
    /// nothing is open.
    pub fn replace_secondary(
        &mut self,
        action: Action,
        params: &BTreeMap<String, String>,
    ) -> Result<(), NavError> {
        if !self.secondary.is_open() {
            return Ok(());
        }
        let target = self.secondary_path(action, params)?;
        self.navigate(target, true);
        Ok(())
    }

    /// Canonical, explicit close: navigate back to the list view.
    pub fn close_secondary(&mut self) {
        let base = self.section.base_path.clone();
        self.navigate(base, false);
    }

    /// Ask the host to go back one history entry. The resulting location
    /// change comes back through [`observe_path`](Self::observe_path).
    pub fn request_back(&mut self) {
        if !self.active {
            return;
        }
        self.commands.push(NavCommand::Back);
    }

    /// Select a navigation node by id.
    ///
    /// An explicit selection is by definition an intentional alignment
    /// with the route, so it clears the interaction window immediately,
    /// regardless of any remaining grace period.
    pub fn select_node(&mut self, node_id: &str) {
        if !self.active {
            return;
        }
        self.window.cancel();
        let route = self
            .index
            .get(node_id)
            .and_then(|node| resolve_route_path(node, &self.aliases));
        match route {
            Some(route) if route != self.path => {
                self.navigate(route, false);
            }
            Some(_) => {
                // Already there; re-sync expansion now that the window is gone.
                self.recompute();
            }
            None => debug!(node_id, "selected node resolves to no route"),
        }
    }

    /// Apply a manual expand/collapse and open the grace window.
    pub fn manual_set_expanded(&mut self, keys: Vec<String>) {
        if !self.active || keys == self.expanded {
            return;
        }
        self.expanded = keys;
        self.window.restart(self.config.grace_period);
    }

    // ── Derived state ───────────────────────────────────────────────────

    pub fn secondary(&self) -> &SecondaryView {
        &self.secondary
    }

    pub fn navigation_match(&self) -> &NavigationMatch {
        &self.nav_match
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.nav_match.selected_id.as_deref()
    }

    pub fn expanded_keys(&self) -> &[String] {
        &self.expanded
    }

    pub fn current_path(&self) -> &str {
        &self.path
    }

    pub fn view_intent(&self) -> ViewIntent {
        parse_view_intent(&self.path, &self.section)
    }

    pub fn tree_version(&self) -> u64 {
        self.tree_version
    }

    pub fn section(&self) -> &SectionConfig {
        &self.section
    }

    /// Entries-only tree offered for rendering.
    pub fn entries(&self) -> &[CanonicalNode] {
        &self.entries
    }

    /// Lookup index over the full tree, actions and hidden nodes included.
    pub fn index(&self) -> &FlattenedIndex {
        &self.index
    }

    /// Modal URL for an action without navigating, e.g. for link hrefs.
    pub fn modal_url(&self, action: Action, entity_id: Option<&str>) -> String {
        modal_path(&self.section, action, entity_id, &BTreeMap::new())
    }

    /// Display title for the currently open secondary view, empty when
    /// closed: action title followed by the resource name.
    pub fn modal_title(&self) -> String {
        match &self.secondary {
            SecondaryView::Open { action, .. } => format!(
                "{} {}",
                self.section.action_title(*action),
                self.section.resource_title()
            ),
            SecondaryView::Closed => String::new(),
        }
    }

    /// Drain the commands emitted since the last drain.
    pub fn drain_commands(&mut self) -> Vec<NavCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Tear the section down: cancels the grace window and turns every
    /// subsequent event into a no-op.
    pub fn teardown(&mut self) {
        self.window.cancel();
        self.active = false;
        self.commands.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn secondary_path(
        &self,
        action: Action,
        params: &BTreeMap<String, String>,
    ) -> Result<String, NavError> {
        if !self.section.supports(action) {
            return Err(NavError::UnsupportedAction(action));
        }
        let entity_id = params.get("id").map(String::as_str);
        if action.requires_entity_id() && entity_id.is_none_or(str::is_empty) {
            return Err(NavError::MissingEntityId(action));
        }
        Ok(modal_path(&self.section, action, entity_id, params))
    }

    /// Emit a path command and apply it to the engine's own view of the
    /// location, so state stays equal to what the host's eventual
    /// location echo will derive.
    fn navigate(&mut self, path: String, replace: bool) {
        if !self.active {
            return;
        }
        let command = if replace {
            NavCommand::Replace { path: path.clone() }
        } else {
            NavCommand::Push { path: path.clone() }
        };
        self.commands.push(command);
        self.path = path;
        self.recompute();
    }

    /// Single derivation pass over `(tree_version, path)`.
    fn recompute(&mut self) {
        let was_open = self.secondary.is_open();
        self.secondary = derive_secondary(&self.path, &self.section);
        self.nav_match = match_location_with(&self.entries, &self.path, &self.aliases);
        if was_open != self.secondary.is_open() {
            debug!(path = %self.path, open = self.secondary.is_open(), "secondary view state changed");
        }
        self.sync_expansion();
    }

    /// Route-driven expansion sync, suppressed while the grace window is
    /// open. Content comparison guards against redundant writes.
    fn sync_expansion(&mut self) {
        if self.window.is_active() {
            return;
        }
        if self.expanded != self.nav_match.expanded_ancestor_ids {
            self.expanded = self.nav_match.expanded_ancestor_ids.clone();
        }
    }
}
