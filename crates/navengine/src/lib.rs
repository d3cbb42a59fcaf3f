//! Navigation state engine.
//!
//! This crate keeps three things mutually consistent for an admin-style
//! navigation surface: the current location path, the set of open
//! secondary views (create/edit/view overlays), and a navigation tree's
//! selection/expansion state — including reaction to history
//! back/forward traversal and concurrent manual interaction.
//!
//! ## Design
//!
//! - **State is a pure function of the path.** Whether a secondary view
//!   is open, and with which parameters, derives entirely from the
//!   current location plus a section's static [`SectionConfig`]. Back,
//!   forward, reload, and deep links all land in the right state with no
//!   special-casing.
//! - **One derivation pass per event.** [`SectionEngine`] recomputes
//!   against the latest `(tree, path)` pair when either changes; there is
//!   no cascade of incremental updates that could observe interleaved
//!   partial state.
//! - **Manual interaction wins, briefly.** A manual expand/collapse opens
//!   an [`InteractionWindow`] that suppresses route-driven expansion sync
//!   for a grace period (3 s by default), so user intent is not
//!   immediately overwritten; an explicit selection clears it at once.
//! - **Commands are fire-and-forget.** The engine emits
//!   [`NavCommand`]s (push/replace/back) for the host to execute and
//!   never awaits them; the host's location-changed signal drives the
//!   next recomputation.
//!
//! The canonical tree consumed here comes from the sibling `navtree`
//! crate; this crate never sees a raw payload.
//!
//! ## Failure policy
//!
//! Malformed observed paths never error — they derive a closed view and
//! an empty match. Only invalid navigation *intents* (an undeclared
//! action, an id-requiring action without an id) surface as
//! [`NavError`], since those are usage errors the call site needs to
//! know about immediately.

mod config;
mod engine;
mod error;
mod intent;
mod matching;
mod serde_millis;
mod types;
mod window;

pub use crate::config::{EngineConfig, SectionConfig};
pub use crate::engine::SectionEngine;
pub use crate::error::NavError;
pub use crate::intent::{derive_secondary, modal_path, parse_view_intent};
pub use crate::matching::{match_location, match_location_with, resolve_route_path, RouteAliases};
pub use crate::types::{Action, NavCommand, NavigationMatch, SecondaryView, ViewIntent};
pub use crate::window::InteractionWindow;
