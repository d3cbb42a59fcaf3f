use thiserror::Error;

use crate::types::Action;

/// Errors surfaced by the navigation state engine.
///
/// Both variants classify as caller errors: an invalid navigation intent
/// is reported synchronously and no location change or state mutation
/// takes place. Malformed observed paths are never errors — they derive
/// a closed view / no match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("action {0} is not declared for this section")]
    UnsupportedAction(Action),
    #[error("action {0} requires an entity id")]
    MissingEntityId(Action),
}
