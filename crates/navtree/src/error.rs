use thiserror::Error;

/// Errors produced by the navigation tree crate.
///
/// Normalization itself never fails: malformed nodes are defaulted or
/// dropped. The only fallible surface is decoding a payload envelope that
/// is not a tree at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("payload is not a navigation tree: {0}")]
    InvalidPayload(String),
}
