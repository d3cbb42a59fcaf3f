//! Envelope-tolerant decoding of raw navigation payloads.
//!
//! Navigation endpoints deliver either a bare JSON array of nodes or a
//! response envelope with the array under a `data` key. Both are accepted
//! here so callers hand over whatever the transport gave them.

use serde_json::Value;
use tracing::debug;

use crate::error::TreeError;
use crate::node::RawNode;

/// Decode a raw payload into a sequence of [`RawNode`].
///
/// Accepts a bare array, a `{ "data": [...] }` envelope, or JSON `null`
/// (treated as an empty tree). Anything else is rejected with
/// [`TreeError::InvalidPayload`] — this is the only fallible operation in
/// the crate. Individual node fields that fail to fit the [`RawNode`]
/// shape do not fail the decode; `RawNode` is all-optional by design.
pub fn decode_raw_nodes(payload: Value) -> Result<Vec<RawNode>, TreeError> {
    let list = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                return Err(TreeError::InvalidPayload(
                    "object envelope without a data array".to_string(),
                ))
            }
            Some(other) => {
                return Err(TreeError::InvalidPayload(format!(
                    "data field is {} rather than an array",
                    json_kind(&other)
                )))
            }
        },
        Value::Null => Vec::new(),
        other => {
            return Err(TreeError::InvalidPayload(format!(
                "top-level value is {} rather than an array",
                json_kind(&other)
            )))
        }
    };

    let nodes = list
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawNode>(item) {
            Ok(node) => Some(node),
            Err(err) => {
                debug!(error = %err, "skipping undecodable tree entry");
                None
            }
        })
        .collect();

    Ok(nodes)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
