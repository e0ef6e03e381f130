//! Removal of reasoning control fields.
//!
//! Some backends reject chat-completion requests carrying reasoning knobs, so
//! they are dropped before the request leaves the proxy. Clients use both
//! snake_case and camelCase spellings at the top level; a few SDKs tuck the
//! same options under `extra_body`.

use serde_json::{Map, Value};

use super::Transformer;

/// Top-level keys removed from every request object.
pub const TOP_LEVEL_KEYS: [&str; 5] = [
    "reasoning",
    "reasoning_effort",
    "reasoningEffort",
    "reasoning_tags",
    "reasoningTags",
];

/// Keys removed from an `extra_body` object.
pub const EXTRA_BODY_KEYS: [&str; 3] = ["reasoning", "reasoning_effort", "reasoning_tags"];

/// Transformer that strips reasoning fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripReasoning;

impl Transformer for StripReasoning {
    fn transform(&self, payload: Value) -> Value {
        strip_reasoning(payload)
    }
}

/// Remove the reasoning fields from a request payload.
///
/// Non-object values are returned untouched. All other keys and their values
/// are preserved.
pub fn strip_reasoning(mut payload: Value) -> Value {
    if let Value::Object(obj) = &mut payload {
        remove_keys(obj, &TOP_LEVEL_KEYS);

        if let Some(Value::Object(extra)) = obj.get_mut("extra_body") {
            remove_keys(extra, &EXTRA_BODY_KEYS);
        }
    }
    payload
}

fn remove_keys(obj: &mut Map<String, Value>, keys: &[&str]) {
    for key in keys {
        obj.shift_remove(*key);
    }
}
