//! Shallow merge of generation config defaults with client overrides.

use serde_json::{Map, Value};

/// Per-key override of `defaults` by `overrides`. A client-supplied key fully
/// replaces the default value for that key; keys present only on either side
/// are kept. No recursion into nested values, no range validation — the
/// upstream owns value checking.
pub fn merge_generation_config(
    defaults: &Map<String, Value>,
    overrides: Option<&Value>,
) -> Map<String, Value> {
    let mut merged = defaults.clone();
    if let Some(Value::Object(client)) = overrides {
        for (key, value) in client {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
