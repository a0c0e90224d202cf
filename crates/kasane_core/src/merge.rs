//! Key-wise merging of JSON mappings.

use serde_json::{Map, Value};

/// Recursively merges `source` into `target` (source takes precedence).
///
/// - Objects present on both sides are merged key by key
/// - Any other value (scalar, array, null) from `source` replaces the target's
pub fn deep_merge(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}
