//! Deep merge for JSON object maps.
//!
//! Merge rules key on the kind of the *incoming* value only: records merge
//! recursively, everything else (scalars, arrays, null) overwrites the
//! target entry wholesale. Arrays are never element-merged.

use serde_json::{Map, Value};

/// Recursively merge `source` into `target`.
///
/// When an incoming value is a record and the target entry is absent or not
/// a record, the target entry is replaced with an empty record before the
/// recursion, so a record always lands on a record.
pub fn merge_objects(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, incoming) in source {
        match incoming {
            Value::Object(source_record) => {
                let entry = target
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                if !entry.is_object() {
                    *entry = Value::Object(Map::new());
                }
                if let Value::Object(target_record) = entry {
                    merge_objects(target_record, source_record);
                }
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}
