/// Generic deep merge of schema-less documents
use serde_yaml::Value;

/// Merge `source` into `target` and return `target`.
///
/// - mappings merge key by key; keys only in `source` are appended
/// - sequences concatenate, `target` elements first, without deduplication
/// - any other pairing is overwritten by `source`
///
/// A `null` in `source` counts as absent and keeps the `target` value. This
/// differs from lodash-style `mergeWith`, where an explicit `null` replaces
/// the target; typed cluster objects omit unset fields, so the two rarely
/// disagree on fetched resources.
pub fn merge(target: &mut Value, source: Value) -> &mut Value {
    match (&mut *target, source) {
        (_, Value::Null) => {}
        (Value::Mapping(target_map), Value::Mapping(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(&key) {
                    Some(existing) => {
                        merge(existing, value);
                    }
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (Value::Sequence(target_items), Value::Sequence(source_items)) => {
            target_items.extend(source_items);
        }
        (slot, value) => *slot = value,
    }
    target
}
