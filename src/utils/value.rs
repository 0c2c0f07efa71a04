/// Optional-path traversal over schema-less YAML documents
use serde_yaml::{Mapping, Value};

/// Follow `path` through nested mappings and return the mapping found there.
///
/// Any missing key or non-mapping step yields `None`.
pub fn mapping_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Mapping> {
    let mut current = value;
    for key in path {
        current = current.as_mapping()?.get(*key)?;
    }
    current.as_mapping()
}

/// Mutable variant of [`mapping_at`]
pub fn mapping_at_mut<'a>(value: &'a mut Value, path: &[&str]) -> Option<&'a mut Mapping> {
    let mut current = value;
    for key in path {
        current = current.as_mapping_mut()?.get_mut(*key)?;
    }
    current.as_mapping_mut()
}

/// Read a non-empty string field at `path`
pub fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let (last, parents) = path.split_last()?;
    mapping_at(value, parents)?
        .get(*last)?
        .as_str()
        .filter(|s| !s.is_empty())
}

/// Remove every key in `keys`, keeping the order of what remains
pub fn remove_keys(mapping: &mut Mapping, keys: &[&str]) {
    for key in keys {
        mapping.shift_remove(*key);
    }
}
