//! Path-keyed flattening and reconstruction of nested mappings.
//!
//! `flatten` turns a nested mapping into a flat `path -> value` mapping
//! using a separator (default callers use `"/"`). `unflatten` overlays a
//! flat mapping back onto a skeleton describing the expected shape, and
//! `naive_unflatten` reconstructs nesting from the keys alone when no
//! skeleton is available. `map_leaves` is the recursive visitor used to
//! rewrite every leaf of a value tree.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

type Entries = Map<String, Value>;

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// Flatten a nested mapping into `path -> value` entries.
///
/// Primitive scalars and all-primitive arrays are copied verbatim under
/// `prefix + key`. Nested mappings are recursed into with
/// `prefix + key + sep`; an empty nested mapping is preserved as an
/// explicit empty-mapping leaf. Anything else (heterogeneous mixtures,
/// nulls) is copied verbatim, unflattened.
#[must_use]
pub fn flatten(map: &Entries, prefix: &str, sep: &str) -> Entries {
    let mut flat = Entries::new();
    for (key, value) in map {
        let path = format!("{prefix}{key}");
        match value {
            v if is_primitive(v) => {
                flat.insert(path, v.clone());
            }
            Value::Array(items) if items.iter().all(is_primitive) => {
                flat.insert(path, value.clone());
            }
            Value::Object(nested) => {
                let nested_flat = flatten(nested, &format!("{path}{sep}"), sep);
                if nested_flat.is_empty() {
                    flat.insert(path, Value::Object(Entries::new()));
                } else {
                    flat.extend(nested_flat);
                }
            }
            other => {
                flat.insert(path, other.clone());
            }
        }
    }
    flat
}

/// Overlay flat `path -> value` entries onto a skeleton mapping.
///
/// The skeleton decides the shape: nested-mapping entries are recursed
/// into, everything else is looked up at `prefix + key` in the flat
/// mapping and kept as-is when absent.
#[must_use]
pub fn unflatten(skeleton: &Entries, flat: &Entries, prefix: &str, sep: &str) -> Entries {
    let mut out = Entries::new();
    for (key, value) in skeleton {
        let path = format!("{prefix}{key}");
        let rebuilt = match value {
            Value::Object(nested) => {
                Value::Object(unflatten(nested, flat, &format!("{path}{sep}"), sep))
            }
            other => flat.get(&path).cloned().unwrap_or_else(|| other.clone()),
        };
        out.insert(key.clone(), rebuilt);
    }
    out
}

/// Reconstruct a nested mapping purely from separator-delimited keys.
///
/// Entries are grouped by their first path segment; a group holding a
/// single exact match becomes a scalar leaf, otherwise the remaining
/// suffixes are recursed on. An exact-match key that collides with a
/// nested group is discarded, as there is no slot for it.
#[must_use]
pub fn naive_unflatten(flat: &Entries, sep: &str) -> Entries {
    let mut groups: BTreeMap<String, Vec<(&String, &Value)>> = BTreeMap::new();
    for (key, value) in flat {
        let head = key.split(sep).next().unwrap_or(key).to_string();
        groups.entry(head).or_default().push((key, value));
    }

    let mut out = Entries::new();
    for (head, bucket) in groups {
        if bucket.len() == 1 && *bucket[0].0 == head {
            out.insert(head, bucket[0].1.clone());
            continue;
        }
        let mut suffixes = Entries::new();
        for (key, value) in bucket {
            if let Some(rest) = key
                .strip_prefix(head.as_str())
                .and_then(|r| r.strip_prefix(sep))
            {
                if !rest.is_empty() {
                    suffixes.insert(rest.to_string(), (*value).clone());
                }
            }
        }
        out.insert(head, Value::Object(naive_unflatten(&suffixes, sep)));
    }
    out
}

/// Rebuild a value tree with `f` applied to every non-container leaf.
#[must_use]
pub fn map_leaves<F>(value: &Value, f: &mut F) -> Value
where
    F: FnMut(&Value) -> Value,
{
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|v| map_leaves(v, f)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), map_leaves(v, f)))
                .collect(),
        ),
        leaf => f(leaf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Entries {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_flatten_nested() {
        let nested = as_map(json!({
            "a": 1,
            "b": {"c": "x", "d": {"e": true}},
            "f": [1, 2, 3],
        }));
        let flat = flatten(&nested, "", "/");
        assert_eq!(flat.get("a"), Some(&json!(1)));
        assert_eq!(flat.get("b/c"), Some(&json!("x")));
        assert_eq!(flat.get("b/d/e"), Some(&json!(true)));
        assert_eq!(flat.get("f"), Some(&json!([1, 2, 3])));
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn test_flatten_preserves_empty_mapping_leaf() {
        let nested = as_map(json!({"a": {"b": {}}}));
        let flat = flatten(&nested, "", "/");
        assert_eq!(flat.get("a/b"), Some(&json!({})));
    }

    #[test]
    fn test_flatten_copies_mixed_values_verbatim() {
        let nested = as_map(json!({"mixed": [1, {"x": 2}], "n": null}));
        let flat = flatten(&nested, "", "/");
        assert_eq!(flat.get("mixed"), Some(&json!([1, {"x": 2}])));
        assert_eq!(flat.get("n"), Some(&json!(null)));
    }

    #[test]
    fn test_flatten_unflatten_round_trip() {
        let nested = as_map(json!({
            "a": 1,
            "b": {"c": "x", "d": {"e": true, "f": 2.5}},
            "g": ["u", "v"],
        }));
        let flat = flatten(&nested, "", "/");
        assert_eq!(unflatten(&nested, &flat, "", "/"), nested);
    }

    #[test]
    fn test_unflatten_overlays_changed_values() {
        let skeleton = as_map(json!({"a": 1, "b": {"c": 2}}));
        let mut flat = flatten(&skeleton, "", "/");
        flat.insert("b/c".to_string(), json!(99));
        let rebuilt = unflatten(&skeleton, &flat, "", "/");
        assert_eq!(rebuilt, as_map(json!({"a": 1, "b": {"c": 99}})));
    }

    #[test]
    fn test_unflatten_keeps_skeleton_defaults() {
        let skeleton = as_map(json!({"a": 1, "b": {"c": 2}}));
        let rebuilt = unflatten(&skeleton, &Entries::new(), "", "/");
        assert_eq!(rebuilt, skeleton);
    }

    #[test]
    fn test_naive_unflatten() {
        let flat = as_map(json!({
            "a": 1,
            "b/c": "x",
            "b/d/e": true,
        }));
        let nested = naive_unflatten(&flat, "/");
        assert_eq!(
            Value::Object(nested),
            json!({"a": 1, "b": {"c": "x", "d": {"e": true}}})
        );
    }

    #[test]
    fn test_naive_unflatten_round_trip() {
        let nested = as_map(json!({
            "top": {"mid": {"leaf": 7}},
            "other": "y",
        }));
        let flat = flatten(&nested, "", "/");
        assert_eq!(Value::Object(naive_unflatten(&flat, "/")), Value::Object(nested));
    }

    #[test]
    fn test_map_leaves() {
        let tree = json!({"a": 1, "b": [2, 3], "c": {"d": 4}});
        let doubled = map_leaves(&tree, &mut |leaf| match leaf.as_i64() {
            Some(n) => json!(n * 2),
            None => leaf.clone(),
        });
        assert_eq!(doubled, json!({"a": 2, "b": [4, 6], "c": {"d": 8}}));
    }
}
