//! String/tag round-tripping for typed configuration values.
//!
//! Values cross process boundaries as strings accompanied by a short type
//! tag (`"int"`, `"list/float"`, `"dict/str"`, ...). `type_tag` computes
//! the tag from a live value; `cast_from_tag` is the inverse. The failure
//! policy is degrade-and-warn: a value that cannot be cast comes back as
//! the original string with a `tracing::warn!`, never an error — with the
//! single exception of boolean literals, which must fail loudly.

use latent_core::{Error, Result};
use serde_json::Value;

/// Closed set of tag heads a cast can target.
///
/// Unknown tags collapse to `Str`, which leaves the value unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Dict,
}

impl TagKind {
    /// Parse the head of a tag (`"list/int"` -> `List`), defaulting to `Str`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let head = tag
            .split('/')
            .next()
            .unwrap_or(tag)
            .trim()
            .to_ascii_lowercase();
        match head.as_str() {
            "bool" => TagKind::Bool,
            "int" => TagKind::Int,
            "float" => TagKind::Float,
            "list" => TagKind::List,
            "tuple" => TagKind::Tuple,
            "dict" => TagKind::Dict,
            _ => TagKind::Str,
        }
    }

    /// Whether this tag names a container shape
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, TagKind::List | TagKind::Tuple | TagKind::Dict)
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// Compute the short type tag describing a value's runtime shape.
///
/// A non-empty array of same-typed primitives reports `"list/<elem>"`; a
/// non-empty object with same-typed values reports `"dict/<elem>"`. Empty
/// and heterogeneous containers fall back to the bare container name.
#[must_use]
pub fn type_tag(value: &Value) -> String {
    match value {
        Value::Array(items) if !items.is_empty() => {
            let elem = value_type_name(&items[0]);
            if items.iter().all(|v| is_primitive(v) && value_type_name(v) == elem) {
                return format!("list/{elem}");
            }
            "list".to_string()
        }
        Value::Object(map) if !map.is_empty() => {
            let mut values = map.values();
            let elem = values.next().map(value_type_name).unwrap_or("str");
            if map.values().all(|v| value_type_name(v) == elem) {
                return format!("dict/{elem}");
            }
            "dict".to_string()
        }
        other => value_type_name(other).to_string(),
    }
}

/// Parse a boolean literal: `"true"`/`"false"`/empty, case-insensitive.
///
/// Anything else is an [`Error::InvalidBooleanLiteral`]. This is the one
/// cast that must not silently degrade to a string.
pub fn parse_bool(value: &str) -> Result<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        _ => Err(Error::invalid_boolean_literal(value)),
    }
}

/// Cast a string back to the value its tag describes.
///
/// Container tags try a strict JSON parse first, then a permissive
/// YAML-flavored parse (raw, then bracket-wrapped for sequences), and
/// finally degrade to the original string with a warning. Scalar parse
/// failures other than booleans degrade the same way. An empty tag maps
/// the empty string to `Null` and leaves anything else untouched.
pub fn cast_from_tag(value: &str, tag: &str) -> Result<Value> {
    if tag.trim().is_empty() {
        if value.is_empty() {
            return Ok(Value::Null);
        }
        return Ok(Value::String(value.to_string()));
    }

    match TagKind::from_tag(tag) {
        TagKind::Bool => parse_bool(value).map(Value::Bool),
        TagKind::Int => match value.trim().parse::<i64>() {
            Ok(n) => Ok(Value::Number(n.into())),
            Err(_) => {
                tracing::warn!(value, "could not cast value to int; returning it as a string");
                Ok(Value::String(value.to_string()))
            }
        },
        TagKind::Float => match value.trim().parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            Some(n) => Ok(Value::Number(n)),
            None => {
                tracing::warn!(value, "could not cast value to float; returning it as a string");
                Ok(Value::String(value.to_string()))
            }
        },
        TagKind::Str => Ok(Value::String(value.to_string())),
        TagKind::List | TagKind::Tuple => Ok(cast_sequence(value)),
        TagKind::Dict => Ok(cast_mapping(value)),
    }
}

/// Permissive second-tier parse: relaxed YAML accepted, result re-expressed
/// in the closed JSON value set.
fn relaxed_parse(input: &str) -> Option<Value> {
    let parsed: serde_yaml::Value = serde_yaml::from_str(input).ok()?;
    serde_json::to_value(parsed).ok()
}

fn cast_sequence(value: &str) -> Value {
    if let Ok(parsed) = serde_json::from_str::<Value>(value) {
        if parsed.is_array() {
            return parsed;
        }
    }
    if let Some(parsed) = relaxed_parse(value) {
        if parsed.is_array() {
            return parsed;
        }
    }
    // Legacy values may carry stray brackets or be bare comma-separated
    // literals; strip delimiters and re-wrap as a flow sequence.
    let inner = value
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')']);
    if let Some(parsed) = relaxed_parse(&format!("[{inner}]")) {
        if parsed.is_array() {
            return parsed;
        }
    }
    tracing::warn!(value, "could not cast value to a sequence; returning it as a string");
    Value::String(value.to_string())
}

fn cast_mapping(value: &str) -> Value {
    if let Ok(parsed) = serde_json::from_str::<Value>(value) {
        if parsed.is_object() {
            return parsed;
        }
    }
    if let Some(parsed) = relaxed_parse(value) {
        if parsed.is_object() {
            return parsed;
        }
    }
    tracing::warn!(value, "could not cast value to a mapping; returning it as a string");
    Value::String(value.to_string())
}

/// Whether every leaf of a value tree is a primitive scalar.
///
/// Null is not primitive: it cannot survive a string round-trip.
#[must_use]
pub fn is_primitive_tree(value: &Value) -> bool {
    match value {
        Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
        Value::Array(items) => items.iter().all(is_primitive_tree),
        Value::Object(map) => map.values().all(is_primitive_tree),
        Value::Null => false,
    }
}
