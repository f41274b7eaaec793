//! Lenient readers over Move field maps.
//!
//! Nested structs arrive as `{"type": .., "fields": {..}}`, UIDs as
//! `{"id": "0x.."}` and 64-bit integers as decimal strings. Every reader
//! returns an empty value instead of failing when a field is absent or has an
//! unexpected shape.

use std::collections::BTreeMap;

use nft_types::ObjectId;
use serde_json::{Map, Value};

/// A field rendered as a string; `""` when absent or null.
pub fn str_field(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).map(value_to_string).unwrap_or_default()
}

/// A bool field, `false` unless present and `true`.
pub fn bool_field(fields: &Map<String, Value>, key: &str) -> bool {
    fields.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// A u64 field encoded as a number or a decimal string; `0` otherwise.
pub fn u64_field(fields: &Map<String, Value>, key: &str) -> u64 {
    fields.get(key).and_then(value_to_u64).unwrap_or(0)
}

/// An object ID field, unwrapping `UID`/`ID` wrappers.
pub fn id_field(fields: &Map<String, Value>, key: &str) -> Option<ObjectId> {
    fields.get(key).and_then(value_to_id)
}

/// A vector-of-strings field; non-string entries are skipped.
pub fn string_list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key).map(unwrap_struct) {
        Some(Value::Array(items)) => items
            .iter()
            .map(unwrap_struct)
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => map.values().find_map(|v| v.as_str().map(str::to_owned)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Fields of a nested struct value, if it is one.
pub fn struct_fields<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    fields.get(key).and_then(nested_fields)
}

/// Decode a `VecMap`-style attribute table: parallel `keys` and `values`.
pub fn attributes(fields: &Map<String, Value>) -> BTreeMap<String, String> {
    let Some(table) = fields.get("attributes").map(unwrap_struct).and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    let list = |key: &str| -> Vec<String> {
        match table.get(key) {
            Some(Value::Array(items)) => items.iter().map(value_to_string).collect(),
            _ => Vec::new(),
        }
    };
    list("keys").into_iter().zip(list("values")).collect()
}

/// The inner `fields` map of a nested Move struct value.
pub fn nested_fields(value: &Value) -> Option<&Map<String, Value>> {
    unwrap_struct(value).as_object()
}

/// `{"type": .., "fields": X}` becomes `X`; anything else is returned as is.
fn unwrap_struct(value: &Value) -> &Value {
    match value.get("fields") {
        Some(inner) if value.get("type").is_some() || value.as_object().is_some_and(|m| m.len() == 1) => inner,
        _ => value,
    }
}

/// An object ID from a bare string or a `UID`/`ID` struct.
pub fn value_to_id(value: &Value) -> Option<ObjectId> {
    match unwrap_struct(value) {
        Value::String(s) if !s.is_empty() => Some(ObjectId::new(s.clone())),
        Value::Object(map) => map.get("id").or_else(|| map.get("bytes")).and_then(value_to_id),
        _ => None,
    }
}

/// A u64 from a JSON number or decimal string.
pub fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
