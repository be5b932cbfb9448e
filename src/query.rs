//! Query-string encoding for filterable list and search endpoints.
//!
//! Nested objects flatten into bracketed keys (`range[from]=...`), arrays use
//! indices (`tags[0]=a`), and null leaves are dropped entirely. Keys and
//! values are form-url-encoded, so brackets travel as `%5B` / `%5D`.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Encode an object's fields as a query string.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut pairs = Vec::new();
    match serde_json::to_value(value)? {
        Value::Object(map) => {
            for (key, value) in &map {
                flatten(key.clone(), value, &mut pairs);
            }
        }
        Value::Null => {}
        other => {
            return Err(Error::RequestBuild(format!(
                "query parameters must be an object, got {}",
                other
            )))
        }
    }
    Ok(finish(pairs))
}

/// Encode a value nested under a single root key, e.g. `search[surname]=...`.
pub fn encode_under<T: Serialize + ?Sized>(root: &str, value: &T) -> Result<String> {
    let mut pairs = Vec::new();
    flatten(root.to_string(), &serde_json::to_value(value)?, &mut pairs);
    Ok(finish(pairs))
}

/// Append an encoded query to a path, leaving the path alone when empty.
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

fn finish(pairs: Vec<(String, String)>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn flatten(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key, b.to_string())),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::String(s) => out.push((key, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(format!("{}[{}]", key, i), item, out);
            }
        }
        Value::Object(map) => {
            for (k, v) in map {
                flatten(format!("{}[{}]", key, k), v, out);
            }
        }
    }
}

/// Decode a bracketed query string back into a value tree.
///
/// Scalars come back as strings. Objects whose keys are exactly `0..n`
/// become arrays.
pub fn parse(query: &str) -> Value {
    let mut root = Map::new();
    for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        insert(&mut root, &split_key(&key), value.into_owned());
    }
    let mut value = Value::Object(root);
    arrayify(&mut value);
    value
}

fn split_key(key: &str) -> Vec<String> {
    let Some(open) = key.find('[') else {
        return vec![key.to_string()];
    };

    let mut segments = vec![key[..open].to_string()];
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        match inner.find(']') {
            Some(close) => {
                segments.push(inner[..close].to_string());
                rest = &inner[close + 1..];
            }
            None => {
                segments.push(inner.to_string());
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        segments.push(rest.to_string());
    }
    segments
}

fn insert(map: &mut Map<String, Value>, segments: &[String], value: String) {
    let Some((head, tail)) = segments.split_first() else {
        return;
    };
    if tail.is_empty() {
        map.insert(head.clone(), Value::String(value));
        return;
    }

    let entry = map
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert(child, tail, value);
    }
}

fn arrayify(value: &mut Value) {
    let items: Vec<Value> = match value {
        Value::Object(map) => {
            map.values_mut().for_each(arrayify);
            let is_sequence =
                !map.is_empty() && (0..map.len()).all(|i| map.contains_key(&i.to_string()));
            if !is_sequence {
                return;
            }
            (0..map.len())
                .map(|i| map.remove(&i.to_string()).unwrap_or(Value::Null))
                .collect()
        }
        Value::Array(items) => {
            items.iter_mut().for_each(arrayify);
            return;
        }
        _ => return,
    };
    *value = Value::Array(items);
}
