//! Insertion-ordered parameter map used for query params, body params,
//! headers and decoded response bodies.

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Ordered key/value map with an optional read-only mode.
///
/// Keys are strings, values are arbitrary JSON values. Iteration follows
/// insertion order. Merging distinguishes string keys (overwrite) from
/// integer-style keys (append under the next free index), and recurses when
/// both sides hold an object under the same string key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    data: Map<String, Value>,
    read_only: bool,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the map. Any further mutation panics.
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    /// Convenience accessor for string values.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Insert a value, overwriting any existing entry with the same key.
    ///
    /// # Panics
    ///
    /// Panics if the map was frozen with [`Params::into_read_only`].
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.assert_writable();
        self.data.insert(key.into(), value.into());
    }

    /// Remove an entry, returning the removed value.
    ///
    /// # Panics
    ///
    /// Panics if the map is read-only.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.assert_writable();
        self.data.shift_remove(key)
    }

    /// Remove all entries.
    ///
    /// # Panics
    ///
    /// Panics if the map is read-only.
    pub fn clear(&mut self) {
        self.assert_writable();
        self.data.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Replace the contents of this map with the entries of `source`.
    ///
    /// # Panics
    ///
    /// Panics if the map is read-only.
    pub fn copy_from(&mut self, source: &Params) {
        self.assert_writable();
        self.data.clear();
        for (key, value) in &source.data {
            self.data.insert(key.clone(), value.clone());
        }
    }

    /// Merge `source` into this map.
    ///
    /// String-keyed entries from `source` overwrite existing entries.
    /// Integer-style keys already present are appended under the next free
    /// integer index instead. With `recursive`, two objects stored under the
    /// same string key are merged by the same rules; without it every entry
    /// is a plain overwrite.
    ///
    /// # Panics
    ///
    /// Panics if the map is read-only.
    pub fn merge_with(&mut self, source: &Params, recursive: bool) {
        self.assert_writable();
        if recursive {
            merge_objects(&mut self.data, &source.data);
        } else {
            for (key, value) in &source.data {
                self.data.insert(key.clone(), value.clone());
            }
        }
    }

    /// View the map as a JSON object, preserving entry order.
    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// Build a map from a JSON value. Objects map directly; arrays become
    /// integer-keyed entries; anything else yields an empty map.
    pub fn from_value(value: Value) -> Self {
        let data = match value {
            Value::Object(map) => map,
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
            _ => Map::new(),
        };
        Self {
            data,
            read_only: false,
        }
    }

    /// Encode as a query string: top-level keys sorted lexicographically,
    /// nested values flattened to bracket notation, percent-encoded.
    pub fn to_query_string(&self) -> String {
        let mut keys: Vec<&String> = self.data.keys().collect();
        keys.sort();
        let mut pairs = Vec::new();
        for key in keys {
            flatten_value(key, &self.data[key.as_str()], &mut pairs);
        }
        encode_pairs(&pairs)
    }

    /// Encode as a form-urlencoded request body, keeping insertion order.
    pub fn to_form_body(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.data {
            flatten_value(key, value, &mut pairs);
        }
        encode_pairs(&pairs)
    }

    fn assert_writable(&self) {
        assert!(!self.read_only, "the params map is read only");
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            read_only: false,
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(data: Map<String, Value>) -> Self {
        Self {
            data,
            read_only: false,
        }
    }
}

/// Merge `source` into `dest` following the overwrite/append/recurse rules.
fn merge_objects(dest: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        if key.parse::<u64>().is_ok() {
            if dest.contains_key(key) {
                dest.insert(next_integer_key(dest).to_string(), value.clone());
            } else {
                dest.insert(key.clone(), value.clone());
            }
            continue;
        }
        if let Value::Object(source_obj) = value {
            if let Some(Value::Object(existing)) = dest.get_mut(key) {
                merge_objects(existing, source_obj);
                continue;
            }
        }
        dest.insert(key.clone(), value.clone());
    }
}

/// Next free integer index: one past the largest integer-style key.
fn next_integer_key(map: &Map<String, Value>) -> u64 {
    map.keys()
        .filter_map(|key| key.parse::<u64>().ok())
        .max()
        .map_or(0, |max| max + 1)
}

fn flatten_value(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => out.push((key.to_string(), if *flag { "1" } else { "0" }.into())),
        Value::Number(number) => out.push((key.to_string(), number.to_string())),
        Value::String(text) => out.push((key.to_string(), text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(&format!("{key}[{index}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (nested_key, nested) in map {
                flatten_value(&format!("{key}[{nested_key}]"), nested, out);
            }
        }
    }
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
