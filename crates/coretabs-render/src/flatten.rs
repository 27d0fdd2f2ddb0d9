//! Inlining of small nested objects into dotted keys.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Flatten `map` into `(key, value)` pairs.
///
/// Nested objects with at most `max_keys` keys are inlined recursively as
/// `parent.child`; wider objects stay a single field. Null members are
/// skipped at every level. When two paths collapse onto the same dotted
/// key the later value wins and keeps the earlier position.
#[must_use]
pub fn flatten_object(map: &Map<String, Value>, max_keys: usize) -> Vec<(String, &Value)> {
    let mut flat = Flattened::default();
    flat.extend(map, None, max_keys);
    flat.entries
}

#[derive(Default)]
struct Flattened<'a> {
    entries: Vec<(String, &'a Value)>,
    index: HashMap<String, usize>,
}

impl<'a> Flattened<'a> {
    fn extend(&mut self, map: &'a Map<String, Value>, prefix: Option<&str>, max_keys: usize) {
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{key}"),
                None => key.clone(),
            };
            match value {
                Value::Object(inner) if inner.len() <= max_keys => {
                    self.extend(inner, Some(&path), max_keys);
                }
                _ => self.push(path, value),
            }
        }
    }

    fn push(&mut self, path: String, value: &'a Value) {
        match self.index.get(&path) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, value));
            }
        }
    }
}
