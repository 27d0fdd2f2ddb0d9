//! Snapshot export and restore.
//!
//! Stored blobs are opaque: a snapshot is a single JSON object whose fields
//! are the store's keys. Restoring goes through [`StateStore::set`], so
//! subscribers observe restored values exactly like any other write.

use serde_json::{Map, Value};

use crate::error::{Result, StateError};
use crate::store::StateStore;

impl StateStore {
    /// All entries as one JSON object (keys sorted).
    #[must_use]
    pub fn snapshot_json(&self) -> Value {
        let mut entries: Vec<(String, Value)> = self.get_all().into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Object(entries.into_iter().collect::<Map<String, Value>>())
    }

    /// Serialize the snapshot to a compact JSON string.
    pub fn snapshot_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot_json())?)
    }

    /// `set` every top-level field of `snapshot`, returning how many were
    /// restored.
    pub fn restore_json(&self, snapshot: &Value) -> Result<usize> {
        let Value::Object(fields) = snapshot else {
            return Err(StateError::not_an_object(snapshot));
        };
        for (key, value) in fields {
            self.set(key.clone(), value.clone());
        }
        tracing::debug!(message = "state.restore", restored = fields.len());
        Ok(fields.len())
    }

    /// Parse `raw` and restore it. Nothing is written when parsing fails.
    pub fn restore_str(&self, raw: &str) -> Result<usize> {
        let snapshot: Value = serde_json::from_str(raw)?;
        self.restore_json(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn snapshot_round_trips_through_restore() {
        let store = StateStore::new();
        store.set("language", "id");
        store.set("sidebar", json!({ "isOpen": true }));

        let raw = store.snapshot_string().expect("serialize");
        let restored = StateStore::new();
        assert_eq!(restored.restore_str(&raw).expect("restore"), 2);
        assert_eq!(restored.get("language"), Some(json!("id")));
        assert_eq!(restored.get("sidebar"), Some(json!({ "isOpen": true })));
    }

    #[test]
    fn restore_notifies_subscribers() {
        let store = StateStore::new();
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let _h = store.subscribe("activeTab", move |_, _| hits_clone.set(hits_clone.get() + 1));

        store
            .restore_json(&json!({ "activeTab": "cases" }))
            .expect("restore");
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn restore_rejects_non_objects() {
        let store = StateStore::new();
        let err = store.restore_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, StateError::NotAnObject { found: "array" }));
        assert!(store.is_empty());
    }

    #[test]
    fn restore_rejects_malformed_json() {
        let store = StateStore::new();
        let err = store.restore_str("{not json").unwrap_err();
        assert!(matches!(err, StateError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn restore_is_logged() {
        let store = StateStore::new();
        store
            .restore_json(&json!({ "a": 1, "b": 2 }))
            .expect("restore");
        assert!(logs_contain("state.restore"));
        assert!(logs_contain("restored=2"));
    }
}
