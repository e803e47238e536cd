//! Cache logic for `ConfigManager`
//!
//! One mutex covers every read-coerce-reset and write sequence. Writes made
//! under the lock are recorded as [`Change`]s and handed to listeners only
//! after the guard is dropped.

use crate::events::Change;
use crate::sync::MutexExt;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Cached entries keyed by lowercase key name
pub(crate) type Entries = HashMap<String, Value>;

pub(crate) struct ConfigCache {
    state: Mutex<Entries>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HashMap::new()),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Entries> {
        self.state.lock_recovered()
    }

    /// Replace every entry
    pub fn replace(&self, entries: Entries) {
        *self.lock() = entries;
    }

    pub fn snapshot(&self) -> Map<String, Value> {
        self.lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl std::fmt::Debug for ConfigCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.lock();
        let mut sorted: Vec<_> = entries.iter().collect();
        sorted.sort_unstable_by_key(|(k, _)| k.as_str());
        f.debug_map().entries(sorted).finish()
    }
}

/// Write `value` under `key`, recording a change when it differs from what
/// the key held before. A missing entry counts as holding `fallback`.
pub(crate) fn assign(
    entries: &mut Entries,
    key: &str,
    value: Value,
    fallback: &Value,
    changes: &mut Vec<Change>,
) {
    let old = entries.insert(key.to_string(), value.clone());
    let old = old.unwrap_or_else(|| fallback.clone());
    if old != value {
        changes.push(Change {
            key: key.to_string(),
            old,
            new: value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assign_records_change() {
        let mut entries = Entries::new();
        let mut changes = Vec::new();

        assign(&mut entries, "prefix", json!("!"), &json!("?"), &mut changes);
        assert_eq!(entries["prefix"], json!("!"));
        assert_eq!(
            changes,
            vec![Change {
                key: "prefix".into(),
                old: json!("?"),
                new: json!("!"),
            }]
        );
    }

    #[test]
    fn test_assign_same_value_is_silent() {
        let mut entries = Entries::from([("prefix".to_string(), json!("!"))]);
        let mut changes = Vec::new();

        assign(&mut entries, "prefix", json!("!"), &json!("?"), &mut changes);
        assert!(changes.is_empty());

        assign(&mut entries, "mention", json!("@here"), &json!("@here"), &mut changes);
        assert!(changes.is_empty());
        assert!(entries.contains_key("mention"));
    }

    #[test]
    fn test_snapshot_and_debug() {
        let cache = ConfigCache::new();
        cache.replace(Entries::from([
            ("b".to_string(), json!(2)),
            ("a".to_string(), json!(1)),
        ]));

        assert_eq!(Value::Object(cache.snapshot()), json!({"a": 1, "b": 2}));
        assert_eq!(format!("{cache:?}"), r#"{"a": Number(1), "b": Number(2)}"#);
    }
}
