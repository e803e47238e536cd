//! Projections over key/value maps for persistence and transport
//!
//! Both helpers are pure: they never touch a cache and always return a new map
//! with lowercased keys.

use super::schema::KeyRegistry;
use log::error;
use serde_json::{Map, Value};

/// Keep only public and private entries.
///
/// Protected keys (tokens, connection strings, owner lists) are dropped, so the
/// result is safe to expose outside the process.
pub fn filter_valid(registry: &KeyRegistry, data: &Map<String, Value>) -> Map<String, Value> {
    data.iter()
        .filter_map(|(k, v)| {
            let spec = registry.get(k)?;
            spec.is_exposable().then(|| (spec.name.to_string(), v.clone()))
        })
        .collect()
}

/// Keep only entries whose value differs from the key's default.
///
/// Unrecognized keys are dropped and logged.
pub fn filter_default(registry: &KeyRegistry, data: &Map<String, Value>) -> Map<String, Value> {
    data.iter()
        .filter_map(|(k, v)| {
            let Some(spec) = registry.get(k) else {
                error!("Unexpected configuration detected: {k}.");
                return None;
            };
            (*v != spec.default).then(|| (spec.name.to_string(), v.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_filter_valid_drops_protected() {
        let registry = KeyRegistry::builtin();
        let data = map(json!({"PREFIX": "!", "token": "secret", "plugins": []}));

        let filtered = filter_valid(registry, &data);
        assert_eq!(Value::Object(filtered), json!({"prefix": "!", "plugins": []}));
    }

    #[test]
    fn test_filter_valid_drops_unknown() {
        let filtered = filter_valid(KeyRegistry::builtin(), &map(json!({"bogus": 1})));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_default_equal_values() {
        let registry = KeyRegistry::builtin();
        let account_age = registry.get("account_age").unwrap().default_value();

        let data = map(json!({"prefix": "?", "account_age": account_age}));
        assert!(filter_default(registry, &data).is_empty());

        let data = map(json!({"prefix": "!", "account_age": account_age}));
        assert_eq!(
            Value::Object(filter_default(registry, &data)),
            json!({"prefix": "!"})
        );
    }

    #[test]
    fn test_filter_default_keeps_protected_and_drops_unknown() {
        let data = map(json!({"Token": "abc", "unknown_key": true}));
        let filtered = filter_default(KeyRegistry::builtin(), &data);
        assert_eq!(Value::Object(filtered), json!({"token": "abc"}));
    }

    #[test]
    fn test_input_untouched() {
        let data = map(json!({"PREFIX": "!"}));
        let _ = filter_default(KeyRegistry::builtin(), &data);
        assert!(data.contains_key("PREFIX"));
    }
}
