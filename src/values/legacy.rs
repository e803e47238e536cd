//! Legacy ID migration.
//!
//! Permission maps used to store Discord IDs as integers, which overflow
//! 32-bit consumers. Every ID inside a list value is rewritten to its string
//! form; the `-1` sentinel ("everyone") stays numeric.

use serde_json::{Map, Value};

/// Rewrite numeric IDs in every list value of `map` to strings.
///
/// Returns the rewritten map and whether anything changed.
pub fn stringify_ids(map: &Map<String, Value>) -> (Map<String, Value>, bool) {
    let mut changed = false;
    let migrated = map
        .iter()
        .map(|(k, v)| {
            let new_v = match v {
                Value::Array(items) => Value::Array(
                    items
                        .iter()
                        .map(|n| {
                            if is_sentinel(n) || n.is_string() {
                                n.clone()
                            } else {
                                changed = true;
                                Value::String(n.to_string())
                            }
                        })
                        .collect(),
                ),
                other => other.clone(),
            };
            (k.clone(), new_v)
        })
        .collect();
    (migrated, changed)
}

fn is_sentinel(n: &Value) -> bool {
    n.as_f64().is_some_and(|f| f == -1.0)
}
