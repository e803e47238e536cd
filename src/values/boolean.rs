//! Permissive yes/no parsing

use serde_json::Value;

/// Parse a truthy/falsy value.
///
/// Accepts booleans, the integers `0`/`1`, and the strings
/// `y yes t true on 1 enable` / `n no f false off 0 disable` in any case.
pub fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => parse_bool_str(s),
        _ => None,
    }
}

/// String form of [`parse_bool`]
pub fn parse_bool_str(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" | "enable" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" | "disable" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(&json!(true)), Some(true));
        assert_eq!(parse_bool(&json!("YES")), Some(true));
        assert_eq!(parse_bool(&json!("enable")), Some(true));
        assert_eq!(parse_bool(&json!("no")), Some(false));
        assert_eq!(parse_bool(&json!("Off")), Some(false));
        assert_eq!(parse_bool(&json!(0)), Some(false));
    }

    #[test]
    fn test_parse_bool_rejects() {
        assert_eq!(parse_bool(&json!("maybe")), None);
        assert_eq!(parse_bool(&json!(2)), None);
        assert_eq!(parse_bool(&json!(null)), None);
        assert_eq!(parse_bool(&json!(" yes")), None);
    }
}
