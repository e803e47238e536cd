//! Dispatch from a key's coercion kind to the value parsers
//!
//! Reads and writes are deliberately asymmetric. [`coerce`] reports a stored
//! value it cannot type as `None` and leaves recovery to the caller, while
//! [`normalize`] rejects bad input with a message meant for the user.

use super::{ConfigValue, IsoDuration, boolean, color, human_time, legacy};
use crate::config::CoercionKind;
use serde_json::Value;
use time::OffsetDateTime;

const UNRECOGNIZED_TIME: &str = "Unrecognized time, please use ISO-8601 duration format \
     string or a simpler \"human readable\" time.";

/// Type a raw cached value.
///
/// Returns `None` if the value does not fit the kind. Legacy ID mappings come
/// back already migrated; compare with the input to detect a pending rewrite.
pub fn coerce(kind: CoercionKind, raw: &Value) -> Option<ConfigValue> {
    match kind {
        CoercionKind::Color => color::to_int(raw).map(ConfigValue::Color),
        CoercionKind::Duration => raw
            .as_str()
            .and_then(|s| IsoDuration::parse(s).ok())
            .map(ConfigValue::Duration),
        CoercionKind::Boolean => boolean::parse_bool(raw).map(ConfigValue::Bool),
        CoercionKind::Enum(_) if raw.is_null() => Some(ConfigValue::Enum(None)),
        CoercionKind::Enum(enum_kind) => enum_kind
            .construct(raw)
            .map(|member| ConfigValue::Enum(Some(member))),
        CoercionKind::LegacyIdList => raw
            .as_object()
            .map(|map| ConfigValue::Mapping(legacy::stringify_ids(map).0)),
        CoercionKind::Plain => Some(ConfigValue::Plain(raw.clone())),
    }
}

/// Validate and normalize user input into its stored form.
///
/// `now` anchors human-friendly durations such as `"2 hours"`.
///
/// # Errors
///
/// Returns a user-facing message when the input does not fit the kind.
pub fn normalize(kind: CoercionKind, item: Value, now: OffsetDateTime) -> Result<Value, String> {
    match kind {
        CoercionKind::Color => {
            let input = match &item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            color::normalize(&input)
                .map(Value::String)
                .ok_or_else(|| "Invalid color name or hex.".to_string())
        }
        CoercionKind::Duration => normalize_duration(&item, now).map(Value::String),
        CoercionKind::Boolean => boolean::parse_bool(&item)
            .map(Value::Bool)
            .ok_or_else(|| "Must be a yes/no value.".to_string()),
        CoercionKind::Enum(_) if item.is_null() => Ok(Value::Null),
        CoercionKind::Enum(enum_kind) => enum_kind
            .construct(&item)
            .map(|member| member.to_value())
            .ok_or_else(|| format!("Invalid {} value: {item}.", enum_kind.type_name())),
        CoercionKind::LegacyIdList | CoercionKind::Plain => Ok(item),
    }
}

fn normalize_duration(item: &Value, now: OffsetDateTime) -> Result<String, String> {
    let Some(input) = item.as_str() else {
        return Err(UNRECOGNIZED_TIME.to_string());
    };
    if IsoDuration::parse(input).is_ok() {
        return Ok(input.to_string());
    }

    match human_time::parse_exact(input, now) {
        Ok(dt) => Ok(IsoDuration::from_time(dt - now).to_string()),
        Err(err @ human_time::HumanTimeError::TrailingInput(_)) => Err(err.to_string()),
        Err(human_time::HumanTimeError::Unrecognized) => Err(UNRECOGNIZED_TIME.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{EnumKind, EnumValue, Status};
    use serde_json::json;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-05-01 12:00 UTC);

    #[test]
    fn test_coerce_color() {
        assert_eq!(
            coerce(CoercionKind::Color, &json!("#aabbcc")),
            Some(ConfigValue::Color(0xAABBCC))
        );
        assert_eq!(coerce(CoercionKind::Color, &json!("#zzzzzz")), None);
        assert_eq!(coerce(CoercionKind::Color, &json!(12)), None);
    }

    #[test]
    fn test_coerce_enum() {
        let kind = CoercionKind::Enum(EnumKind::Status);
        assert_eq!(coerce(kind, &Value::Null), Some(ConfigValue::Enum(None)));
        assert_eq!(
            coerce(kind, &json!("idle")),
            Some(ConfigValue::Enum(Some(EnumValue::Status(Status::Idle))))
        );
        assert_eq!(coerce(kind, &json!("sleeping")), None);
    }

    #[test]
    fn test_coerce_legacy_non_mapping_fails() {
        assert_eq!(coerce(CoercionKind::LegacyIdList, &json!([1, 2])), None);
    }

    #[test]
    fn test_normalize_color() {
        let norm = |v: Value| normalize(CoercionKind::Color, v, NOW);
        assert_eq!(norm(json!("#ABC")), Ok(json!("#aabbcc")));
        assert_eq!(norm(json!("Blurple")), Ok(json!("#5865f2")));
        assert_eq!(norm(json!("not a color")), Err("Invalid color name or hex.".into()));
    }

    #[test]
    fn test_normalize_duration() {
        let norm = |v: Value| normalize(CoercionKind::Duration, v, NOW);
        assert_eq!(norm(json!("PT1H")), Ok(json!("PT1H")));
        assert_eq!(norm(json!("2 hours")), Ok(json!("PT2H")));
        assert_eq!(norm(json!("not-a-time")), Err(UNRECOGNIZED_TIME.into()));
        assert_eq!(
            norm(json!("2 hours please")),
            Err("Unexpected text after the time: \"please\".".into())
        );
        assert_eq!(norm(json!(5)), Err(UNRECOGNIZED_TIME.into()));
    }

    #[test]
    fn test_normalize_boolean() {
        let norm = |v: Value| normalize(CoercionKind::Boolean, v, NOW);
        assert_eq!(norm(json!("no")), Ok(json!(false)));
        assert_eq!(norm(json!("maybe")), Err("Must be a yes/no value.".into()));
    }

    #[test]
    fn test_normalize_enum_stores_primitive() {
        let kind = CoercionKind::Enum(EnumKind::DmDisabled);
        assert_eq!(normalize(kind, json!("2"), NOW), Ok(json!(2)));
        assert_eq!(normalize(kind, Value::Null, NOW), Ok(Value::Null));
        assert!(normalize(kind, json!(7), NOW).is_err());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let cases = [
            (CoercionKind::Color, json!("red")),
            (CoercionKind::Duration, json!("1 day")),
            (CoercionKind::Boolean, json!("on")),
            (CoercionKind::Enum(EnumKind::Status), json!("do_not_disturb")),
        ];
        for (kind, input) in cases {
            let once = normalize(kind, input, NOW).unwrap();
            let twice = normalize(kind, once.clone(), NOW).unwrap();
            assert_eq!(once, twice);
        }
    }
}
