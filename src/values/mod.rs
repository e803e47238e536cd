//! Value coercion
//!
//! Raw values live in the cache as JSON. Reading a key through the typed
//! getter turns the raw value into a [`ConfigValue`] according to the key's
//! coercion kind:
//!
//! | Kind | Raw form | Coerced form |
//! |------|----------|--------------|
//! | Color | `"#rrggbb"` | `u32` color code |
//! | Duration | ISO-8601 string | [`IsoDuration`] |
//! | Boolean | bool / yes-no string | `bool` |
//! | Enum | integer or string | [`EnumValue`] (or none) |
//! | LegacyIdList | map of lists | map with string IDs |
//! | Plain | anything | unchanged |

pub mod boolean;
mod coerce;
pub mod color;
mod color_names;
pub mod duration;
pub mod enums;
pub mod human_time;
pub mod legacy;

pub use coerce::{coerce, normalize};
pub use duration::{DurationParseError, IsoDuration};
pub use enums::{ActivityType, DmDisabled, EnumKind, EnumValue, Status};

use serde_json::{Map, Value};

/// A configuration value in its coerced (typed) form
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// 24-bit color code
    Color(u32),
    /// ISO-8601 duration
    Duration(IsoDuration),
    /// Yes/no flag
    Bool(bool),
    /// Enum member, `None` when the key is unset
    Enum(Option<EnumValue>),
    /// Permission mapping with string IDs
    Mapping(Map<String, Value>),
    /// Uncoerced value
    Plain(Value),
}

impl ConfigValue {
    /// Color code, if this is a color
    pub fn as_color(&self) -> Option<u32> {
        match self {
            ConfigValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Duration, if this is a duration
    pub fn as_duration(&self) -> Option<&IsoDuration> {
        match self {
            ConfigValue::Duration(d) => Some(d),
            _ => None,
        }
    }

    /// Flag, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Enum member, if this is a set enum
    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            ConfigValue::Enum(e) => *e,
            _ => None,
        }
    }

    /// String contents of a plain value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Plain(v) => v.as_str(),
            _ => None,
        }
    }

    /// Short name of the variant, used in type mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Color(_) => "color",
            ConfigValue::Duration(_) => "duration",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Enum(_) => "enum",
            ConfigValue::Mapping(_) => "mapping",
            ConfigValue::Plain(_) => "plain",
        }
    }

    /// Convert back into the primitive form used for storage.
    ///
    /// Feeding this back through the typed setter reproduces the same
    /// coerced value.
    pub fn to_raw(&self) -> Value {
        match self {
            ConfigValue::Color(c) => Value::String(format!("#{c:06x}")),
            ConfigValue::Duration(d) => Value::String(d.to_string()),
            ConfigValue::Bool(b) => Value::Bool(*b),
            ConfigValue::Enum(e) => e.map_or(Value::Null, EnumValue::to_value),
            ConfigValue::Mapping(m) => Value::Object(m.clone()),
            ConfigValue::Plain(v) => v.clone(),
        }
    }
}

impl From<EnumValue> for Value {
    fn from(member: EnumValue) -> Self {
        member.to_value()
    }
}

impl From<DmDisabled> for Value {
    fn from(member: DmDisabled) -> Self {
        EnumValue::from(member).to_value()
    }
}

impl From<Status> for Value {
    fn from(member: Status) -> Self {
        EnumValue::from(member).to_value()
    }
}

impl From<ActivityType> for Value {
    fn from(member: ActivityType) -> Self {
        EnumValue::from(member).to_value()
    }
}

impl From<IsoDuration> for Value {
    fn from(duration: IsoDuration) -> Self {
        Value::String(duration.to_string())
    }
}
