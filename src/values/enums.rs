//! Enumerated settings
//!
//! Enums are always stored in their primitive form (integer or string) and
//! rebuilt from that primitive on read.

use serde_json::Value;
use std::fmt;

/// Which enum type a key holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    /// [`DmDisabled`]
    DmDisabled,
    /// [`Status`]
    Status,
    /// [`ActivityType`]
    ActivityType,
}

impl EnumKind {
    /// Build a member of this enum from its stored primitive.
    ///
    /// Integer enums also accept the decimal string form, since env vars and
    /// the override file can only deliver strings.
    pub fn construct(self, raw: &Value) -> Option<EnumValue> {
        match self {
            EnumKind::DmDisabled => as_int(raw)
                .and_then(DmDisabled::from_value)
                .map(EnumValue::DmDisabled),
            EnumKind::Status => raw
                .as_str()
                .and_then(Status::from_value)
                .map(EnumValue::Status),
            EnumKind::ActivityType => as_int(raw)
                .and_then(ActivityType::from_value)
                .map(EnumValue::ActivityType),
        }
    }

    /// Every member of this enum, in declaration order
    pub fn members(self) -> Vec<EnumValue> {
        match self {
            EnumKind::DmDisabled => [DmDisabled::None, DmDisabled::NewThreads, DmDisabled::AllThreads]
                .into_iter()
                .map(EnumValue::DmDisabled)
                .collect(),
            EnumKind::Status => [
                Status::Online,
                Status::Offline,
                Status::Idle,
                Status::Dnd,
                Status::Invisible,
            ]
            .into_iter()
            .map(EnumValue::Status)
            .collect(),
            EnumKind::ActivityType => (-1..=5)
                .filter_map(ActivityType::from_value)
                .map(EnumValue::ActivityType)
                .collect(),
        }
    }

    /// Name of the enum type, used in error messages and docs
    pub fn type_name(self) -> &'static str {
        match self {
            EnumKind::DmDisabled => "DmDisabled",
            EnumKind::Status => "Status",
            EnumKind::ActivityType => "ActivityType",
        }
    }
}

fn as_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Who may open new threads by direct message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmDisabled {
    None = 0,
    NewThreads = 1,
    AllThreads = 2,
}

impl DmDisabled {
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::NewThreads),
            2 => Some(Self::AllThreads),
            _ => None,
        }
    }

    pub fn value(self) -> i64 {
        self as i64
    }
}

/// Bot presence status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Online,
    Offline,
    Idle,
    Dnd,
    Invisible,
}

impl Status {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "online" => Some(Self::Online),
            "offline" => Some(Self::Offline),
            "idle" => Some(Self::Idle),
            "dnd" | "do_not_disturb" => Some(Self::Dnd),
            "invisible" => Some(Self::Invisible),
            _ => None,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Idle => "idle",
            Self::Dnd => "dnd",
            Self::Invisible => "invisible",
        }
    }
}

/// Bot presence activity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Unknown = -1,
    Playing = 0,
    Streaming = 1,
    Listening = 2,
    Watching = 3,
    Custom = 4,
    Competing = 5,
}

impl ActivityType {
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            -1 => Some(Self::Unknown),
            0 => Some(Self::Playing),
            1 => Some(Self::Streaming),
            2 => Some(Self::Listening),
            3 => Some(Self::Watching),
            4 => Some(Self::Custom),
            5 => Some(Self::Competing),
            _ => None,
        }
    }

    pub fn value(self) -> i64 {
        self as i64
    }
}

/// A member of one of the enum types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumValue {
    DmDisabled(DmDisabled),
    Status(Status),
    ActivityType(ActivityType),
}

impl EnumValue {
    /// The enum type this member belongs to
    pub fn kind(self) -> EnumKind {
        match self {
            EnumValue::DmDisabled(_) => EnumKind::DmDisabled,
            EnumValue::Status(_) => EnumKind::Status,
            EnumValue::ActivityType(_) => EnumKind::ActivityType,
        }
    }

    /// Underlying primitive used for storage
    pub fn to_value(self) -> Value {
        match self {
            EnumValue::DmDisabled(v) => Value::from(v.value()),
            EnumValue::Status(v) => Value::from(v.value()),
            EnumValue::ActivityType(v) => Value::from(v.value()),
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::DmDisabled(v) => write!(f, "{v:?}"),
            EnumValue::Status(v) => f.write_str(v.value()),
            EnumValue::ActivityType(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<DmDisabled> for EnumValue {
    fn from(v: DmDisabled) -> Self {
        EnumValue::DmDisabled(v)
    }
}

impl From<Status> for EnumValue {
    fn from(v: Status) -> Self {
        EnumValue::Status(v)
    }
}

impl From<ActivityType> for EnumValue {
    fn from(v: ActivityType) -> Self {
        EnumValue::ActivityType(v)
    }
}
