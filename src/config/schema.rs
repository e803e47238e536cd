//! Key registry: which keys exist, who may see them and how they coerce
//!
//! # Overview
//!
//! Every recognized configuration key is described by a [`KeySpec`]:
//!
//! - **Tier** ([`Tier`]): `Public` keys are user-facing settings, `Private`
//!   keys hold internal bot state, `Protected` keys are operator-only and may
//!   hold secrets. Protected keys never leave the process through
//!   [`filter_valid`](crate::config::filter_valid).
//! - **Coercion kind** ([`CoercionKind`]): decides how the raw cached value is
//!   typed on read and validated on write. The kind is looked up by key, it
//!   is never guessed from the stored value.
//! - **Default**: the factory value. It is cloned whenever it is materialized
//!   into the cache so cache entries never alias the table.
//!
//! ```
//! use modmail_config::{CoercionKind, KeyRegistry, Tier};
//!
//! let registry = KeyRegistry::builtin();
//! let spec = registry.get("MAIN_COLOR").unwrap();
//! assert_eq!(spec.tier, Tier::Public);
//! assert_eq!(spec.kind, CoercionKind::Color);
//! assert!(!registry.contains("not_a_key"));
//! ```

use crate::values::EnumKind;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

// =============================================================================
// Key Classification
// =============================================================================

/// Visibility tier of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// User-facing settings
    Public,
    /// Internal bot state
    Private,
    /// Operator-only settings and secrets
    Protected,
}

impl Tier {
    /// Display name of the tier
    pub fn name(self) -> &'static str {
        match self {
            Tier::Public => "Public",
            Tier::Private => "Private",
            Tier::Protected => "Protected",
        }
    }
}

/// How a key's raw value is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoercionKind {
    /// `#rrggbb` color
    Color,
    /// ISO-8601 duration
    Duration,
    /// Yes/no flag
    Boolean,
    /// Member of an enum type
    Enum(EnumKind),
    /// Permission mapping whose list values hold IDs
    LegacyIdList,
    /// Stored and returned unchanged
    #[default]
    Plain,
}

impl CoercionKind {
    /// Human-readable name of the kind
    pub fn name(self) -> &'static str {
        match self {
            CoercionKind::Color => "Color",
            CoercionKind::Duration => "Duration",
            CoercionKind::Boolean => "Boolean",
            CoercionKind::Enum(kind) => kind.type_name(),
            CoercionKind::LegacyIdList => "ID Mapping",
            CoercionKind::Plain => "Plain",
        }
    }
}

// =============================================================================
// Key Spec
// =============================================================================

/// Description of a single configuration key
#[derive(Debug, Clone, PartialEq)]
pub struct KeySpec {
    /// Lowercase key name
    pub name: &'static str,
    /// Visibility tier
    pub tier: Tier,
    /// Coercion kind
    pub kind: CoercionKind,
    /// Factory default (raw form)
    pub default: Value,
}

impl KeySpec {
    fn new(name: &'static str, tier: Tier, default: Value) -> Self {
        Self {
            name,
            tier,
            kind: CoercionKind::Plain,
            default,
        }
    }

    /// Create a public key
    pub fn public(name: &'static str, default: Value) -> Self {
        Self::new(name, Tier::Public, default)
    }

    /// Create a private key
    pub fn private(name: &'static str, default: Value) -> Self {
        Self::new(name, Tier::Private, default)
    }

    /// Create a protected key
    pub fn protected(name: &'static str, default: Value) -> Self {
        Self::new(name, Tier::Protected, default)
    }

    /// Classify as a color
    #[must_use]
    pub fn color(mut self) -> Self {
        self.kind = CoercionKind::Color;
        self
    }

    /// Classify as a duration
    #[must_use]
    pub fn duration(mut self) -> Self {
        self.kind = CoercionKind::Duration;
        self
    }

    /// Classify as a boolean
    #[must_use]
    pub fn boolean(mut self) -> Self {
        self.kind = CoercionKind::Boolean;
        self
    }

    /// Classify as an enum of the given type
    #[must_use]
    pub fn enumeration(mut self, kind: EnumKind) -> Self {
        self.kind = CoercionKind::Enum(kind);
        self
    }

    /// Classify as a legacy ID mapping
    #[must_use]
    pub fn legacy_ids(mut self) -> Self {
        self.kind = CoercionKind::LegacyIdList;
        self
    }

    /// A fresh copy of the default value
    pub fn default_value(&self) -> Value {
        self.default.clone()
    }

    /// Check if the key may be exposed outside the process
    pub fn is_exposable(&self) -> bool {
        matches!(self.tier, Tier::Public | Tier::Private)
    }
}

// =============================================================================
// Registry
// =============================================================================

static BUILTIN: LazyLock<KeyRegistry> =
    LazyLock::new(|| KeyRegistry::new(super::defaults::builtin_keys()));

/// Lookup table of every recognized key
#[derive(Debug, Clone)]
pub struct KeyRegistry {
    specs: HashMap<&'static str, KeySpec>,
}

impl KeyRegistry {
    /// Build a registry from key specs. Later specs replace earlier ones with
    /// the same name.
    pub fn new(specs: impl IntoIterator<Item = KeySpec>) -> Self {
        Self {
            specs: specs.into_iter().map(|s| (s.name, s)).collect(),
        }
    }

    /// The built-in Modmail key table
    pub fn builtin() -> &'static KeyRegistry {
        &BUILTIN
    }

    /// Look up a key (case-insensitive)
    pub fn get(&self, key: &str) -> Option<&KeySpec> {
        self.specs.get(normalize_key(key).as_str())
    }

    /// Check if a key is recognized (case-insensitive)
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over all key specs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &KeySpec> {
        self.specs.values()
    }

    /// All key names, sorted
    pub fn all_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.specs.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Key names of one tier, sorted
    pub fn keys_in(&self, tier: Tier) -> Vec<&'static str> {
        let mut keys: Vec<_> = self
            .specs
            .values()
            .filter(|s| s.tier == tier)
            .map(|s| s.name)
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Fresh copy of every default, keyed by name
    pub fn defaults(&self) -> Map<String, Value> {
        self.specs
            .values()
            .map(|s| (s.name.to_string(), s.default_value()))
            .collect()
    }

    /// Number of recognized keys
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Case-fold a key for lookup
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_classifies() {
        let spec = KeySpec::public("accent", json!("#ffffff")).color();
        assert_eq!(spec.kind, CoercionKind::Color);
        assert_eq!(spec.tier, Tier::Public);

        let spec = KeySpec::private("mode", json!(0)).enumeration(EnumKind::DmDisabled);
        assert_eq!(spec.kind, CoercionKind::Enum(EnumKind::DmDisabled));
        assert_eq!(spec.kind.name(), "DmDisabled");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = KeyRegistry::new([KeySpec::protected("token", Value::Null)]);
        assert!(registry.contains("TOKEN"));
        assert!(registry.contains("Token"));
        assert!(!registry.contains("tokens"));
        assert!(!registry.get("token").unwrap().is_exposable());
    }

    #[test]
    fn test_defaults_are_copies() {
        let registry = KeyRegistry::new([KeySpec::private("plugins", json!([]))]);
        let mut defaults = registry.defaults();
        defaults
            .get_mut("plugins")
            .and_then(Value::as_array_mut)
            .unwrap()
            .push(json!("x"));

        assert_eq!(registry.get("plugins").unwrap().default, json!([]));
    }

    #[test]
    fn test_keys_in_tier() {
        let registry = KeyRegistry::new([
            KeySpec::public("b", Value::Null),
            KeySpec::public("a", Value::Null),
            KeySpec::protected("c", Value::Null),
        ]);
        assert_eq!(registry.keys_in(Tier::Public), vec!["a", "b"]);
        assert_eq!(registry.all_keys(), vec!["a", "b", "c"]);
        assert_eq!(registry.len(), 3);
    }
}
