use crate::config::{CoercionKind, KeySpec, normalize_key};
use crate::error::{Error, Result};
use crate::events::Change;
use crate::manager::cache::{Entries, assign};
use crate::manager::core::ConfigManager;
use crate::storage::StorageBackend;
use crate::values::{self, ConfigValue, EnumValue, IsoDuration};

use log::{error, info, warn};
use serde_json::{Map, Value};
use time::OffsetDateTime;

impl<S: StorageBackend> ConfigManager<S> {
    fn spec(&self, key: &str) -> Result<&KeySpec> {
        self.registry
            .get(key)
            .ok_or_else(|| Error::InvalidKey(normalize_key(key)))
    }

    /// Run `f` under the cache lock, then notify listeners of what it wrote.
    fn with_entries<R>(&self, f: impl FnOnce(&mut Entries, &mut Vec<Change>) -> R) -> R {
        let mut changes = Vec::new();
        let result = {
            let mut entries = self.cache.lock();
            f(&mut entries, &mut changes)
        };
        self.events.dispatch(changes);
        result
    }

    /// Get a value in its coerced form.
    ///
    /// A key missing from the cache is filled with a copy of its default.
    ///
    /// # Side effects
    ///
    /// This read can write. A stored value that does not coerce is logged and
    /// reset to the default, and the default's coerced form is returned.
    /// A legacy ID mapping holding numeric IDs is rewritten with string IDs.
    /// Either write notifies change listeners once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for an unrecognized key, or
    /// [`Error::InvalidDefault`] if the key's own default fails to coerce.
    pub fn get(&self, key: &str) -> Result<ConfigValue> {
        let spec = self.spec(key)?;
        self.with_entries(|entries, changes| {
            let raw = entries
                .entry(spec.name.to_string())
                .or_insert_with(|| spec.default_value())
                .clone();

            match values::coerce(spec.kind, &raw) {
                Some(ConfigValue::Mapping(migrated)) => {
                    let rewritten = Value::Object(migrated.clone());
                    if rewritten != raw {
                        info!("Setting {}.", spec.name);
                        assign(entries, spec.name, rewritten, &spec.default, changes);
                    }
                    Ok(ConfigValue::Mapping(migrated))
                }
                Some(value) => Ok(value),
                None => {
                    log_coercion_failure(spec, &raw);
                    let default = reset(entries, spec, changes);
                    values::coerce(spec.kind, &default)
                        .ok_or_else(|| Error::InvalidDefault(spec.name.to_string()))
                }
            }
        })
    }

    /// Get a value in its coerced form without touching the cache.
    ///
    /// Falls back to the coerced default when the stored value does not
    /// coerce. Legacy ID mappings are returned migrated but not written back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for an unrecognized key, or
    /// [`Error::InvalidDefault`] if the key's own default fails to coerce.
    pub fn try_get(&self, key: &str) -> Result<ConfigValue> {
        let spec = self.spec(key)?;
        let raw = self
            .cache
            .lock()
            .get(spec.name)
            .cloned()
            .unwrap_or_else(|| spec.default_value());

        values::coerce(spec.kind, &raw)
            .or_else(|| values::coerce(spec.kind, &spec.default))
            .ok_or_else(|| Error::InvalidDefault(spec.name.to_string()))
    }

    /// Get the raw cached value, bypassing coercion.
    ///
    /// A key missing from the cache is filled with a copy of its default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for an unrecognized key.
    pub fn get_raw(&self, key: &str) -> Result<Value> {
        let spec = self.spec(key)?;
        Ok(self
            .cache
            .lock()
            .entry(spec.name.to_string())
            .or_insert_with(|| spec.default_value())
            .clone())
    }

    /// Validate, normalize and store a value.
    ///
    /// | Kind | Accepted input | Stored as |
    /// |------|----------------|-----------|
    /// | Color | 3/6-digit hex, optional `#`, or a color name | `"#rrggbb"` |
    /// | Duration | ISO-8601 or a relative time like `"2 hours"` | ISO-8601 string |
    /// | Boolean | bool, `0`/`1`, yes/no words | bool |
    /// | Enum | member, primitive or null | primitive |
    ///
    /// Other keys are stored unchanged. Registered validators then see the
    /// normalized value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for an unrecognized key or
    /// [`Error::InvalidValue`] if the input is rejected. The cache is
    /// unchanged on error.
    pub fn set(&self, key: &str, item: impl Into<Value>) -> Result<()> {
        let spec = self.spec(key)?;
        let value = values::normalize(spec.kind, item.into(), OffsetDateTime::now_utc())
            .map_err(|reason| Error::invalid_value(spec.name, reason))?;

        self.events
            .validate(spec.name, &value)
            .map_err(|reason| Error::invalid_value(spec.name, reason))?;

        self.commit(spec, value);
        Ok(())
    }

    /// Store a value without coercion or validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for an unrecognized key.
    pub fn set_raw(&self, key: &str, item: impl Into<Value>) -> Result<()> {
        let spec = self.spec(key)?;
        self.commit(spec, item.into());
        Ok(())
    }

    fn commit(&self, spec: &KeySpec, value: Value) {
        info!("Setting {}.", spec.name);
        self.with_entries(|entries, changes| {
            assign(entries, spec.name, value, &spec.default, changes);
        });
    }

    /// Reset a key to a fresh copy of its default and return it.
    ///
    /// The key is always present in the cache afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for an unrecognized key.
    pub fn remove(&self, key: &str) -> Result<Value> {
        let spec = self.spec(key)?;
        Ok(self.with_entries(|entries, changes| reset(entries, spec, changes)))
    }

    /// Snapshot of every cached entry in raw form
    pub fn items(&self) -> Map<String, Value> {
        self.cache.snapshot()
    }

    // =========================================================================
    // Typed Getters
    // =========================================================================

    /// Get a color key as its 24-bit code
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the key is not a color.
    pub fn get_color(&self, key: &str) -> Result<u32> {
        self.expect_kind(key, "Color", |kind| kind == CoercionKind::Color)?;
        Ok(self.get(key)?.as_color().unwrap_or_default())
    }

    /// Get a duration key
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the key is not a duration.
    pub fn get_duration(&self, key: &str) -> Result<IsoDuration> {
        self.expect_kind(key, "Duration", |kind| kind == CoercionKind::Duration)?;
        Ok(self
            .get(key)?
            .as_duration()
            .copied()
            .unwrap_or_default())
    }

    /// Get a boolean key
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the key is not a boolean.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.expect_kind(key, "Boolean", |kind| kind == CoercionKind::Boolean)?;
        Ok(self.get(key)?.as_bool().unwrap_or_default())
    }

    /// Get an enum key; `None` when unset
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the key is not an enum.
    pub fn get_enum(&self, key: &str) -> Result<Option<EnumValue>> {
        self.expect_kind(key, "Enum", |kind| matches!(kind, CoercionKind::Enum(_)))?;
        Ok(self.get(key)?.as_enum())
    }

    fn expect_kind(
        &self,
        key: &str,
        expected: &str,
        matches: impl Fn(CoercionKind) -> bool,
    ) -> Result<()> {
        let spec = self.spec(key)?;
        if matches(spec.kind) {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                key: spec.name.to_string(),
                expected: expected.to_string(),
                actual: spec.kind.name().to_string(),
            })
        }
    }
}

/// Replace the entry with a fresh copy of the default
fn reset(entries: &mut Entries, spec: &KeySpec, changes: &mut Vec<Change>) -> Value {
    info!("Removing {}.", spec.name);
    let default = spec.default_value();
    assign(entries, spec.name, default.clone(), &spec.default, changes);
    default
}

fn log_coercion_failure(spec: &KeySpec, raw: &Value) {
    match spec.kind {
        CoercionKind::Color => error!("Invalid {} provided.", spec.name),
        CoercionKind::Duration => warn!(
            "The {} must be an ISO-8601 duration formatted duration, not {raw}.",
            spec.name
        ),
        CoercionKind::Enum(_) => warn!("Invalid {} {raw}.", spec.name),
        CoercionKind::LegacyIdList => warn!("Invalid {} mapping {raw}.", spec.name),
        CoercionKind::Boolean | CoercionKind::Plain => {}
    }
}
