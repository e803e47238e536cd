//! Change listeners and validators
//!
//! Listeners fire after a write has been committed to the cache and the cache
//! lock has been released, so a callback may read the store again. Keys are
//! case-folded on registration.

use crate::config::normalize_key;
use crate::sync::RwLockExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Type alias for a change callback receiving `(key, old_value, new_value)`
pub type ChangeCallback = Arc<dyn Fn(&str, &Value, &Value) + Send + Sync>;

/// Type alias for a validator function
pub type Validator = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// A committed cache write, queued until the cache lock is released
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Change {
    pub key: String,
    pub old: Value,
    pub new: Value,
}

/// Manages event listeners for configuration changes
#[derive(Default)]
pub struct EventManager {
    /// Called for every change
    global_listeners: RwLock<Vec<ChangeCallback>>,

    /// Called only for changes to one key
    key_listeners: RwLock<HashMap<String, Vec<ChangeCallback>>>,

    validators: RwLock<HashMap<String, Vec<Validator>>>,
}

impl EventManager {
    /// Create a new event manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every change
    pub fn on_change<F>(&self, callback: F)
    where
        F: Fn(&str, &Value, &Value) + Send + Sync + 'static,
    {
        self.global_listeners
            .write_recovered()
            .push(Arc::new(callback));
    }

    /// Register a listener for one key (e.g., "prefix")
    pub fn watch<F>(&self, key: &str, callback: F)
    where
        F: Fn(&str, &Value, &Value) + Send + Sync + 'static,
    {
        self.key_listeners
            .write_recovered()
            .entry(normalize_key(key))
            .or_default()
            .push(Arc::new(callback));
    }

    /// Register a validator for one key
    ///
    /// Validators see the normalized value a typed `set` is about to store.
    /// If any validator returns an error, the write is rejected.
    pub fn add_validator<F>(&self, key: &str, validator: F)
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators
            .write_recovered()
            .entry(normalize_key(key))
            .or_default()
            .push(Arc::new(validator));
    }

    /// Run every validator registered for `key`
    ///
    /// # Errors
    ///
    /// Returns the first validation error message.
    pub fn validate(&self, key: &str, value: &Value) -> Result<(), String> {
        // Clone out so a validator can register further validators.
        let validators = self
            .validators
            .read_recovered()
            .get(&normalize_key(key))
            .cloned()
            .unwrap_or_default();
        validators.iter().try_for_each(|validator| validator(value))
    }

    /// Notify listeners about a change
    pub fn notify(&self, key: &str, old_value: &Value, new_value: &Value) {
        let key = normalize_key(key);
        let mut callbacks: Vec<ChangeCallback> = self.global_listeners.read_recovered().clone();
        if let Some(listeners) = self.key_listeners.read_recovered().get(&key) {
            callbacks.extend(listeners.iter().cloned());
        }

        for callback in callbacks {
            callback(&key, old_value, new_value);
        }
    }

    /// Notify listeners about queued changes, in order
    pub(crate) fn dispatch(&self, changes: Vec<Change>) {
        for change in changes {
            self.notify(&change.key, &change.old, &change.new);
        }
    }

    /// Remove all listeners for a specific key
    pub fn unwatch(&self, key: &str) {
        self.key_listeners.write_recovered().remove(&normalize_key(key));
    }

    /// Clear all listeners
    pub fn clear(&self) {
        self.global_listeners.write_recovered().clear();
        self.key_listeners.write_recovered().clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
