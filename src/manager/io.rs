//! Startup population of the cache from local sources

use crate::error::Result;
use crate::manager::cache::Entries;
use crate::manager::core::ConfigManager;
use crate::storage::StorageBackend;
use crate::sync::RwLockExt;

use log::{debug, error};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Human-readable documentation for one key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpEntry {
    /// How the default should be presented to users
    pub default: Option<String>,
    /// What the key controls
    pub description: String,
    /// Example commands
    pub examples: Vec<String>,
    /// Caveats and related keys
    pub notes: Vec<String>,
    /// Illustration URL
    pub image: Option<String>,
    /// Thumbnail URL
    pub thumbnail: Option<String>,
}

impl<S: StorageBackend> ConfigManager<S> {
    /// Rebuild the cache from local sources and return a snapshot of it.
    ///
    /// Precedence, lowest first: defaults, the dotenv file, the process
    /// environment, the override file. Only recognized keys are taken from
    /// each source. A malformed override file is logged and skipped so
    /// startup always continues. The help file, when configured, is loaded
    /// and kept sorted by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured help file cannot be read or parsed.
    pub fn populate_cache(&self) -> Result<Map<String, Value>> {
        let mut data: Entries = self.registry.defaults().into_iter().collect();

        for (key, value) in self.env_handler.overrides(&self.registry) {
            data.insert(key, Value::String(value));
        }

        let override_path = self.config.override_path();
        if override_path.exists() {
            debug!("Loading envs from {}.", override_path.display());
            match self.config.storage.read::<Map<String, Value>>(&override_path) {
                Ok(record) => {
                    for (key, value) in record {
                        if let Some(spec) = self.registry.get(&key) {
                            data.insert(spec.name.to_string(), value);
                        }
                    }
                }
                Err(e) => error!(
                    "Failed to load {} env values: {e}",
                    override_path.display()
                ),
            }
        }

        self.cache.replace(data);

        if let Some(help_path) = self.config.help_path() {
            self.load_help(&help_path)?;
        }

        Ok(self.cache.snapshot())
    }

    fn load_help(&self, path: &Path) -> Result<()> {
        let entries: BTreeMap<String, HelpEntry> = self.config.storage.read(path)?;
        debug!("Loaded {} help entries from {}", entries.len(), path.display());
        *self.help.write_recovered() = entries
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Ok(())
    }

    /// Help text for a key (case-insensitive)
    pub fn help(&self, key: &str) -> Option<HelpEntry> {
        self.help.read_recovered().get(&key.to_lowercase()).cloned()
    }

    /// All help entries, sorted by key
    pub fn help_entries(&self) -> BTreeMap<String, HelpEntry> {
        self.help.read_recovered().clone()
    }
}
