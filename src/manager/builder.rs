//! Builder for ConfigManager
//!
//! This module contains [`ConfigManagerBuilder`] which provides a fluent API
//! for creating a [`ConfigManager`](super::ConfigManager).

use crate::backend::{ConfigBackend, MemoryBackend};
use crate::config::{EnvSource, KeyRegistry, StoreConfigBuilder};
use crate::storage::JsonStorage;
use std::path::PathBuf;
use std::sync::Arc;

use super::ConfigManager;

/// Builder for creating a [`ConfigManager`] with a fluent API.
///
/// # Example
///
/// ```rust,no_run
/// use modmail_config::{ConfigManager, MemoryBackend};
/// use std::sync::Arc;
///
/// let manager = ConfigManager::builder()
///     .root_dir("~/modmail")
///     .help_file("core/config_help.json")
///     .backend(Arc::new(MemoryBackend::new()))
///     .build();
/// manager.populate_cache()?;
/// # Ok::<(), modmail_config::Error>(())
/// ```
pub struct ConfigManagerBuilder {
    config_builder: StoreConfigBuilder,
    backend: Option<Arc<dyn ConfigBackend>>,
    registry: Option<KeyRegistry>,
}

impl ConfigManagerBuilder {
    /// Create a new builder with the stock file names.
    pub fn new() -> Self {
        Self {
            config_builder: StoreConfigBuilder::new(),
            backend: None,
            registry: None,
        }
    }

    /// Set the application root directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.root_dir(path);
        self
    }

    /// Set the override file (default: "config.json").
    pub fn override_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.override_file(path);
        self
    }

    /// Load help text from this file.
    pub fn help_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.help_file(path);
        self
    }

    /// Set the dotenv file (default: ".env").
    pub fn dotenv_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.dotenv_file(path);
        self
    }

    /// Do not read a dotenv file.
    pub fn without_dotenv(mut self) -> Self {
        self.config_builder = self.config_builder.without_dotenv();
        self
    }

    /// Read environment variables from a custom source.
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.config_builder = self.config_builder.env_source(source);
        self
    }

    /// Sync against this persistence service.
    pub fn backend(mut self, backend: Arc<dyn ConfigBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Use a custom key table instead of the built-in one.
    pub fn registry(mut self, registry: KeyRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the [`ConfigManager`].
    ///
    /// The cache starts empty; call
    /// [`populate_cache`](ConfigManager::populate_cache) next.
    pub fn build(self) -> ConfigManager<JsonStorage> {
        let config = self.config_builder.build();
        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(MemoryBackend::new()));
        let registry = self
            .registry
            .unwrap_or_else(|| KeyRegistry::builtin().clone());

        ConfigManager::with_registry(config, backend, registry)
    }
}

impl Default for ConfigManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
