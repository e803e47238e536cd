use crate::backend::ConfigBackend;
use crate::config::{KeyRegistry, StoreConfig};
use crate::events::EventManager;
use crate::manager::cache::ConfigCache;
use crate::manager::env::EnvironmentHandler;
use crate::manager::io::HelpEntry;
use crate::storage::{JsonStorage, StorageBackend};

use log::info;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

/// Typed configuration store for the Modmail bot.
///
/// The `ConfigManager` owns the process-wide configuration cache:
///
/// - **Population**: defaults, then `.env` and process env vars, then the
///   local override file ([`populate_cache`](Self::populate_cache))
/// - **Remote sync**: overlay from and push to a [`ConfigBackend`]
///   ([`refresh`](Self::refresh), [`update`](Self::update))
/// - **Typed access**: per-key coercion on [`get`](Self::get), validation
///   and normalization on [`set`](Self::set)
/// - **Change Events**: callbacks for every committed write
///
/// Reads are self-healing. A stored value that no longer coerces is logged
/// and reset to its default, which is a write and notifies listeners.
///
/// # Example
///
/// ```rust
/// use modmail_config::{ConfigManager, MapEnvSource, MemoryBackend, StoreConfig};
/// use std::sync::Arc;
///
/// let config = StoreConfig::builder()
///     .root_dir(std::env::temp_dir())
///     .override_file("no-such-override.json")
///     .without_dotenv()
///     .env_source(MapEnvSource::new().with("PREFIX", "!"))
///     .build();
///
/// let manager = ConfigManager::new(config, Arc::new(MemoryBackend::new()));
/// manager.populate_cache()?;
/// assert_eq!(manager.get("prefix")?.as_str(), Some("!"));
/// # Ok::<(), modmail_config::Error>(())
/// ```
pub struct ConfigManager<S: StorageBackend = JsonStorage> {
    /// Configuration
    pub(crate) config: StoreConfig<S>,

    /// Recognized keys
    pub(crate) registry: Arc<KeyRegistry>,

    /// Remote persistence service
    pub(crate) backend: Arc<dyn ConfigBackend>,

    /// Key/value cache
    pub(crate) cache: ConfigCache,

    /// Event manager for change callbacks and validation
    pub(crate) events: Arc<EventManager>,

    /// Environment variable handler
    pub(crate) env_handler: EnvironmentHandler,

    /// Help text, sorted by key
    pub(crate) help: RwLock<BTreeMap<String, HelpEntry>>,

    /// Flipped once, on the first successful refresh
    pub(crate) ready: watch::Sender<bool>,
}

impl<S: StorageBackend> ConfigManager<S> {
    /// Create a store over the built-in key table.
    ///
    /// The cache starts empty. Call [`populate_cache`](Self::populate_cache)
    /// before serving reads that should see env or file overrides.
    pub fn new(config: StoreConfig<S>, backend: Arc<dyn ConfigBackend>) -> Self {
        Self::with_registry(config, backend, KeyRegistry::builtin().clone())
    }

    /// Create a store over a custom key table
    pub fn with_registry(
        config: StoreConfig<S>,
        backend: Arc<dyn ConfigBackend>,
        registry: KeyRegistry,
    ) -> Self {
        let env_handler = EnvironmentHandler::new(config.env_source.clone(), config.dotenv_path());
        let (ready, _) = watch::channel(false);

        info!(
            "Initialized ConfigManager at {:?} with {} backend ({} keys)",
            config.root_dir.display(),
            backend.backend_name(),
            registry.len()
        );

        Self {
            config,
            registry: Arc::new(registry),
            backend,
            cache: ConfigCache::new(),
            events: Arc::new(EventManager::new()),
            env_handler,
            help: RwLock::new(BTreeMap::new()),
            ready,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig<S> {
        &self.config
    }

    /// Get the key registry
    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Get the event manager for registering change listeners and validators
    ///
    /// # Example
    ///
    /// ```
    /// # use modmail_config::*;
    /// # use serde_json::Value;
    /// # let manager = ConfigManager::builder().without_dotenv().build();
    /// // Watch all changes
    /// manager.events().on_change(|key, old, new| {
    ///     println!("Changed {}: {:?} -> {:?}", key, old, new);
    /// });
    ///
    /// // Watch specific key
    /// manager.events().watch("prefix", |_key, _old, new| {
    ///     println!("Prefix changed to: {:?}", new);
    /// });
    ///
    /// // Add validator
    /// manager.events().add_validator("prefix", |v: &Value| {
    ///     if v.as_str().is_some_and(|s| !s.is_empty()) {
    ///         Ok(())
    ///     } else {
    ///         Err("Prefix cannot be empty".into())
    ///     }
    /// });
    /// ```
    pub fn events(&self) -> &Arc<EventManager> {
        &self.events
    }
}

impl ConfigManager {
    /// Create a builder for `ConfigManager` with a fluent API.
    ///
    /// Without an explicit backend the store syncs against an in-memory
    /// [`MemoryBackend`](crate::MemoryBackend).
    pub fn builder() -> crate::manager::ConfigManagerBuilder {
        crate::manager::ConfigManagerBuilder::new()
    }
}

impl<S: StorageBackend> fmt::Debug for ConfigManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.cache, f)
    }
}
