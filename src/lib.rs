//! # modmail-config - Typed configuration store for a Modmail bot
//!
//! An in-memory cache of the bot's configuration keys, seeded from built-in
//! defaults, env vars, a local override file and a remote database, with
//! per-key coercion on every read and validation on every write.
//!
//! ## Features
//!
//! - **Key Registry**: Every key has a visibility tier (public, private,
//!   protected) and a coercion kind (color, duration, boolean, enum, legacy
//!   ID mapping, plain)
//! - **Layered Population**: defaults < `.env` < process env < `config.json`
//!   < remote store
//! - **Typed Reads**: Colors become `u32`, durations become [`IsoDuration`],
//!   yes/no strings become `bool`, enum primitives become members
//! - **Strict Writes**: Colors accept hex or names, durations accept ISO-8601
//!   or "2 hours", booleans accept yes/no words
//! - **Self-Healing**: A corrupt stored value is reset to its default on read
//! - **Remote Sync**: [`ConfigBackend`] with a one-shot readiness signal
//! - **Change Events**: Listeners and validators per key
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modmail_config::{ConfigManager, MemoryBackend};
//! use std::sync::Arc;
//!
//! # async fn run() -> modmail_config::Result<()> {
//! let manager = ConfigManager::builder()
//!     .root_dir("~/modmail")
//!     .help_file("core/config_help.json")
//!     .backend(Arc::new(MemoryBackend::new()))
//!     .build();
//!
//! manager.populate_cache()?;
//! manager.refresh().await?;
//!
//! manager.set("main_color", "Blurple")?;
//! assert_eq!(manager.get_color("main_color")?, 0x5865F2);
//!
//! manager.set("thread_auto_close", "2 hours")?;
//! manager.update().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Read Side Effects
//!
//! [`ConfigManager::get`] repairs what it reads:
//!
//! - A stored value that does not coerce is logged and **reset to its
//!   default**, and the default's coerced form is returned
//! - A `command_permissions` / `level_permissions` mapping that still holds
//!   numeric IDs is **rewritten with string IDs** (the `-1` sentinel stays
//!   numeric)
//!
//! Both are ordinary writes: change listeners fire once and the next
//! [`ConfigManager::update`] persists them. Use [`ConfigManager::try_get`]
//! for a read that never writes, or [`ConfigManager::get_raw`] to skip
//! coercion entirely.
//!
//! ## Filtering
//!
//! ```rust
//! use modmail_config::{filter_default, filter_valid, KeyRegistry};
//! use serde_json::json;
//!
//! let registry = KeyRegistry::builtin();
//! let data = json!({"prefix": "!", "user_typing": true, "token": "secret"});
//! let data = data.as_object().unwrap();
//!
//! // Only values that differ from their defaults
//! let changed = filter_default(registry, data);
//! assert!(changed.contains_key("prefix") && !changed.contains_key("user_typing"));
//!
//! // Never protected keys
//! assert!(!filter_valid(registry, data).contains_key("token"));
//! ```

mod backend;
mod docs;
mod error;
mod events;
mod manager;
pub mod storage;
mod sync;

pub mod config;
pub mod values;

pub use backend::{ConfigBackend, MemoryBackend};
pub use config::{
    CoercionKind, DefaultEnvSource, EnvSource, KeyRegistry, KeySpec, MapEnvSource, StoreConfig,
    StoreConfigBuilder, Tier, filter_default, filter_valid,
};
pub use docs::{DocsConfig, generate_docs};
pub use error::{Error, Result};
pub use events::EventManager;
pub use manager::{ConfigManager, ConfigManagerBuilder, HelpEntry};
pub use storage::{JsonStorage, StorageBackend};
pub use values::{
    ActivityType, ConfigValue, DmDisabled, EnumKind, EnumValue, IsoDuration, Status,
};

#[cfg(feature = "toml")]
pub use storage::TomlStorage;

#[cfg(feature = "yaml")]
pub use storage::YamlStorage;
