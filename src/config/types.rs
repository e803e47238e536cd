//! Construction-time configuration of the store

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::storage::{JsonStorage, StorageBackend};

// =============================================================================
// Environment Sources
// =============================================================================

/// Source of environment variables
///
/// Abstracted so tests can inject variables without touching the process
/// environment.
pub trait EnvSource: Send + Sync {
    /// All variables as `(name, value)` pairs
    fn vars(&self) -> Vec<(String, String)>;
}

/// Reads the process environment. Variables that are not valid unicode are
/// skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// Fixed set of variables
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnvSource {
    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Configuration for initializing the [`ConfigManager`](crate::ConfigManager)
pub struct StoreConfig<S: StorageBackend = JsonStorage> {
    /// Application root; relative file names resolve against it
    pub root_dir: PathBuf,

    /// Local override file (e.g., "config.json")
    pub override_file: PathBuf,

    /// Help text record, if any
    pub help_file: Option<PathBuf>,

    /// Dotenv file, if any. Its variables rank below the process environment.
    pub dotenv_file: Option<PathBuf>,

    /// Where environment variables come from
    pub env_source: Arc<dyn EnvSource>,

    /// Parser for the override and help files
    pub storage: S,
}

impl<S: StorageBackend> fmt::Debug for StoreConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("root_dir", &self.root_dir)
            .field("override_file", &self.override_file)
            .field("help_file", &self.help_file)
            .field("dotenv_file", &self.dotenv_file)
            .field("storage", &self.storage.extension())
            .finish_non_exhaustive()
    }
}

impl Default for StoreConfig<JsonStorage> {
    fn default() -> Self {
        StoreConfigBuilder::new().build()
    }
}

impl<S: StorageBackend> StoreConfig<S> {
    /// Full path to the override file
    pub fn override_path(&self) -> PathBuf {
        self.resolve(&self.override_file)
    }

    /// Full path to the help file
    pub fn help_path(&self) -> Option<PathBuf> {
        self.help_file.as_deref().map(|p| self.resolve(p))
    }

    /// Full path to the dotenv file
    pub fn dotenv_path(&self) -> Option<PathBuf> {
        self.dotenv_file.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root_dir.join(path)
    }
}

impl StoreConfig<JsonStorage> {
    /// Create a new builder for StoreConfig
    ///
    /// # Example
    /// ```rust
    /// use modmail_config::StoreConfig;
    ///
    /// let config = StoreConfig::builder()
    ///     .root_dir("~/modmail")
    ///     .help_file("core/config_help.json")
    ///     .build();
    /// ```
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }
}

/// Builder for creating StoreConfig with a fluent API
#[derive(Clone)]
pub struct StoreConfigBuilder {
    root_dir: Option<PathBuf>,
    override_file: PathBuf,
    help_file: Option<PathBuf>,
    dotenv_file: Option<PathBuf>,
    env_source: Arc<dyn EnvSource>,
}

impl fmt::Debug for StoreConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfigBuilder")
            .field("root_dir", &self.root_dir)
            .field("override_file", &self.override_file)
            .field("help_file", &self.help_file)
            .field("dotenv_file", &self.dotenv_file)
            .finish_non_exhaustive()
    }
}

impl Default for StoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreConfigBuilder {
    /// Create a builder with the stock file names
    pub fn new() -> Self {
        Self {
            root_dir: None,
            override_file: PathBuf::from("config.json"),
            help_file: None,
            dotenv_file: Some(PathBuf::from(".env")),
            env_source: Arc::new(DefaultEnvSource),
        }
    }

    /// Set the application root directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = match (path.strip_prefix("~"), dirs::home_dir()) {
            (Ok(rest), Some(home)) => home.join(rest),
            _ => path,
        };
        self.root_dir = Some(expanded);
        self
    }

    /// Set the override file (default: "config.json")
    pub fn override_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_file = path.into();
        self
    }

    /// Load help text from this file
    pub fn help_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.help_file = Some(path.into());
        self
    }

    /// Set the dotenv file (default: ".env")
    pub fn dotenv_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_file = Some(path.into());
        self
    }

    /// Do not read a dotenv file
    pub fn without_dotenv(mut self) -> Self {
        self.dotenv_file = None;
        self
    }

    /// Read environment variables from a custom source
    ///
    /// # Example
    /// ```rust
    /// use modmail_config::{MapEnvSource, StoreConfig};
    ///
    /// let config = StoreConfig::builder()
    ///     .env_source(MapEnvSource::new().with("PREFIX", "!"))
    ///     .build();
    /// ```
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.env_source = Arc::new(source);
        self
    }

    /// Build the StoreConfig with JSON files
    ///
    /// If `root_dir` is not set, uses the current directory.
    pub fn build(self) -> StoreConfig<JsonStorage> {
        self.build_with_storage(JsonStorage::new())
    }

    /// Build the StoreConfig with a custom file format
    pub fn build_with_storage<S: StorageBackend>(self, storage: S) -> StoreConfig<S> {
        StoreConfig {
            root_dir: self.root_dir.unwrap_or_else(|| PathBuf::from(".")),
            override_file: self.override_file,
            help_file: self.help_file,
            dotenv_file: self.dotenv_file,
            env_source: self.env_source,
            storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = StoreConfig::builder().build();

        assert_eq!(config.root_dir, PathBuf::from("."));
        assert_eq!(config.override_path(), PathBuf::from("./config.json"));
        assert_eq!(config.dotenv_path(), Some(PathBuf::from("./.env")));
        assert!(config.help_path().is_none());
    }

    #[test]
    fn test_builder_with_options() {
        let config = StoreConfig::builder()
            .root_dir("/srv/modmail")
            .override_file("override.json")
            .help_file("core/config_help.json")
            .without_dotenv()
            .build();

        assert_eq!(config.override_path(), PathBuf::from("/srv/modmail/override.json"));
        assert_eq!(
            config.help_path(),
            Some(PathBuf::from("/srv/modmail/core/config_help.json"))
        );
        assert!(config.dotenv_path().is_none());
    }

    #[test]
    fn test_root_dir_expands_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config = StoreConfig::builder().root_dir("~/modmail").build();
        assert_eq!(config.root_dir, home.join("modmail"));
    }

    #[test]
    fn test_map_env_source() {
        let source: MapEnvSource = [("PREFIX", "!")].into_iter().collect();
        assert_eq!(source.vars(), vec![("PREFIX".to_string(), "!".to_string())]);
    }
}
