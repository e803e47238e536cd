//! Storage backend trait and implementations
//!
//! The store only ever reads local records (the override file and the help
//! file); writes go to the remote [`ConfigBackend`](crate::ConfigBackend).

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Trait for local file formats
///
/// This allows swapping JSON for TOML or YAML.
pub trait StorageBackend: Clone + Send + Sync {
    /// File extension for this storage format (e.g., "json", "toml")
    fn extension(&self) -> &str;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        self.deserialize(&content)
    }
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStorage;

impl JsonStorage {
    /// Create a new JSON storage backend
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// TOML Storage Implementation
// =============================================================================

/// TOML storage backend
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlStorage;

#[cfg(feature = "toml")]
impl TomlStorage {
    /// Create a new TOML storage backend
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "toml")]
impl StorageBackend for TomlStorage {
    fn extension(&self) -> &str {
        "toml"
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// YAML Storage Implementation
// =============================================================================

/// YAML storage backend
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlStorage;

#[cfg(feature = "yaml")]
impl YamlStorage {
    /// Create a new YAML storage backend
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "yaml")]
impl StorageBackend for YamlStorage {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};
    use tempfile::tempdir;

    #[test]
    fn test_json_read_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r##"{"PREFIX": "!", "main_color": "#ffffff"}"##).unwrap();

        let record: Map<String, Value> = JsonStorage::new().read(&path).unwrap();
        assert_eq!(record["PREFIX"], json!("!"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_json_malformed() {
        let result: Result<Map<String, Value>> = JsonStorage::new().deserialize("{not json");
        assert!(matches!(result.unwrap_err(), Error::Parse(_)));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result: Result<Map<String, Value>> =
            JsonStorage::new().read(Path::new("/nonexistent/config.json"));

        assert!(matches!(result.unwrap_err(), Error::FileRead { .. }));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_read_record() {
        let record: Map<String, Value> = TomlStorage::new()
            .deserialize("prefix = \"!\"\nuser_typing = false\n")
            .unwrap();
        assert_eq!(record["user_typing"], json!(false));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_read_record() {
        let record: Map<String, Value> = YamlStorage::new()
            .deserialize("prefix: \"!\"\nplugins: []\n")
            .unwrap();
        assert_eq!(record["plugins"], json!([]));
    }
}
