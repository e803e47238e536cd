//! Common test utilities for modmail-config integration tests
//!
//! Provides a store rooted in a temporary directory with a fake environment
//! and an in-memory persistence backend.

#![allow(dead_code)]

use modmail_config::{ConfigManager, MapEnvSource, MemoryBackend};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Test fixture that owns a temporary root directory and a configured store
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub backend: Arc<MemoryBackend>,
    pub manager: ConfigManager,
}

impl TestFixture {
    /// Create a fixture with no environment and an empty backend
    pub fn new() -> Self {
        Self::with_env(MapEnvSource::new())
    }

    /// Create a fixture that reads the given fake environment
    pub fn with_env(env: MapEnvSource) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self::in_dir(temp_dir, env)
    }

    /// Create a fixture over a directory that may already hold files
    pub fn in_dir(temp_dir: TempDir, env: MapEnvSource) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let backend = Arc::new(MemoryBackend::new());
        let manager = ConfigManager::builder()
            .root_dir(temp_dir.path())
            .env_source(env)
            .backend(backend.clone())
            .build();

        Self {
            temp_dir,
            backend,
            manager,
        }
    }

    /// Create a fixture and populate its cache
    pub fn populated() -> Self {
        let fixture = Self::new();
        fixture
            .manager
            .populate_cache()
            .expect("Failed to populate cache");
        fixture
    }

    /// Get the root directory path
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write a file under a fresh temp dir and return the dir
pub fn dir_with(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).expect("Failed to write file");
    }
    dir
}

/// Record every change event the store emits
pub fn record_changes(manager: &ConfigManager) -> Arc<Mutex<Vec<(String, Value, Value)>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    manager.events().on_change(move |key, old, new| {
        sink.lock()
            .unwrap()
            .push((key.to_string(), old.clone(), new.clone()));
    });
    log
}

/// Count change events for one key
pub fn count_changes(manager: &ConfigManager, key: &str) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = counter.clone();
    manager.events().watch(key, move |_, _, _| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    counter
}
