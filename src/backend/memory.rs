//! In-memory persistence backend for testing and embedding

use super::ConfigBackend;
use crate::error::{Error, Result};
use crate::sync::RwLockExt;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory key/value store (not persisted)
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: RwLock<Map<String, Value>>,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty memory backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory backend holding `data`
    #[must_use]
    pub fn with_data(data: Map<String, Value>) -> Self {
        Self {
            store: RwLock::new(data),
            ..Self::default()
        }
    }

    /// Overwrite one stored entry without counting it as a write
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.store.write_recovered().insert(key.into(), value);
    }

    /// Copy of the stored set
    pub fn snapshot(&self) -> Map<String, Value> {
        self.store.read_recovered().clone()
    }

    /// Number of successful `replace_all` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with [`Error::Backend`]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Backend("memory backend is unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigBackend for MemoryBackend {
    async fn fetch_all(&self) -> Result<Map<String, Value>> {
        self.check()?;
        Ok(self.snapshot())
    }

    async fn replace_all(&self, data: Map<String, Value>) -> Result<()> {
        self.check()?;
        *self.store.write_recovered() = data;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

// =============================================================================
// Tests
// =============================================================================
