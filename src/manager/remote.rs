//! Synchronization with the remote persistence service

use crate::config::filter_default;
use crate::error::Result;
use crate::manager::cache::assign;
use crate::manager::core::ConfigManager;
use crate::storage::StorageBackend;

use log::debug;
use serde_json::{Map, Value};

impl<S: StorageBackend> ConfigManager<S> {
    /// Overlay the cache with everything the backend holds.
    ///
    /// Recognized keys (case-insensitive) overwrite their cache entries;
    /// anything else is ignored. The first successful refresh marks the store
    /// ready. Later refreshes still update values but never signal again.
    ///
    /// # Errors
    ///
    /// Backend errors are returned unchanged and leave the cache and the
    /// readiness signal untouched.
    pub async fn refresh(&self) -> Result<Map<String, Value>> {
        let fetched = self.backend.fetch_all().await?;

        let mut changes = Vec::new();
        {
            let mut entries = self.cache.lock();
            for (key, value) in fetched {
                if let Some(spec) = self.registry.get(&key) {
                    assign(&mut entries, spec.name, value, &spec.default, &mut changes);
                }
            }
        }
        self.events.dispatch(changes);

        let first = self.ready.send_if_modified(|ready| !std::mem::replace(ready, true));
        if first {
            debug!("Successfully fetched configurations from database.");
        }

        Ok(self.cache.snapshot())
    }

    /// Push every non-default cached entry to the backend.
    ///
    /// # Errors
    ///
    /// Backend errors are returned unchanged.
    pub async fn update(&self) -> Result<()> {
        let data = filter_default(&self.registry, &self.cache.snapshot());
        debug!(
            "Pushing {} configuration entries to {}.",
            data.len(),
            self.backend.backend_name()
        );
        self.backend.replace_all(data).await
    }

    /// Wait until the first successful [`refresh`](Self::refresh).
    ///
    /// Returns immediately if that already happened. Never times out; wrap
    /// in `tokio::time::timeout` if needed.
    pub async fn wait_until_ready(&self) {
        let mut ready = self.ready.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting.
        let _ = ready.wait_for(|ready| *ready).await;
    }

    /// Check if a refresh has succeeded at least once
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }
}
