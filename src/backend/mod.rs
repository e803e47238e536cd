//! Remote persistence collaborator
//!
//! The store never talks to a database directly. It fetches the full
//! key/value set through [`ConfigBackend::fetch_all`] on refresh and pushes
//! the non-default subset through [`ConfigBackend::replace_all`] on update.

mod memory;

pub use memory::MemoryBackend;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Key/value persistence service
///
/// Errors are returned to the caller of `refresh`/`update` unchanged.
#[async_trait]
pub trait ConfigBackend: Send + Sync {
    /// Fetch every stored key/value pair.
    async fn fetch_all(&self) -> Result<Map<String, Value>>;

    /// Replace the stored set with `data`.
    async fn replace_all(&self, data: Map<String, Value>) -> Result<()>;

    /// Name used in log messages
    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
