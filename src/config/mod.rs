//! Store configuration and the key registry
//!
//! This module contains the foundational types for the configuration store:
//! - `StoreConfig` - Where the store reads its local files and env vars from
//! - `KeyRegistry` - Every recognized key with its tier, coercion kind and default
//! - `filter_valid` / `filter_default` - Projections used before persistence

mod defaults;
mod filter;
mod schema;
mod types;

pub use filter::{filter_default, filter_valid};
pub use schema::{CoercionKind, KeyRegistry, KeySpec, Tier, normalize_key};
pub use types::{DefaultEnvSource, EnvSource, MapEnvSource, StoreConfig, StoreConfigBuilder};
