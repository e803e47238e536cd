//! Main configuration manager module
//!
//! This module contains the [`ConfigManager`] struct which is the primary entry
//! point for reading and writing Modmail configuration.
//!
//! - `core` - struct definition and construction
//! - `io` - startup population from defaults, env vars and local files
//! - `operations` - typed and raw get/set/remove
//! - `remote` - refresh from and push to the persistence service
//! - `cache` / `env` - internal helpers

mod builder;
mod cache;
mod core;
mod env;
mod io;
mod operations;
mod remote;

pub use builder::ConfigManagerBuilder;
pub use core::ConfigManager;
pub use io::HelpEntry;
