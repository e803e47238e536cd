//! Environment variable handling
//!
//! Any variable whose lowercased name is a recognized key overlays that
//! key's default. Values are kept as raw strings; typing happens on read.

use crate::config::{EnvSource, KeyRegistry};
use crate::error::{Error, Result};
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Collects env overrides from a dotenv file and the process environment
pub(crate) struct EnvironmentHandler {
    source: Arc<dyn EnvSource>,
    dotenv: Option<PathBuf>,
}

impl EnvironmentHandler {
    pub fn new(source: Arc<dyn EnvSource>, dotenv: Option<PathBuf>) -> Self {
        Self { source, dotenv }
    }

    /// Overrides for recognized keys, lowest precedence first.
    ///
    /// Dotenv entries come before process variables so a real environment
    /// variable always wins. A malformed dotenv file is logged and skipped.
    pub fn overrides(&self, registry: &KeyRegistry) -> Vec<(String, String)> {
        let mut vars = match self.dotenv.as_deref().map(read_dotenv).transpose() {
            Ok(vars) => vars.unwrap_or_default(),
            Err(e) => {
                error!("Failed to load env file values: {e}");
                Vec::new()
            }
        };
        vars.extend(self.source.vars());

        vars.into_iter()
            .filter_map(|(name, value)| {
                let spec = registry.get(&name)?;
                Some((spec.name.to_string(), value))
            })
            .collect()
    }
}

/// Read a dotenv file. A missing file yields no variables.
fn read_dotenv(path: &Path) -> Result<Vec<(String, String)>> {
    let env_error = |e: dotenvy::Error| Error::EnvFile(format!("{}: {e}", path.display()));
    match dotenvy::from_path_iter(path) {
        Ok(iter) => {
            debug!("Loading envs from {}.", path.display());
            iter.map(|item| item.map_err(env_error)).collect()
        }
        Err(dotenvy::Error::Io(ref io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
            Ok(Vec::new())
        }
        Err(e) => Err(env_error(e)),
    }
}
