//! Error types for modmail-config

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the configuration store
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Key / Value Errors
    // -------------------------------------------------------------------------
    #[error("Configuration \"{0}\" is invalid.")]
    InvalidKey(String),

    #[error("Invalid value for \"{key}\": {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Default value for \"{0}\" does not pass its own coercion")]
    InvalidDefault(String),

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    // -------------------------------------------------------------------------
    // I/O and Parsing Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration record: {0}")]
    Parse(String),

    #[error("Failed to load env file: {0}")]
    EnvFile(String),

    // -------------------------------------------------------------------------
    // Persistence Collaborator Errors
    // -------------------------------------------------------------------------
    #[error("Config backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Shorthand for an [`Error::InvalidValue`]
    pub(crate) fn invalid_value(key: &str, reason: impl Into<String>) -> Self {
        Error::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error rejected a key or a value supplied by the caller
    #[must_use]
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Error::InvalidKey(_) | Error::InvalidValue { .. })
    }

    /// Check if this error came from reading the local configuration files
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. } | Error::Parse(_) | Error::EnvFile(_)
        )
    }
}
