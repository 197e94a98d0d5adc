//! Error types for migration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while migrating a legacy definition file.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The input is not a well-formed legacy definition.
    #[error("Failed to decode legacy definition: {0}")]
    Decode(String),

    /// An object name has no `:` separating domain from query.
    #[error("Object name '{object_name}' has no ':' between domain and query")]
    MissingDomain { object_name: String },

    /// The collection document could not be serialized.
    #[error("Failed to encode collection definition: {0}")]
    Encode(String),

    /// Definition files must be given as absolute paths.
    #[error("Invalid definition path {}: paths must be absolute", .0.display())]
    RelativePath(PathBuf),

    /// The derived output path is the input file itself.
    #[error("Output for {} would overwrite the input file", .0.display())]
    OverwritesInput(PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be loaded.
    #[error("Invalid settings: {0}")]
    Config(String),
}

impl MigrateError {
    /// Check if the error means the input did not match the legacy schema.
    pub fn is_decode(&self) -> bool {
        matches!(self, MigrateError::Decode(_) | MigrateError::MissingDomain { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrateError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for MigrateError {
    fn from(err: config::ConfigError) -> Self {
        MigrateError::Config(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = MigrateError> = std::result::Result<T, E>;
