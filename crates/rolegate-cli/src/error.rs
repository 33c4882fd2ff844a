//! Error types for rolegate-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for rolegate-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rolegate-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from rolegate-core
    #[error("Core error: {0}")]
    Core(#[from] rolegate_core::Error),

    /// Error from rolegate-credentials
    #[error("Credential error: {0}")]
    Credentials(#[from] rolegate_credentials::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates an I/O error for `path`.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
