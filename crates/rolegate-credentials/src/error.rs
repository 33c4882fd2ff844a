//! Error types for rolegate-credentials

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for rolegate-credentials operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or persisting credentials.
///
/// Every variant is fatal to bootstrap: continuing would either lose
/// existing passwords or regenerate them on the next start.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The credential file exists but does not hold a JSON object of strings.
    #[error("Credential file {} is corrupt: {source}", path.display())]
    PersistedStateCorrupt {
        /// Path to the credential file
        path: PathBuf,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// The credential file exists but could not be read.
    #[error("Failed to read credential file {}: {source}", path.display())]
    PersistedStateRead {
        /// Path to the credential file
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The reconciled store could not be written.
    #[error("Failed to write credential file {}: {source}", path.display())]
    PersistedStateWriteFailure {
        /// Path to the credential file
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// No credential directory is configured and none can be derived.
    #[error("Could not determine a credential directory; set {0}")]
    NoCredentialDirectory(&'static str),
}

impl Error {
    /// Creates a corrupt-state error for `path`.
    pub fn corrupt(path: &Path, source: serde_json::Error) -> Self {
        Error::PersistedStateCorrupt {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a read error for `path`.
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Error::PersistedStateRead {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a write error for `path`.
    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Error::PersistedStateWriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_display() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::corrupt(Path::new("/tmp/creds.json"), source);
        assert!(
            err.to_string()
                .starts_with("Credential file /tmp/creds.json is corrupt:")
        );
    }

    #[test]
    fn test_write_display() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::write(Path::new("/etc/creds.json"), source);
        assert_eq!(
            err.to_string(),
            "Failed to write credential file /etc/creds.json: denied"
        );
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
