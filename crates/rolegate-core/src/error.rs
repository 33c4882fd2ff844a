//! Error types for rolegate-core

use thiserror::Error;

/// Result type alias for rolegate-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rolegate-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A role name does not match any role in the hierarchy.
    ///
    /// The decision engine never surfaces this; it turns it into a deny.
    #[error("Unknown role: '{name}'")]
    UnknownRole {
        /// The role name as supplied
        name: String,
    },

    /// A resource policy would grant read access to fewer roles than write access.
    #[error("Invalid policy: {message}")]
    InvalidPolicy {
        /// What is wrong with the policy
        message: String,
    },

    /// A configured user entry is not of the form `username:role`.
    #[error("Invalid user entry '{entry}': expected 'username:role'")]
    InvalidUserEntry {
        /// The raw entry
        entry: String,
    },

    /// A method token is not one of the supported methods.
    #[error("Unknown method: '{method}'")]
    UnknownMethod {
        /// The method token as supplied
        method: String,
    },

    /// A resource kind name does not match any resource kind.
    #[error("Unknown resource kind: '{name}'")]
    UnknownResourceKind {
        /// The resource kind name as supplied
        name: String,
    },
}

impl Error {
    /// Creates a new unknown role error.
    pub fn unknown_role<S: Into<String>>(name: S) -> Self {
        Error::UnknownRole { name: name.into() }
    }

    /// Creates a new invalid policy error.
    pub fn invalid_policy<S: Into<String>>(message: S) -> Self {
        Error::InvalidPolicy {
            message: message.into(),
        }
    }

    /// Creates a new invalid user entry error.
    pub fn invalid_user_entry<S: Into<String>>(entry: S) -> Self {
        Error::InvalidUserEntry {
            entry: entry.into(),
        }
    }
}
