//! Caller identities and configured users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::role::Role;

/// The authenticated actor, as resolved by the authentication layer.
///
/// The role is kept as the raw string the authentication layer supplied; it
/// is only resolved against the hierarchy when a decision is made, so a
/// stale or misspelled role degrades to "no access" instead of failing the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Login name.
    pub username: String,
    /// Role name, matched case-insensitively against [`Role`] names.
    pub role: String,
}

impl CallerIdentity {
    /// Creates a caller identity.
    pub fn new<U: Into<String>, R: Into<String>>(username: U, role: R) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }

    /// Resolves the role name against the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRole`] when the name is empty or unknown.
    pub fn resolve_role(&self) -> Result<Role> {
        Role::from_name(&self.role)
    }
}

/// A `username:role` entry from the configured user list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfiguredUser {
    /// Login name.
    pub username: String,
    /// Role name as written in configuration; not validated here.
    pub role: String,
}

impl ConfiguredUser {
    /// Creates a configured user.
    pub fn new<U: Into<String>, R: Into<String>>(username: U, role: R) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }

    /// The identity this user has once logged in.
    pub fn identity(&self) -> CallerIdentity {
        CallerIdentity::new(self.username.clone(), self.role.clone())
    }
}

impl FromStr for ConfiguredUser {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let entry = s.trim();
        match entry.split_once(':') {
            Some((username, role)) if !username.is_empty() && !role.contains(':') => {
                Ok(Self::new(username, role))
            }
            _ => Err(Error::invalid_user_entry(entry)),
        }
    }
}

impl fmt::Display for ConfiguredUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.username, self.role)
    }
}

/// Parses a list of `username:role` entries, preserving order.
///
/// Duplicate usernames are kept as-is.
pub fn parse_users<I, S>(entries: I) -> Result<Vec<ConfiguredUser>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().parse())
        .collect()
}
