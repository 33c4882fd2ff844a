//! Username/password login against the bootstrapped credential store.

use rolegate_core::{CallerIdentity, ConfiguredUser};
use rolegate_credentials::{Bootstrap, CredentialStore};

use crate::AuthError;

/// Validates logins against configured users and their generated passwords.
///
/// Owns the credential store produced by bootstrap; construct it once at
/// startup and share it (e.g. behind an `Arc`) with the login handler.
#[derive(Debug, Clone)]
pub struct LoginValidator {
    users: Vec<ConfiguredUser>,
    store: CredentialStore,
}

impl LoginValidator {
    /// Create a validator for `users` with passwords from `store`.
    pub fn new(users: Vec<ConfiguredUser>, store: CredentialStore) -> Self {
        Self { users, store }
    }

    /// Create a validator from a completed bootstrap.
    pub fn from_bootstrap(users: Vec<ConfiguredUser>, bootstrap: Bootstrap) -> Self {
        Self::new(users, bootstrap.store)
    }

    /// Check `password` for `username` and return the caller identity.
    ///
    /// When the same username is configured more than once, the last entry's
    /// role is used.
    pub fn login(&self, username: &str, password: &str) -> Result<CallerIdentity, AuthError> {
        if !self.store.verify(username, password) {
            log::warn!("Login failed for '{username}'");
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .users
            .iter()
            .rev()
            .find(|u| u.username == username)
            .ok_or(AuthError::InvalidCredentials)?;

        log::info!("User '{username}' logged in with role '{}'", user.role);
        Ok(user.identity())
    }

    /// The configured users, in configuration order.
    pub fn users(&self) -> &[ConfiguredUser] {
        &self.users
    }
}
