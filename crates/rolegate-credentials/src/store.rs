//! The username → password mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Generated passwords keyed by username.
///
/// Serializes as a flat JSON object. After bootstrap the store is only
/// read, typically through [`CredentialStore::verify`] by the login flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialStore {
    passwords: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The password for `username`, if any.
    pub fn get(&self, username: &str) -> Option<&str> {
        self.passwords.get(username).map(String::as_str)
    }

    /// Whether `username` has a password.
    pub fn contains(&self, username: &str) -> bool {
        self.passwords.contains_key(username)
    }

    /// Sets the password for `username`, returning the previous one.
    pub fn insert<U: Into<String>, P: Into<String>>(
        &mut self,
        username: U,
        password: P,
    ) -> Option<String> {
        self.passwords.insert(username.into(), password.into())
    }

    /// Keeps only the users for which `keep` returns true.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.passwords.retain(|username, _| keep(username));
    }

    /// Whether `password` is the stored password for `username`.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.get(username).is_some_and(|stored| stored == password)
    }

    /// Number of users with a password.
    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }

    /// Iterates `(username, password)` pairs in username order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.passwords
            .iter()
            .map(|(username, password)| (username.as_str(), password.as_str()))
    }
}

impl<U: Into<String>, P: Into<String>> FromIterator<(U, P)> for CredentialStore {
    fn from_iter<I: IntoIterator<Item = (U, P)>>(iter: I) -> Self {
        Self {
            passwords: iter
                .into_iter()
                .map(|(u, p)| (u.into(), p.into()))
                .collect(),
        }
    }
}
