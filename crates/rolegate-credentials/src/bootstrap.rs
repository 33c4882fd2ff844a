//! Startup reconciliation of configured users and persisted passwords.
//!
//! Bootstrap runs once, before any authorization check is served:
//!
//! 1. load the persisted store (missing file: empty)
//! 2. drop users that are no longer configured
//! 3. generate passwords for configured users that have none
//! 4. write the reconciled store back
//!
//! Passwords of users that survive reconciliation are never regenerated.

use std::collections::HashSet;

use rand::Rng;
use rolegate_core::ConfiguredUser;

use crate::error::Result;
use crate::file::CredentialFile;
use crate::password::generate_password_with;
use crate::store::CredentialStore;

/// Outcome of a bootstrap pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    /// The reconciled store; exactly one entry per configured username.
    pub store: CredentialStore,
    /// One `username: password` line per configured user, in input order.
    pub lines: Vec<String>,
}

/// Reconciles `persisted` against `users` without touching the filesystem.
pub fn reconcile<R: Rng + ?Sized>(
    users: &[ConfiguredUser],
    persisted: CredentialStore,
    rng: &mut R,
) -> Bootstrap {
    let configured: HashSet<&str> = users.iter().map(|u| u.username.as_str()).collect();

    let mut store = persisted;
    let before = store.len();
    store.retain(|username| configured.contains(username));
    let dropped = before - store.len();

    let mut generated = 0;
    let mut lines = Vec::with_capacity(users.len());
    for user in users {
        if !store.contains(&user.username) {
            store.insert(user.username.as_str(), generate_password_with(&mut *rng));
            generated += 1;
        }
        let password = store.get(&user.username).unwrap_or_default();
        lines.push(format!("{}: {password}", user.username));
    }

    log::info!(
        "Reconciled credentials: {} kept, {generated} generated, {dropped} dropped",
        store.len() - generated
    );

    Bootstrap { store, lines }
}

/// Loads, reconciles, and persists the credential store.
///
/// # Errors
///
/// Fails if the persisted file exists but cannot be read or parsed, or if
/// the reconciled store cannot be written. Either way the previous file is
/// left as it was.
pub fn bootstrap(users: &[ConfiguredUser], file: &CredentialFile) -> Result<Bootstrap> {
    let persisted = file.load()?;
    let result = reconcile(users, persisted, &mut rand::thread_rng());
    file.save(&result.store)?;
    log::info!(
        "Credential bootstrap complete for {} user(s) at {}",
        result.store.len(),
        file.path().display()
    );
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::password::PASSWORD_LENGTH;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn users(entries: &[&str]) -> Vec<ConfiguredUser> {
        rolegate_core::parse_users(entries).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_reconcile_keeps_drops_and_generates() {
        let persisted: CredentialStore = [("alice", "X"), ("bob", "Y")].into_iter().collect();
        let result = reconcile(&users(&["alice:op", "carol:viewer"]), persisted, &mut rng());

        assert_eq!(result.store.len(), 2);
        assert_eq!(result.store.get("alice"), Some("X"));
        assert!(!result.store.contains("bob"));
        assert_eq!(result.store.get("carol").unwrap().len(), PASSWORD_LENGTH);
    }

    #[test]
    fn test_reconcile_lines_follow_input_order() {
        let persisted: CredentialStore = [("zed", "Z")].into_iter().collect();
        let result = reconcile(&users(&["zed:admin", "amy:user"]), persisted, &mut rng());

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0], "zed: Z");
        let amy = result.store.get("amy").unwrap();
        assert_eq!(result.lines[1], format!("amy: {amy}"));
    }

    #[test]
    fn test_reconcile_empty_users_empties_store() {
        let persisted: CredentialStore = [("alice", "X")].into_iter().collect();
        let result = reconcile(&[], persisted, &mut rng());
        assert!(result.store.is_empty());
        assert!(result.lines.is_empty());
    }

    #[test]
    fn test_reconcile_duplicate_usernames_collapse() {
        let result = reconcile(
            &users(&["dup:viewer", "dup:admin"]),
            CredentialStore::new(),
            &mut rng(),
        );
        assert_eq!(result.store.len(), 1);
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0], result.lines[1]);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let configured = users(&["alice:op", "bob:viewer"]);
        let first = reconcile(&configured, CredentialStore::new(), &mut rng());
        let second = reconcile(
            &configured,
            first.store.clone(),
            &mut StdRng::seed_from_u64(7),
        );
        assert_eq!(first, second);
    }
}
