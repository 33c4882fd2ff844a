//! Property-based tests for password generation, persistence and reconciliation.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rolegate_core::ConfiguredUser;

    use crate::{
        reconcile, password::generate_password_with, CredentialFile, CredentialStore, ALPHABET,
        PASSWORD_LENGTH,
    };

    fn any_username() -> impl Strategy<Value = String> {
        "[a-z]{1,8}"
    }

    fn any_store() -> impl Strategy<Value = CredentialStore> {
        prop::collection::btree_map(any_username(), "\\PC{0,20}", 0..8)
            .prop_map(|passwords| passwords.into_iter().collect())
    }

    fn any_users() -> impl Strategy<Value = Vec<ConfiguredUser>> {
        prop::collection::vec(
            (
                any_username(),
                prop::sample::select(vec!["viewer", "user", "op", "admin"]),
            ),
            0..8,
        )
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(name, role)| ConfiguredUser::new(name, role))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_generated_password_shape(seed in any::<u64>()) {
            let password = generate_password_with(&mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(password.len(), PASSWORD_LENGTH);
            prop_assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
            prop_assert!(!password.contains(['i', 'l', 'o', 'I', 'L', 'O']));
        }

        #[test]
        fn test_save_then_load_returns_same_store(store in any_store()) {
            let dir = tempfile::TempDir::new().unwrap();
            let file = CredentialFile::in_dir(dir.path());
            file.save(&store).unwrap();
            prop_assert_eq!(file.load().unwrap(), store);
        }

        #[test]
        fn test_reconcile_keeps_exactly_configured_users(
            users in any_users(),
            persisted in any_store(),
            seed in any::<u64>(),
        ) {
            let result = reconcile(&users, persisted.clone(), &mut StdRng::seed_from_u64(seed));

            let configured: HashSet<&str> = users.iter().map(|u| u.username.as_str()).collect();
            let stored: HashSet<&str> = result.store.iter().map(|(name, _)| name).collect();
            prop_assert_eq!(stored, configured);
            prop_assert_eq!(result.lines.len(), users.len());

            for (name, password) in result.store.iter() {
                match persisted.get(name) {
                    Some(previous) => prop_assert_eq!(password, previous),
                    None => prop_assert_eq!(password.len(), PASSWORD_LENGTH),
                }
            }
        }

        #[test]
        fn test_reconcile_twice_is_stable(
            users in any_users(),
            persisted in any_store(),
            first_seed in any::<u64>(),
            second_seed in any::<u64>(),
        ) {
            let first = reconcile(&users, persisted, &mut StdRng::seed_from_u64(first_seed));
            let second = reconcile(
                &users,
                first.store.clone(),
                &mut StdRng::seed_from_u64(second_seed),
            );
            prop_assert_eq!(first, second);
        }
    }
}
