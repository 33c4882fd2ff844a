//! Property-based tests for the role hierarchy and decision engine.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::{authorize, CallerIdentity, ResourceMethod, ResourcePolicy, Role};
    use proptest::prelude::*;

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    fn any_method() -> impl Strategy<Value = ResourceMethod> {
        prop::sample::select(ResourceMethod::ALL.to_vec())
    }

    fn any_policy() -> impl Strategy<Value = ResourcePolicy> {
        (any_role(), prop::option::of(any_role())).prop_map(|(a, b)| match b {
            Some(read) if a.covers(read) => ResourcePolicy::with_read(a, read).unwrap(),
            _ => ResourcePolicy::new(a),
        })
    }

    proptest! {
        #[test]
        fn test_covers_matches_rank(a in any_role(), b in any_role()) {
            prop_assert_eq!(a.covers(b), a.rank() >= b.rank());
        }

        #[test]
        fn test_covers_is_total(a in any_role(), b in any_role()) {
            prop_assert!(a.covers(b) || b.covers(a));
        }

        #[test]
        fn test_covers_is_transitive(a in any_role(), b in any_role(), c in any_role()) {
            if a.covers(b) && b.covers(c) {
                prop_assert!(a.covers(c));
            }
        }

        #[test]
        fn test_absent_caller_never_allowed(method in any_method(), policy in any_policy()) {
            prop_assert!(!authorize(None, method, &policy));
        }

        #[test]
        fn test_admin_always_allowed(method in any_method(), policy in any_policy()) {
            let admin = CallerIdentity::new("root", "ADMIN");
            prop_assert!(authorize(Some(&admin), method, &policy));
        }

        #[test]
        fn test_unknown_role_never_allowed(
            role in "[a-z]{1,12}",
            method in any_method(),
            policy in any_policy(),
        ) {
            prop_assume!(Role::from_name(&role).is_err());
            let caller = CallerIdentity::new("someone", role);
            prop_assert!(!authorize(Some(&caller), method, &policy));
        }

        #[test]
        fn test_non_admin_decision_is_rank_comparison(
            role in any_role(),
            method in any_method(),
            policy in any_policy(),
        ) {
            prop_assume!(!role.is_admin());
            let caller = CallerIdentity::new("someone", role.name());
            let expected = role.rank() >= policy.effective_minimum(method).rank();
            prop_assert_eq!(authorize(Some(&caller), method, &policy), expected);
        }
    }
}
