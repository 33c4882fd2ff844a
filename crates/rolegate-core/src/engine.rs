//! The authorization decision engine.
//!
//! [`authorize`] is a pure function of its arguments and the constant role
//! hierarchy. It never fails: every problem with the caller (absent, empty
//! or unknown role) is a deny.

use crate::identity::CallerIdentity;
use crate::method::ResourceMethod;
use crate::policy::ResourcePolicy;

/// Decides whether `caller` may perform `method` under `policy`.
///
/// The checks run in a fixed order:
///
/// 1. no caller: deny
/// 2. role does not resolve: deny
/// 3. admin: allow, without consulting `policy`
/// 4. compare the caller's rank with the policy minimum for `method`
///
/// # Examples
///
/// ```
/// use rolegate_core::{authorize, CallerIdentity, ResourceMethod, ResourcePolicy, Role};
///
/// let policy = ResourcePolicy::with_read(Role::Op, Role::Viewer).unwrap();
/// let viewer = CallerIdentity::new("vera", "viewer");
///
/// assert!(authorize(Some(&viewer), ResourceMethod::Get, &policy));
/// assert!(!authorize(Some(&viewer), ResourceMethod::Post, &policy));
/// assert!(!authorize(None, ResourceMethod::Get, &policy));
/// ```
pub fn authorize(
    caller: Option<&CallerIdentity>,
    method: ResourceMethod,
    policy: &ResourcePolicy,
) -> bool {
    let Some(caller) = caller else {
        log::debug!("Denied {method}: no authenticated caller");
        return false;
    };

    let role = match caller.resolve_role() {
        Ok(role) => role,
        Err(e) => {
            log::debug!("Denied {method} for '{}': {e}", caller.username);
            return false;
        }
    };

    if role.is_admin() {
        return true;
    }

    let minimum = policy.effective_minimum(method);
    let allowed = role.covers(minimum);
    if !allowed {
        log::debug!(
            "Denied {method} for '{}': role {role} below minimum {minimum}",
            caller.username
        );
    }
    allowed
}
