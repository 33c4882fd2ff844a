//! Resolution of the effective caller for a request.

use rolegate_core::{CallerIdentity, Role};

use crate::AuthConfig;

/// Username given to every caller when `all_admins` is set, and reported
/// when no caller is present.
pub const ANONYMOUS: &str = "anonymous";

/// The identity every request runs as when `all_admins` is set.
pub fn anonymous_admin() -> CallerIdentity {
    CallerIdentity::new(ANONYMOUS, Role::MAX.name().to_ascii_lowercase())
}

/// Whether a request counts as logged in.
pub fn is_logged_in(session_user: Option<&CallerIdentity>, config: &AuthConfig) -> bool {
    session_user.is_some() || config.all_admins
}

/// The caller the decision engine should see.
///
/// With `all_admins` set this is always [`anonymous_admin`], whatever the
/// session holds; otherwise it is the session user, if any.
pub fn resolve_caller(
    session_user: Option<CallerIdentity>,
    config: &AuthConfig,
) -> Option<CallerIdentity> {
    if config.all_admins {
        return Some(anonymous_admin());
    }
    session_user
}
