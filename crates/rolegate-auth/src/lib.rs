//! Host-side adapters around the Rolegate decision engine.
//!
//! Provides:
//! - [`resolve_caller`] - Effective caller for a request, honoring `all_admins`
//! - [`caller_from_parts`] - Caller identity stored in request extensions
//! - [`LoginValidator`] - Username/password check against bootstrapped credentials
//! - [`AuthzLayer`] / [`AuthzService`] - Tower middleware guarding one resource kind
//! - [`AuthConfig`] - Configuration shared by the above
//! - [`AuthError`] - Auth-specific error types

mod error;
mod login;
mod middleware;
mod session;
mod user;

pub use error::AuthError;
pub use login::LoginValidator;
pub use middleware::{resource_method, AuthzLayer, AuthzService};
pub use session::{anonymous_admin, is_logged_in, resolve_caller, ANONYMOUS};
pub use user::{caller_from_parts, username_from_parts};

/// Configuration for caller resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// Treat every request as the anonymous admin, logged in or not.
    pub all_admins: bool,
}
