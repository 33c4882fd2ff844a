//! Caller identity extraction helpers.
//!
//! The session layer stores a [`CallerIdentity`] in the request extensions;
//! these helpers read it back.

use rolegate_core::CallerIdentity;

/// Extract the `CallerIdentity` from HTTP request `Parts`, if present.
pub fn caller_from_parts(parts: &http::request::Parts) -> Option<&CallerIdentity> {
    parts.extensions.get::<CallerIdentity>()
}

/// Extract the caller's username from HTTP request `Parts`.
///
/// Returns `"anonymous"` if no caller is present.
pub fn username_from_parts(parts: &http::request::Parts) -> &str {
    caller_from_parts(parts)
        .map(|c| c.username.as_str())
        .unwrap_or(crate::session::ANONYMOUS)
}
