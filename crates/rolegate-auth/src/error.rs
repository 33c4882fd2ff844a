//! Auth-specific error types.

use http::StatusCode;

/// Errors that can occur while authenticating or authorizing a request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No caller identity is attached to the request.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Username or password did not match.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The caller's role does not grant the operation.
    #[error("'{username}' may not {method} {resource}")]
    Forbidden {
        /// Caller username
        username: String,
        /// Method token
        method: String,
        /// Resource kind
        resource: String,
    },

    /// The HTTP method has no corresponding resource method.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}

impl AuthError {
    /// HTTP status to answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::NotAuthenticated | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Error category reported in response bodies.
    pub fn category(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated | AuthError::InvalidCredentials => "authentication",
            AuthError::Forbidden { .. } | AuthError::UnsupportedMethod(_) => "authorization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::NotAuthenticated.to_string(), "not authenticated");
        let e = AuthError::Forbidden {
            username: "vera".to_string(),
            method: "DELETE".to_string(),
            resource: "pool".to_string(),
        };
        assert_eq!(e.to_string(), "'vera' may not DELETE pool");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::NotAuthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::UnsupportedMethod("TRACE".into()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_category() {
        assert_eq!(AuthError::InvalidCredentials.category(), "authentication");
        assert_eq!(
            AuthError::UnsupportedMethod("TRACE".into()).category(),
            "authorization"
        );
    }
}
