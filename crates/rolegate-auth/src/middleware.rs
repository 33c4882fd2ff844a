//! Tower authorization middleware.
//!
//! `AuthzLayer` and `AuthzService` guard an inner service that handles one
//! resource kind. Each request is checked against the shared
//! [`PolicyTable`] using the HTTP method and the [`CallerIdentity`] the
//! session layer put in the request extensions.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Method, Request};
use rolegate_core::{CallerIdentity, PolicyTable, ResourceKind, ResourceMethod};
use tower::{Layer, Service};

use crate::session::resolve_caller;
use crate::{AuthConfig, AuthError};

/// Tower `Layer` that wraps services with a per-request authorization check.
#[derive(Clone)]
pub struct AuthzLayer {
    policies: Arc<PolicyTable>,
    kind: ResourceKind,
    config: AuthConfig,
}

impl AuthzLayer {
    /// Create a layer guarding resources of `kind`.
    pub fn new(policies: Arc<PolicyTable>, kind: ResourceKind, config: AuthConfig) -> Self {
        Self {
            policies,
            kind,
            config,
        }
    }
}

impl<S> Layer<S> for AuthzLayer {
    type Service = AuthzService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthzService {
            inner,
            policies: self.policies.clone(),
            kind: self.kind,
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that authorizes requests before forwarding them.
///
/// Allowed requests reach the inner service with the effective
/// `CallerIdentity` in their extensions (the anonymous admin when
/// `all_admins` is set).
#[derive(Clone)]
pub struct AuthzService<S> {
    inner: S,
    policies: Arc<PolicyTable>,
    kind: ResourceKind,
    config: AuthConfig,
}

impl<S> AuthzService<S> {
    fn check(&self, req: &Request<Body>) -> Result<CallerIdentity, AuthError> {
        let method = resource_method(req.method())
            .ok_or_else(|| AuthError::UnsupportedMethod(req.method().to_string()))?;

        let session_user = req.extensions().get::<CallerIdentity>().cloned();
        let caller = resolve_caller(session_user, &self.config).ok_or(AuthError::NotAuthenticated)?;

        if self.policies.authorize(Some(&caller), method, self.kind) {
            Ok(caller)
        } else {
            Err(AuthError::Forbidden {
                username: caller.username,
                method: method.to_string(),
                resource: self.kind.to_string(),
            })
        }
    }
}

impl<S> Service<Request<Body>> for AuthzService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let decision = self.check(&req);

        Box::pin(async move {
            match decision {
                Ok(caller) => {
                    req.extensions_mut().insert(caller);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(err) => {
                    log::warn!("Request rejected: {err}");
                    Ok(error_response(&err))
                }
            }
        })
    }
}

/// Map an HTTP method onto a resource method.
///
/// `HEAD` reads like `GET`, `PATCH` writes like `PUT`. Anything else without
/// a direct counterpart is unsupported.
pub fn resource_method(method: &Method) -> Option<ResourceMethod> {
    match *method {
        Method::GET | Method::HEAD => Some(ResourceMethod::Get),
        Method::POST => Some(ResourceMethod::Post),
        Method::PUT | Method::PATCH => Some(ResourceMethod::Put),
        Method::DELETE => Some(ResourceMethod::Delete),
        _ => None,
    }
}

/// Build a JSON error response for `err`.
fn error_response(err: &AuthError) -> axum::response::Response {
    let body = serde_json::json!({
        "error": {
            "category": err.category(),
            "message": err.to_string(),
        }
    });

    (
        err.status(),
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response()
}
