//! Per-resource-kind policies.
//!
//! Each resource kind maps to exactly one [`ResourcePolicy`]: a minimum
//! role for any operation, optionally lowered for read-only access. The
//! [`PolicyTable`] starts from the reference defaults and lets the host
//! override individual kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::authorize;
use crate::error::{Error, Result};
use crate::identity::CallerIdentity;
use crate::method::ResourceMethod;
use crate::role::Role;

// ============================================================================
// ResourceKind
// ============================================================================

/// A category of protected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Application configuration.
    Configuration,
    /// External connections.
    Connection,
    /// Variables.
    Variable,
    /// Worker pools.
    Pool,
    /// Assets.
    Asset,
    /// DAGs and their runs.
    Dag,
    /// Built-in views.
    View,
    /// Views contributed by plugins.
    CustomView,
}

impl ResourceKind {
    /// Every resource kind. The position of a kind in this array is its
    /// slot in a [`PolicyTable`].
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Configuration,
        ResourceKind::Connection,
        ResourceKind::Variable,
        ResourceKind::Pool,
        ResourceKind::Asset,
        ResourceKind::Dag,
        ResourceKind::View,
        ResourceKind::CustomView,
    ];

    /// The snake_case name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Configuration => "configuration",
            ResourceKind::Connection => "connection",
            ResourceKind::Variable => "variable",
            ResourceKind::Pool => "pool",
            ResourceKind::Asset => "asset",
            ResourceKind::Dag => "dag",
            ResourceKind::View => "view",
            ResourceKind::CustomView => "custom_view",
        }
    }

    /// Views are always checked as reads.
    pub const fn is_view(self) -> bool {
        matches!(self, ResourceKind::View | ResourceKind::CustomView)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| Error::UnknownResourceKind {
                name: s.to_string(),
            })
    }
}

// ============================================================================
// ResourcePolicy
// ============================================================================

/// Minimum roles for one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PolicySpec")]
pub struct ResourcePolicy {
    allow: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    allow_get: Option<Role>,
}

/// Unvalidated wire form of a [`ResourcePolicy`].
#[derive(Deserialize)]
struct PolicySpec {
    allow: Role,
    #[serde(default)]
    allow_get: Option<Role>,
}

impl TryFrom<PolicySpec> for ResourcePolicy {
    type Error = Error;

    fn try_from(spec: PolicySpec) -> Result<Self> {
        match spec.allow_get {
            Some(read) => ResourcePolicy::with_read(spec.allow, read),
            None => Ok(ResourcePolicy::new(spec.allow)),
        }
    }
}

impl ResourcePolicy {
    /// A policy requiring `allow` for every method.
    pub const fn new(allow: Role) -> Self {
        Self {
            allow,
            allow_get: None,
        }
    }

    /// A policy requiring `allow` in general and `allow_get` for reads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPolicy`] if `allow_get` ranks above `allow`.
    pub fn with_read(allow: Role, allow_get: Role) -> Result<Self> {
        if !allow.covers(allow_get) {
            return Err(Error::invalid_policy(format!(
                "read minimum {allow_get} exceeds minimum {allow}"
            )));
        }
        Ok(Self {
            allow,
            allow_get: Some(allow_get),
        })
    }

    const fn reference(allow: Role, allow_get: Role) -> Self {
        Self {
            allow,
            allow_get: Some(allow_get),
        }
    }

    /// The minimum role for non-read operations.
    pub const fn allow(&self) -> Role {
        self.allow
    }

    /// The distinct read minimum, if any.
    pub const fn allow_get(&self) -> Option<Role> {
        self.allow_get
    }

    /// The minimum role that applies to `method`.
    pub const fn effective_minimum(&self, method: ResourceMethod) -> Role {
        match (method.is_read_only(), self.allow_get) {
            (true, Some(read)) => read,
            _ => self.allow,
        }
    }

    /// The reference policy for a resource kind.
    pub const fn default_for(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Configuration | ResourceKind::Connection | ResourceKind::Variable => {
                Self::new(Role::Op)
            }
            ResourceKind::Pool | ResourceKind::Asset => Self::reference(Role::Op, Role::Viewer),
            ResourceKind::Dag => Self::reference(Role::User, Role::Viewer),
            ResourceKind::View | ResourceKind::CustomView => {
                Self::reference(Role::Viewer, Role::Viewer)
            }
        }
    }
}

impl fmt::Display for ResourcePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.allow_get {
            Some(read) => write!(f, "{} (GET: {})", self.allow, read),
            None => write!(f, "{}", self.allow),
        }
    }
}

// ============================================================================
// PolicyTable
// ============================================================================

/// Exactly one policy per resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: [ResourcePolicy; ResourceKind::ALL.len()],
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            policies: ResourceKind::ALL.map(ResourcePolicy::default_for),
        }
    }
}

impl PolicyTable {
    /// The reference policy table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the policy for `kind`.
    pub fn with_policy(mut self, kind: ResourceKind, policy: ResourcePolicy) -> Self {
        self.set(kind, policy);
        self
    }

    /// Replaces the policy for `kind` in place.
    pub fn set(&mut self, kind: ResourceKind, policy: ResourcePolicy) {
        self.policies[kind.slot()] = policy;
    }

    /// The policy for `kind`.
    pub fn get(&self, kind: ResourceKind) -> &ResourcePolicy {
        &self.policies[kind.slot()]
    }

    /// All `(kind, policy)` pairs in [`ResourceKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &ResourcePolicy)> + '_ {
        ResourceKind::ALL.into_iter().zip(self.policies.iter())
    }

    /// Decides whether `caller` may perform `method` on a resource of `kind`.
    ///
    /// Views are evaluated as `GET` whatever `method` is.
    pub fn authorize(
        &self,
        caller: Option<&CallerIdentity>,
        method: ResourceMethod,
        kind: ResourceKind,
    ) -> bool {
        let method = if kind.is_view() {
            ResourceMethod::Get
        } else {
            method
        };
        authorize(caller, method, self.get(kind))
    }
}
