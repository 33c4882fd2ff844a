//! Rolegate Core: role hierarchy, resource policies, and the decision engine.
//!
//! This crate has no internal Rolegate dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`role`]: The fixed, ranked role hierarchy
//! - [`identity`]: Caller identities and configured `username:role` entries
//! - [`method`]: Operation method tokens
//! - [`policy`]: Per-resource-kind policies and the policy table
//! - [`engine`]: The [`authorize`] decision function
//! - [`error`]: Error types and Result alias

pub mod engine;
pub mod error;
pub mod identity;
pub mod method;
pub mod policy;
pub mod role;

mod proptests;

// Re-export key types at crate root for convenience
pub use engine::authorize;
pub use error::{Error, Result};
pub use identity::{parse_users, CallerIdentity, ConfiguredUser};
pub use method::ResourceMethod;
pub use policy::{PolicyTable, ResourceKind, ResourcePolicy};
pub use role::{is_admin, rank_of, Role};
